//! Parsing of detector output into text regions.
//!
//! Two formats arrive from the detection side:
//!
//! - label lines: one JSON array of `{transcription, points}` records per
//!   line, written by a Python tool, so single-quoted and carrying
//!   `\UXXXXXXXX` escapes for supplementary-plane glyphs;
//! - glyph box lines: whitespace-separated `cx cy w h` floats per detected
//!   glyph, stored as a quarter-size quadrilateral that
//!   [`expand_glyph_quad`] later scales back to the full character box.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{AlignError, Result};
use crate::layout::TextRegion;
use crate::utils::{Point, round4};

static UNICODE_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\U([0-9A-Fa-f]{8})").expect("valid escape regex"));

#[derive(Debug, Deserialize)]
struct RawRegion {
    #[serde(default)]
    transcription: String,
    points: Vec<Point>,
}

/// Expands `\UXXXXXXXX` escapes into their characters.
fn expand_unicode_escapes(text: &str) -> Result<Cow<'_, str>> {
    if !UNICODE_ESCAPE.is_match(text) {
        return Ok(Cow::Borrowed(text));
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in UNICODE_ESCAPE.captures_iter(text) {
        let whole = caps.get(0).expect("capture 0 always present");
        let hex = &caps[1];
        let code = u32::from_str_radix(hex, 16)
            .map_err(|_| AlignError::LabelParse(format!("bad unicode escape \\U{hex}")))?;
        let ch = char::from_u32(code)
            .ok_or_else(|| AlignError::LabelParse(format!("invalid codepoint U+{code:X}")))?;
        out.push_str(&text[last..whole.start()]);
        out.push(ch);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(Cow::Owned(out))
}

/// Parses one label line (a JSON array of region records) into regions.
pub fn parse_label_line(line: &str) -> Result<Vec<TextRegion>> {
    let quoted = line.replace('\'', "\"");
    let expanded = expand_unicode_escapes(&quoted)?;
    let raw: Vec<RawRegion> = serde_json::from_str(&expanded)?;
    raw.into_iter()
        .map(|r| TextRegion::from_points(&r.points, r.transcription))
        .collect()
}

/// Parses a whole label file body, one JSON array per non-empty line.
pub fn parse_label_text(content: &str) -> Result<Vec<TextRegion>> {
    let mut regions = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        regions.extend(parse_label_line(line)?);
    }
    Ok(regions)
}

/// Parses glyph box lines (`cx cy w h` per line) into the quarter-size
/// quadrilaterals of the detector convention.
pub fn parse_glyph_boxes(content: &str) -> Result<Vec<TextRegion>> {
    let mut boxes = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<f64> = line
            .split_whitespace()
            .map(|f| {
                f.parse::<f64>().map_err(|_| {
                    AlignError::LabelParse(format!("glyph box line {}: bad float {f:?}", idx + 1))
                })
            })
            .collect::<Result<_>>()?;
        let &[cx, cy, w, h] = &fields[..] else {
            return Err(AlignError::LabelParse(format!(
                "glyph box line {}: expected 4 fields, got {}",
                idx + 1,
                fields.len()
            )));
        };
        let region = TextRegion::new(
            [
                (cx - w / 4.0, cy),
                (cx, cy),
                (cx, cy + h / 4.0),
                (cx - w / 4.0, cy + h / 4.0),
            ],
            "",
        );
        region.validate()?;
        boxes.push(region);
    }
    Ok(boxes)
}

/// Recovers the full character box from a quarter-size glyph quadrilateral.
///
/// The detector stores a box one quarter the character's size anchored at
/// the glyph center; scaling each edge back out by the stored quarter
/// extents yields the w x h box centered on the glyph. Moved coordinates
/// round to 4 decimals.
pub fn expand_glyph_quad(region: &TextRegion) -> TextRegion {
    let mut points = region.points;
    let width = (points[1].0 - points[0].0) * 4.0;
    let height = (points[2].1 - points[0].1) * 4.0;

    points[1].0 = round4(points[1].0 + width / 2.0);
    points[2].0 = round4(points[2].0 + width / 2.0);
    points[0].1 = round4(points[0].1 - height / 2.0);
    points[1].1 = round4(points[1].1 - height / 2.0);
    points[0].0 = round4(points[0].0 - width / 4.0);
    points[3].0 = round4(points[3].0 - width / 4.0);
    points[2].1 = round4(points[2].1 + height / 4.0);
    points[3].1 = round4(points[3].1 + height / 4.0);

    TextRegion::new(points, region.transcription.clone())
}
