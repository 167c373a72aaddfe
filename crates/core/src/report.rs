//! Annotated output records and aggregate error statistics.
//!
//! Each record describes one glyph-level cell of the final review table:
//! where the glyph sits on the page, what the detector read, how it
//! classified against the reference, and which reference word it answers
//! to. The downstream spreadsheet renderer styles rows from these fields;
//! this module only assembles them and computes the summary rates.

use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use smol_str::SmolStr;

use crate::align::MatchClass;
use crate::input::expand_glyph_quad;
use crate::layout::TextRegion;
use crate::reconcile::GlyphMatch;

/// Rendering mark for a recognized glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Exact hit; rendered unstyled.
    Correct,
    /// Similarity-set hit; rendered distinctly (blue).
    Partial,
    /// No hit; rendered as an error (red).
    Mismatch,
}

impl Mark {
    pub fn from_class(class: MatchClass) -> Self {
        match class {
            MatchClass::Exact => Mark::Correct,
            MatchClass::Partial => Mark::Partial,
            MatchClass::None => Mark::Mismatch,
        }
    }

    /// Single-letter style code used in the exported table.
    pub fn code(self) -> char {
        match self {
            Mark::Correct => 'n',
            Mark::Partial => 'b',
            Mark::Mismatch => 'r',
        }
    }
}

/// One glyph-level row of the review table.
///
/// Insertion rows (a reference word the detector missed) carry empty ids,
/// no geometry, no glyph, and no mark. Rows whose region matched no
/// reference sentence set `missing_reference`; their geometry is styled as
/// a deletion downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub image_id: String,
    pub region_id: String,
    pub geometry: Option<String>,
    pub missing_reference: bool,
    pub glyph: Option<char>,
    pub mark: Option<Mark>,
    pub reference: Option<SmolStr>,
}

/// Formats a quadrilateral the way the exported table shows geometry.
pub fn format_points(region: &TextRegion) -> String {
    format!(
        "[{}]",
        region
            .points
            .iter()
            .map(|&(x, y)| format!("({x:?}, {y:?})"))
            .join(", ")
    )
}

/// Assembles the per-page records from per-region glyph matches and the
/// reading-ordered glyph boxes (one column per region).
///
/// Glyph geometry is consumed in order per region. When glyph detection ran
/// but a region's boxes run out early, the surplus glyph rows are dropped
/// (logged); when no glyph detection ran at all, rows are emitted without
/// geometry.
pub fn build_page_records(
    stem: &str,
    page_number: u32,
    matches: &[Vec<GlyphMatch>],
    glyph_columns: &[Vec<TextRegion>],
) -> Vec<GlyphRecord> {
    let image_id = format!("{stem}_page{page_number:03}.png");
    let have_geometry = !glyph_columns.is_empty();
    let mut records = Vec::new();

    for (region_idx, line_matches) in matches.iter().enumerate() {
        let geometry_run: &[TextRegion] = glyph_columns
            .get(region_idx)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let mut glyph_idx = 0;

        for m in line_matches {
            let Some(glyph) = m.glyph else {
                records.push(GlyphRecord {
                    image_id: String::new(),
                    region_id: String::new(),
                    geometry: None,
                    missing_reference: false,
                    glyph: None,
                    mark: None,
                    reference: m.word.clone(),
                });
                continue;
            };

            let geometry = if have_geometry {
                match geometry_run.get(glyph_idx) {
                    Some(quad) => Some(format_points(&expand_glyph_quad(quad))),
                    None => {
                        log::debug!(
                            "region {region_idx}: glyph boxes exhausted at glyph {glyph_idx}"
                        );
                        continue;
                    }
                }
            } else {
                None
            };

            let missing_reference = m.word.is_none();
            records.push(GlyphRecord {
                image_id: image_id.clone(),
                region_id: format!("{stem}.{page_number:03}.{region_idx:03}.{glyph_idx}"),
                geometry,
                missing_reference,
                glyph: Some(glyph),
                mark: Some(if missing_reference {
                    Mark::Mismatch
                } else {
                    Mark::from_class(m.class)
                }),
                reference: m.word.clone(),
            });
            glyph_idx += 1;
        }
    }

    records
}

/// Aggregate error statistics over a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Recognized glyphs that classified `Mismatch`.
    pub mismatches: usize,
    /// Recognized glyphs that classified `Exact` or `Partial`.
    pub kept: usize,
    /// Reference words with no recognized glyph.
    pub insertions: usize,
    /// Recognized glyphs whose region matched no reference sentence.
    pub deletions: usize,
}

impl Summary {
    pub fn from_records(records: &[GlyphRecord]) -> Self {
        let mut summary = Summary::default();
        for record in records {
            if record.glyph.is_none() {
                summary.insertions += 1;
                continue;
            }
            if record.missing_reference {
                summary.deletions += 1;
            }
            match record.mark {
                Some(Mark::Mismatch) => summary.mismatches += 1,
                Some(_) => summary.kept += 1,
                None => {}
            }
        }
        summary
    }

    /// Share of recognized glyphs that failed to classify.
    pub fn mismatch_rate(&self) -> f64 {
        let recognized = self.mismatches + self.kept;
        if recognized == 0 {
            0.0
        } else {
            self.mismatches as f64 / recognized as f64
        }
    }

    /// Share of all rows that are insertions or deletions.
    pub fn insertion_deletion_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.insertions + self.deletions) as f64 / total as f64
        }
    }

    pub fn total(&self) -> usize {
        self.insertions + self.mismatches + self.kept
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mismatch rate {:.4}, insertion+deletion rate {:.4} ({} rows, {} insertions, {} deletions)",
            self.mismatch_rate(),
            self.insertion_deletion_rate(),
            self.total(),
            self.insertions,
            self.deletions,
        )
    }
}

/// Per-image summaries in first-seen order. Insertion rows, which carry no
/// image id, group under the empty key.
pub fn per_image_summaries(records: &[GlyphRecord]) -> IndexMap<String, Summary> {
    let mut grouped: IndexMap<String, Vec<GlyphRecord>> = IndexMap::new();
    for record in records {
        grouped
            .entry(record.image_id.clone())
            .or_default()
            .push(record.clone());
    }
    grouped
        .into_iter()
        .map(|(image, rows)| (image, Summary::from_records(&rows)))
        .collect()
}
