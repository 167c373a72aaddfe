//! Glyph-level matching of a region's transcription against its reference
//! sentence.

use smol_str::SmolStr;

use crate::align::{MatchClass, align, classify};
use crate::dict::{GlyphSimilarity, WordGlyphs};
use crate::normalize::glyph_tokens;

/// One aligned glyph/word pair.
///
/// A present glyph with a gap word is a detection with no reference
/// counterpart; a gap glyph with a present word is a reference word the
/// detector missed (insertion). Gap-side rows always classify `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMatch {
    pub glyph: Option<char>,
    pub word: Option<SmolStr>,
    pub class: MatchClass,
}

/// Aligns the glyphs of a transcription against normalized reference words
/// and tags every pair with its match class.
///
/// When the reference side is empty the glyphs are still emitted, each as
/// an unmatched mismatch, so no detection disappears from the output.
pub fn match_glyphs(
    transcription: &str,
    words: &[SmolStr],
    similar: &GlyphSimilarity,
    word_glyphs: &WordGlyphs,
) -> Vec<GlyphMatch> {
    let glyphs = glyph_tokens(transcription);
    if words.is_empty() {
        return glyphs
            .into_iter()
            .map(|glyph| GlyphMatch {
                glyph: Some(glyph),
                word: None,
                class: MatchClass::None,
            })
            .collect();
    }

    let alignment = align(&glyphs, words, |&glyph, word| {
        classify(glyph, word, similar, word_glyphs).is_match()
    });

    alignment
        .pairs()
        .map(|(&glyph, word)| match (glyph, word) {
            (Some(glyph), Some(word)) => GlyphMatch {
                glyph: Some(glyph),
                word: Some(word.clone()),
                class: classify(glyph, word, similar, word_glyphs),
            },
            (Some(glyph), None) => GlyphMatch {
                glyph: Some(glyph),
                word: None,
                class: MatchClass::None,
            },
            (None, Some(word)) => GlyphMatch {
                glyph: None,
                word: Some(word.clone()),
                class: MatchClass::None,
            },
            (None, None) => unreachable!("alignment never emits a double gap"),
        })
        .collect()
}
