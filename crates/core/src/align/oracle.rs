//! Three-way equivalence between detected glyphs and reference words.

use crate::dict::{GlyphSimilarity, WordGlyphs};

/// Outcome of comparing a detected glyph with a reference word.
///
/// `Exact` and `Partial` both count as a match for alignment purposes; the
/// distinction survives into the output annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchClass {
    /// The glyph is one of the word's associated glyphs.
    Exact,
    /// No direct hit, but the glyph's similarity set intersects the word's
    /// associated set.
    Partial,
    /// Neither check succeeded.
    None,
}

impl MatchClass {
    /// Whether this classification counts as equality for the alignment
    /// engine.
    pub fn is_match(self) -> bool {
        self != MatchClass::None
    }
}

/// Classifies a glyph against a reference word.
///
/// Total over all inputs: a glyph or word absent from its table has an
/// empty similarity set, so the result degrades to `None` rather than an
/// error.
pub fn classify(
    glyph: char,
    word: &str,
    similar: &GlyphSimilarity,
    word_glyphs: &WordGlyphs,
) -> MatchClass {
    let associated = word_glyphs.glyphs(word);
    if let Some(associated) = associated {
        if associated.contains(&glyph) {
            return MatchClass::Exact;
        }
        if let Some(similars) = similar.similar(glyph) {
            if !similars.is_disjoint(associated) {
                return MatchClass::Partial;
            }
        }
    }
    MatchClass::None
}
