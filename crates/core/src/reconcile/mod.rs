//! Hierarchical reconciliation of ordered regions with the reference
//! transcription: line pairing first, then per-line glyph matching.

pub mod glyphs;
pub mod lines;

pub use glyphs::{GlyphMatch, match_glyphs};
pub use lines::{LinePairing, pair_lines};
