//! nomalign - reconciliation of Sino-Nom OCR output with reference
//! transcriptions.
//!
//! The crate takes unordered detected text regions, recovers their
//! right-to-left columnar reading order, and aligns them hierarchically
//! against a trusted quoc-ngu transcription: sentences first, then the
//! individual glyphs of each matched line, classifying every glyph as an
//! exact, partial, or failed match via similarity dictionaries.

pub mod align;
pub mod api;
pub mod dict;
pub mod error;
pub mod input;
pub mod layout;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod utils;

pub use align::{Alignment, MatchClass, align, align_eq, classify};
pub use api::{PageInput, PageReconciliation, ReconcileOptions, reconcile_page, reconcile_pages};
pub use dict::{GlyphSimilarity, WordGlyphs};
pub use error::{AlignError, Result};
pub use layout::{TextRegion, merge_column, sort_into_columns, sort_reading_order};
pub use reconcile::{GlyphMatch, LinePairing, match_glyphs, pair_lines};
pub use report::{GlyphRecord, Mark, Summary};
