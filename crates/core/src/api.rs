//! High-level reconciliation API.
//!
//! Nothing here runs at load time; callers build inputs, pick options, and
//! invoke an entry point. Pages are independent, so the multi-page entry
//! point fans out across a rayon pool while sharing the similarity tables
//! read-only.

use rayon::prelude::*;
use tracing::instrument;

use crate::dict::{GlyphSimilarity, WordGlyphs};
use crate::error::Result;
use crate::layout::{TextRegion, sort_into_columns, sort_reading_order};
use crate::normalize::reference_words;
use crate::reconcile::{GlyphMatch, LinePairing, match_glyphs, pair_lines};
use crate::report::{GlyphRecord, build_page_records};

/// Options for a reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOptions {
    /// Fold each column of stacked regions into one logical line before
    /// pairing against the reference.
    pub merge_stacks: bool,

    /// Maximum distance, in words, at which a region's estimated word count
    /// snaps to the positional reference count.
    pub snap_tolerance: i64,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            merge_stacks: true,
            snap_tolerance: 3,
        }
    }
}

/// One page of detector output plus its reference transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInput {
    /// Document stem used in record ids.
    pub stem: String,
    /// 1-based page number.
    pub page_number: u32,
    /// Detected line regions with transcriptions, unordered.
    pub regions: Vec<TextRegion>,
    /// Detected glyph boxes (quarter-size convention), unordered. May be
    /// empty when glyph detection did not run.
    pub glyph_boxes: Vec<TextRegion>,
    /// Reference sentences for this page, in reading order.
    pub reference_lines: Vec<String>,
}

/// Everything produced for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReconciliation {
    /// Line-level pairings in reading order.
    pub pairings: Vec<LinePairing>,
    /// Glyph matches per pairing, same order.
    pub matches: Vec<Vec<GlyphMatch>>,
    /// Review-table rows for the page.
    pub records: Vec<GlyphRecord>,
}

/// Reconciles one page of detector output with its reference
/// transcription.
#[instrument(skip_all, fields(stem = %input.stem, page = input.page_number))]
pub fn reconcile_page(
    input: &PageInput,
    similar: &GlyphSimilarity,
    word_glyphs: &WordGlyphs,
    options: &ReconcileOptions,
) -> Result<PageReconciliation> {
    for region in input.regions.iter().chain(input.glyph_boxes.iter()) {
        region.validate()?;
    }

    let ordered = sort_reading_order(input.regions.clone(), options.merge_stacks);
    let glyph_columns = sort_into_columns(&input.glyph_boxes);
    let pairings = pair_lines(ordered, &input.reference_lines, options.snap_tolerance);

    let matches: Vec<Vec<GlyphMatch>> = pairings
        .iter()
        .map(|pairing| {
            let words = pairing
                .reference
                .as_deref()
                .map(reference_words)
                .unwrap_or_default();
            match_glyphs(&pairing.region.transcription, &words, similar, word_glyphs)
        })
        .collect();

    let records = build_page_records(&input.stem, input.page_number, &matches, &glyph_columns);

    log::debug!(
        "page {}: {} pairings, {} records",
        input.page_number,
        pairings.len(),
        records.len()
    );

    Ok(PageReconciliation {
        pairings,
        matches,
        records,
    })
}

/// Reconciles many pages in parallel. Output order follows input order.
#[instrument(skip_all, fields(pages = pages.len()))]
pub fn reconcile_pages(
    pages: &[PageInput],
    similar: &GlyphSimilarity,
    word_glyphs: &WordGlyphs,
    options: &ReconcileOptions,
) -> Result<Vec<PageReconciliation>> {
    pages
        .par_iter()
        .map(|page| reconcile_page(page, similar, word_glyphs, options))
        .collect()
}
