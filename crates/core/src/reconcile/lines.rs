//! Line-level pairing of ordered regions with reference sentences.
//!
//! Neither side carries usable ids, so the pairing leans on a length
//! heuristic: a region's pixel length is converted to an estimated word
//! count via the page-wide average length per reference word, estimates
//! near the positional reference count snap to it, and the two integer
//! sequences are aligned under plain equality.

use tracing::instrument;

use crate::align::align_eq;
use crate::layout::TextRegion;
use crate::normalize::reference_word_count;

/// One region paired with its reference sentence, if any. Reference
/// sentences that matched no region are dropped (logged, not returned);
/// regions always survive.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePairing {
    pub region: TextRegion,
    pub reference: Option<String>,
}

/// Pairs ordered regions with ordered reference sentences.
///
/// `snap_tolerance` is the maximum distance (in words) at which a region's
/// estimated word count snaps to the reference count at the same position,
/// absorbing detector segmentation noise.
#[instrument(skip(regions, reference_lines), level = "debug")]
pub fn pair_lines(
    regions: Vec<TextRegion>,
    reference_lines: &[String],
    snap_tolerance: i64,
) -> Vec<LinePairing> {
    if regions.is_empty() {
        return Vec::new();
    }
    if reference_lines.is_empty() {
        // Nothing to align against; keep every region visible downstream.
        return regions
            .into_iter()
            .map(|region| LinePairing {
                region,
                reference: None,
            })
            .collect();
    }

    let lengths: Vec<f64> = regions.iter().map(TextRegion::length).collect();
    let counts: Vec<i64> = reference_lines
        .iter()
        .map(|line| reference_word_count(line) as i64)
        .collect();

    let total_length: f64 = lengths.iter().sum();
    let total_words: i64 = counts.iter().sum();

    let mut estimates: Vec<i64> = if total_words == 0 {
        // Degenerate page: no reference words anywhere, so there is no
        // length-per-word baseline. Raw lengths pass through.
        log::debug!("reference carries no words; skipping length normalization");
        lengths.iter().map(|&len| len.round() as i64).collect()
    } else {
        let length_per_word = total_length / total_words as f64;
        lengths
            .iter()
            .map(|&len| (len / length_per_word).round() as i64)
            .collect()
    };

    for i in 0..estimates.len().min(counts.len()) {
        if (estimates[i] - counts[i]).abs() <= snap_tolerance {
            estimates[i] = counts[i];
        }
    }

    let alignment = align_eq(&estimates, &counts);

    let mut pairings = Vec::with_capacity(regions.len());
    let mut region_idx = 0;
    let mut reference_idx = 0;
    for (estimate, count) in alignment.pairs() {
        match (estimate, count) {
            (None, Some(_)) => {
                log::debug!(
                    "reference line {} matched no region: {:?}",
                    reference_idx,
                    reference_lines[reference_idx]
                );
                reference_idx += 1;
            }
            (Some(_), None) => {
                pairings.push(LinePairing {
                    region: regions[region_idx].clone(),
                    reference: None,
                });
                region_idx += 1;
            }
            (Some(_), Some(_)) => {
                pairings.push(LinePairing {
                    region: regions[region_idx].clone(),
                    reference: Some(reference_lines[reference_idx].clone()),
                });
                region_idx += 1;
                reference_idx += 1;
            }
            (None, None) => unreachable!("alignment never emits a double gap"),
        }
    }

    pairings
}
