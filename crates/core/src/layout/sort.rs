//! Reading-order sorting of detected text regions.
//!
//! The documents processed here are printed in vertical columns read
//! right-to-left, top-to-bottom within a column. Detection emits regions in
//! arbitrary order; this module recovers the reading sequence:
//!
//!   1. seed the next column with the rightmost remaining region,
//!   2. close the column over transitive x-interval overlap,
//!   3. order the column top-to-bottom (right-to-left within a rank),
//!   4. repeat until no regions remain; columns come out rightmost-first.
//!
//! Seed and rank selection keep the first candidate found by linear scan, so
//! geometric ties resolve by input order. That rule is deterministic and
//! intentionally kept over a coordinate sort.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::instrument;

use super::region::TextRegion;

/// Sorts regions into reading order.
///
/// With `merge_stacks` set, each column is folded into a single region (see
/// [`merge_column`]); otherwise the per-column orderings are flattened,
/// yielding a permutation of the input.
#[instrument(skip(regions), level = "debug")]
pub fn sort_reading_order(regions: Vec<TextRegion>, merge_stacks: bool) -> Vec<TextRegion> {
    let columns = sort_into_columns(&regions);
    if merge_stacks {
        columns.iter().map(|column| merge_column(column)).collect()
    } else {
        columns.into_iter().flatten().collect()
    }
}

/// Groups regions into columns and orders each column top-to-bottom.
/// Columns are returned rightmost-first.
pub fn sort_into_columns(regions: &[TextRegion]) -> Vec<Vec<TextRegion>> {
    let mut remaining: Vec<usize> = (0..regions.len()).collect();
    let mut columns = Vec::new();

    while !remaining.is_empty() {
        let seed = rightmost_seed(&remaining, regions);
        let stack = collect_stack(seed, &remaining, regions);
        let ordered = order_stack_vertically(&stack, regions);

        log::debug!(
            "column {} holds {} of {} remaining regions",
            columns.len(),
            ordered.len(),
            remaining.len()
        );

        remaining.retain(|i| !stack.contains(i));
        columns.push(ordered.iter().map(|&i| regions[i].clone()).collect());
    }

    columns
}

/// Folds an ordered column into one region: transcriptions concatenate in
/// reading order and the bottom edge extends downward by each merged
/// region's larger side height. Produces a new value; the inputs are
/// untouched.
pub fn merge_column(column: &[TextRegion]) -> TextRegion {
    let mut merged = column[0].clone();
    for region in &column[1..] {
        merged.transcription.push_str(&region.transcription);
        let (left, right) = region.side_heights();
        let extent = left.max(right);
        merged.points[2].1 += extent;
        merged.points[3].1 += extent;
    }
    merged
}

/// Picks the column seed: the first remaining region, in scan order, with
/// no other remaining region lying entirely to its right.
fn rightmost_seed(remaining: &[usize], regions: &[TextRegion]) -> usize {
    for &i in remaining {
        let blocked = remaining
            .iter()
            .any(|&j| j != i && regions[j].extends_rightward_of(&regions[i]));
        if !blocked {
            return i;
        }
    }
    // Only reachable with degenerate geometry where every region claims
    // another to its right; fall back to scan order.
    remaining[0]
}

/// Closes the column over x-interval overlap, iterating full scans until a
/// fixed point so arbitrarily long overlap chains join the stack.
fn collect_stack(seed: usize, remaining: &[usize], regions: &[TextRegion]) -> Vec<usize> {
    let mut stack = vec![seed];
    loop {
        let mut added = false;
        for &i in remaining {
            if stack.contains(&i) {
                continue;
            }
            if stack
                .iter()
                .any(|&member| regions[i].x_interval_overlaps(&regions[member]))
            {
                stack.push(i);
                added = true;
            }
        }
        if !added {
            return stack;
        }
    }
}

/// Orders a column top-to-bottom: repeatedly extracts the batch of regions
/// with nothing above them, sorted right-to-left within the batch.
fn order_stack_vertically(stack: &[usize], regions: &[TextRegion]) -> Vec<usize> {
    let mut pending: Vec<usize> = stack.to_vec();
    let mut ordered = Vec::with_capacity(stack.len());

    while !pending.is_empty() {
        let mut batch: SmallVec<[usize; 8]> = SmallVec::new();
        for &i in &pending {
            let has_above = pending.iter().any(|&j| {
                j != i && regions[i].top_edge_max_y() >= regions[j].bottom_edge_min_y()
            });
            if !has_above {
                batch.push(i);
            }
        }
        if batch.is_empty() {
            // Degenerate mutual-overlap cycle; flush what is left so the
            // sort stays total.
            batch.extend(pending.iter().copied());
        }
        batch.sort_by_key(|&i| Reverse(OrderedFloat(regions[i].points[0].0)));
        pending.retain(|i| !batch.contains(i));
        ordered.extend(batch);
    }

    ordered
}
