//! Tests for reading-order sorting: column discovery, vertical ordering,
//! merge behavior, and the sorter's structural invariants.

use nomalign_core::layout::{TextRegion, merge_column, sort_into_columns, sort_reading_order};

fn region(x0: f64, y0: f64, x1: f64, y1: f64, text: &str) -> TextRegion {
    TextRegion::new([(x0, y0), (x1, y0), (x1, y1), (x0, y1)], text)
}

fn transcriptions(regions: &[TextRegion]) -> Vec<&str> {
    regions.iter().map(|r| r.transcription.as_str()).collect()
}

// ============================================================================
// Column discovery and ordering
// ============================================================================

#[test]
fn stacked_pair_reads_top_to_bottom() {
    let a = region(0.0, 0.0, 1.0, 1.0, "a");
    let b = region(0.0, 1.0, 1.0, 2.0, "b");

    let sorted = sort_reading_order(vec![b.clone(), a.clone()], false);
    assert_eq!(sorted, vec![a, b]);
}

#[test]
fn columns_come_out_rightmost_first() {
    let right = region(10.0, 0.0, 12.0, 5.0, "right");
    let middle = region(5.0, 0.0, 7.0, 5.0, "middle");
    let left = region(0.0, 0.0, 2.0, 5.0, "left");

    let sorted = sort_reading_order(vec![left, right, middle], false);
    assert_eq!(transcriptions(&sorted), vec!["right", "middle", "left"]);
}

#[test]
fn transitive_overlap_joins_one_column() {
    // a and c do not overlap directly; b bridges them.
    let a = region(0.0, 0.0, 1.0, 1.0, "a");
    let b = region(0.5, 1.0, 1.5, 2.0, "b");
    let c = region(1.4, 2.0, 2.4, 3.0, "c");

    let columns = sort_into_columns(&[a, b, c]);
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].len(), 3);
}

#[test]
fn long_overlap_chains_stay_in_one_column() {
    // Chain of 5 regions, each overlapping only its neighbor; transitive
    // closure must pull all of them into the seed's column.
    let chain: Vec<TextRegion> = (0..5)
        .map(|i| {
            let x = i as f64 * 0.8;
            region(x, i as f64, x + 1.0, i as f64 + 1.0, "x")
        })
        .collect();

    let columns = sort_into_columns(&chain);
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].len(), 5);
}

#[test]
fn same_rank_regions_read_right_to_left() {
    // Three overlapping regions at the same vertical rank.
    let a = region(0.0, 0.0, 2.0, 1.0, "a");
    let b = region(1.0, 0.0, 3.0, 1.0, "b");
    let c = region(2.0, 0.0, 4.0, 1.0, "c");

    let sorted = sort_reading_order(vec![a, b, c], false);
    assert_eq!(transcriptions(&sorted), vec!["c", "b", "a"]);
}

// ============================================================================
// Structural invariants
// ============================================================================

#[test]
fn sort_is_a_permutation_of_the_input() {
    let input = vec![
        region(10.0, 0.0, 11.0, 1.0, "a"),
        region(5.0, 0.0, 6.0, 1.0, "b"),
        region(0.0, 0.0, 1.0, 1.0, "c"),
        region(10.0, 2.0, 11.0, 3.0, "d"),
        region(5.0, 2.0, 6.0, 3.0, "e"),
    ];

    let sorted = sort_reading_order(input.clone(), false);
    assert_eq!(sorted.len(), input.len());
    for r in &input {
        assert!(sorted.contains(r), "region {:?} lost by sort", r.transcription);
    }
}

#[test]
fn regions_in_different_columns_never_overlap_directly() {
    let input = vec![
        region(10.0, 0.0, 11.0, 1.0, "a"),
        region(0.0, 0.0, 1.0, 1.0, "b"),
        region(10.5, 2.0, 11.5, 3.0, "c"),
        region(0.5, 2.0, 1.5, 3.0, "d"),
    ];

    let columns = sort_into_columns(&input);
    assert_eq!(columns.len(), 2);
    for (i, first) in columns.iter().enumerate() {
        for second in &columns[i + 1..] {
            for a in first {
                for b in second {
                    assert!(
                        !a.x_interval_overlaps(b) && !b.x_interval_overlaps(a),
                        "columns leak overlap between {:?} and {:?}",
                        a.transcription,
                        b.transcription
                    );
                }
            }
        }
    }
}

#[test]
fn sort_is_deterministic() {
    let input = vec![
        region(0.0, 0.0, 1.0, 1.0, "a"),
        region(0.0, 0.0, 1.0, 1.0, "b"),
        region(0.0, 0.0, 1.0, 1.0, "c"),
    ];

    let first = sort_reading_order(input.clone(), false);
    let second = sort_reading_order(input, false);
    assert_eq!(first, second);
}

#[test]
fn degenerate_zero_area_regions_sort_without_panic() {
    let input = vec![
        region(1.0, 1.0, 1.0, 1.0, "point"),
        region(0.0, 0.0, 2.0, 0.0, "flat"),
    ];

    let sorted = sort_reading_order(input, false);
    assert_eq!(sorted.len(), 2);
}

// ============================================================================
// Merging stacked regions
// ============================================================================

#[test]
fn merge_stacks_folds_each_column_into_one_region() {
    let input = vec![
        region(10.0, 0.0, 11.0, 2.0, "ab"),
        region(10.0, 2.0, 11.0, 5.0, "cd"),
        region(0.0, 0.0, 1.0, 2.0, "ef"),
    ];

    let merged = sort_reading_order(input, true);
    assert_eq!(transcriptions(&merged), vec!["abcd", "ef"]);
    // Bottom edge of the merged right column extends by the folded
    // region's side height (3.0).
    assert_eq!(merged[0].points[2].1, 5.0);
    assert_eq!(merged[0].points[3].1, 5.0);
}

#[test]
fn merge_leaves_sources_untouched() {
    let a = region(0.0, 0.0, 1.0, 1.0, "a");
    let b = region(0.0, 1.0, 1.0, 2.0, "b");
    let column = vec![a.clone(), b.clone()];

    let merged = merge_column(&column);
    assert_eq!(merged.transcription, "ab");
    assert_eq!(column[0], a);
    assert_eq!(column[1], b);
}

#[test]
fn empty_input_is_empty_output() {
    assert!(sort_reading_order(Vec::new(), false).is_empty());
    assert!(sort_reading_order(Vec::new(), true).is_empty());
}
