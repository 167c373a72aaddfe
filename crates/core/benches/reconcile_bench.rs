//! Benchmarks for the reading-order sorter and the alignment engine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use nomalign_core::align::align_eq;
use nomalign_core::layout::{TextRegion, sort_reading_order};

/// Deterministic xorshift so runs are comparable without a rand dependency.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn gen_f64(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }
}

/// Lays out `columns` vertical columns of `rows` stacked regions each,
/// with light jitter, shuffled into detector-like arbitrary order.
fn generate_page(seed: u64, columns: usize, rows: usize) -> Vec<TextRegion> {
    let mut rng = XorShift64::new(seed);
    let mut regions = Vec::with_capacity(columns * rows);
    for col in 0..columns {
        let x0 = col as f64 * 40.0 + rng.gen_f64(0.0, 3.0);
        for row in 0..rows {
            let y0 = row as f64 * 30.0 + rng.gen_f64(0.0, 3.0);
            let (x1, y1) = (x0 + 28.0, y0 + 26.0);
            regions.push(TextRegion::new(
                [(x0, y0), (x1, y0), (x1, y1), (x0, y1)],
                "天",
            ));
        }
    }
    // Fisher-Yates with the same generator.
    for i in (1..regions.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        regions.swap(i, j);
    }
    regions
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_reading_order");
    for &(columns, rows) in &[(4usize, 8usize), (8, 16), (16, 16)] {
        let page = generate_page(7, columns, rows);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{columns}x{rows}")),
            &page,
            |b, page| {
                b.iter(|| sort_reading_order(black_box(page.clone()), true));
            },
        );
    }
    group.finish();
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_eq");
    for &len in &[16usize, 64, 256] {
        let mut rng = XorShift64::new(11);
        let source: Vec<u32> = (0..len).map(|_| (rng.next_u64() % 32) as u32).collect();
        let reference: Vec<u32> = source
            .iter()
            .map(|&t| if rng.next_u64() % 5 == 0 { t + 1 } else { t })
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(len),
            &(source, reference),
            |b, (source, reference)| {
                b.iter(|| align_eq(black_box(source), black_box(reference)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_sort, bench_align);
criterion_main!(benches);
