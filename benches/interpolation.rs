//! Criterion benchmarks for DBH curve evaluation.
//!
//! Benchmarks:
//!   - piecewise_linear on a single DBH in each regime
//!   - sum_piecewise_linear over a street inventory of 10k trees
//!
//! Run with: cargo bench --bench interpolation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eco_benefits::piecewise_linear;
use eco_benefits::utils::sum_piecewise_linear;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Breakpoints shaped like the regional tables (cm)
const BREAKPOINTS: [f64; 10] = [3.8, 11.4, 22.9, 38.1, 53.3, 68.6, 83.8, 99.1, 114.3, 137.2];

fn curve() -> Vec<f64> {
    BREAKPOINTS.iter().map(|b| b * 1.7 + 4.0).collect()
}

fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("piecewise_linear");
    group.sample_size(1000);

    let values = curve();

    for (name, dbh) in [("below_first", 2.0), ("inside", 61.0), ("beyond_last", 250.0)] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(piecewise_linear(&BREAKPOINTS, &values, black_box(dbh))))
        });
    }

    group.finish();
}

fn bench_inventory(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_piecewise_linear");

    let values = curve();
    let mut rng = StdRng::seed_from_u64(42);
    let dbhs: Vec<f64> = (0..10_000).map(|_| rng.gen_range(0.0..160.0)).collect();

    group.bench_function("10k_trees", |b| {
        b.iter(|| black_box(sum_piecewise_linear(&BREAKPOINTS, &values, black_box(&dbhs))))
    });

    group.finish();
}

criterion_group!(benches, bench_single, bench_inventory);
criterion_main!(benches);
