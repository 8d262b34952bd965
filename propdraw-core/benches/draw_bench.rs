//! Criterion benchmarks for propdraw hot paths.
//!
//! Benchmarks:
//! 1. Categorical construction and single-index sampling
//! 2. Single draw against registries of growing size
//! 3. Duplicated (with replacement) batch draws
//! 4. Non-duplicated (without replacement) draws, which rebuild the layout each step

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use propdraw_core::{Categorical, Drawer, WeightedChoice};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_weights(n: usize) -> Vec<f64> {
    (0..n).map(|i| 1.0 + (i as f64 * 0.37).sin().abs() * 10.0).collect()
}

fn make_choice(n: usize) -> WeightedChoice<u32> {
    WeightedChoice::from_entries(
        make_weights(n)
            .into_iter()
            .enumerate()
            .map(|(i, w)| (i as u32, w)),
    )
    .unwrap()
}

const SIZES: [usize; 3] = [10, 100, 1_000];

// ── 1. Categorical ───────────────────────────────────────────────────

fn bench_categorical(c: &mut Criterion) {
    let mut group = c.benchmark_group("categorical");
    for n in SIZES {
        let weights = make_weights(n);
        group.bench_with_input(BenchmarkId::new("build", n), &weights, |b, w| {
            b.iter(|| Categorical::new(black_box(w)).unwrap())
        });

        let dist = Categorical::new(&weights).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        group.bench_with_input(BenchmarkId::new("sample", n), &dist, |b, d| {
            b.iter(|| black_box(d.sample(&mut rng)))
        });
    }
    group.finish();
}

// ── 2. Single draw ───────────────────────────────────────────────────

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    for n in SIZES {
        let choice = make_choice(n);
        let mut drawer = Drawer::seeded(7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &choice, |b, ch| {
            b.iter(|| black_box(drawer.draw(ch).unwrap()))
        });
    }
    group.finish();
}

// ── 3. Duplicated draws ──────────────────────────────────────────────

fn bench_draw_duplicated(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_duplicated_x100");
    for n in SIZES {
        let choice = make_choice(n);
        let mut drawer = Drawer::seeded(7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &choice, |b, ch| {
            b.iter(|| black_box(drawer.draw_duplicated(ch, 100).unwrap()))
        });
    }
    group.finish();
}

// ── 4. Non-duplicated draws ──────────────────────────────────────────

fn bench_draw_non_duplicated(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_non_duplicated_half");
    for n in SIZES {
        let choice = make_choice(n);
        let mut drawer = Drawer::seeded(7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &choice, |b, ch| {
            b.iter(|| black_box(drawer.draw_non_duplicated(ch, n / 2).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_categorical,
    bench_draw,
    bench_draw_duplicated,
    bench_draw_non_duplicated
);
criterion_main!(benches);
