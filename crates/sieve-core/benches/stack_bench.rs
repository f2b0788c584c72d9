//! # Stack Benchmarks
//!
//! Performance benchmarks for sieve-core stack operations.
//!
//! Run with: `cargo bench -p sieve-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sieve_core::{Sample, SieveStack, UnitsSystem};
use std::hint::black_box;

/// Apertures halving from 100 mm, `count` screens deep.
fn apertures(count: usize) -> Vec<f64> {
    (0..count).map(|i| 100.0 / 2f64.powi(i as i32)).collect()
}

/// A loaded stack with `count` screens, 10 g on each entry.
fn create_loaded_stack(count: usize) -> SieveStack {
    let mut stack = SieveStack::new(
        apertures(count),
        UnitsSystem::Metric,
        Some(Sample::with_dry_mass(10.0 * (count + 1) as f64)),
    );
    for size in stack.sizes() {
        stack.set_retained(size, 10.0).expect("retain");
    }
    stack
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for count in [8, 32, 128].iter() {
        let mut sizes = apertures(*count);
        sizes.reverse();

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| black_box(SieveStack::new(sizes.clone(), UnitsSystem::Metric, None)));
        });
    }

    group.finish();
}

fn bench_add_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_remove");

    for count in [8, 32, 128].iter() {
        let stack = create_loaded_stack(*count);

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                let mut stack = stack.clone();
                let _ = stack.add(black_box(3.0));
                let _ = stack.remove(black_box(3.0));
                black_box(stack)
            });
        });
    }

    group.finish();
}

fn bench_compute_passing(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_passing");

    for count in [8, 32, 128].iter() {
        let stack = create_loaded_stack(*count);

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| black_box(stack.compute_passing()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_add_remove,
    bench_compute_passing,
);

criterion_main!(benches);
