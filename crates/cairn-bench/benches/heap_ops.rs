//! Criterion micro-benchmarks for allocation, release, and placement.

use cairn_bench::{bench_heap, churn_round, size_trace};
use cairn_heap::Strategy;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Benchmark: allocate/release churn of 256 payloads per strategy.
fn bench_churn_by_strategy(c: &mut Criterion) {
    let sizes = size_trace(42, 256);
    let mut group = c.benchmark_group("churn_256");
    for strategy in [
        Strategy::BestFit,
        Strategy::FirstFit,
        Strategy::WorstFit,
        Strategy::NextFit,
    ] {
        group.bench_function(format!("{strategy:?}"), |b| {
            let mut heap = bench_heap(strategy);
            b.iter(|| churn_round(&mut heap, black_box(&sizes)));
        });
    }
    group.finish();
}

/// Benchmark: allocation into a long free list (placement scan cost).
fn bench_fragmented_alloc(c: &mut Criterion) {
    c.bench_function("fragmented_alloc", |b| {
        let mut heap = bench_heap(Strategy::BestFit);
        // Build a fragmented heap: many live blocks with holes between.
        let live: Vec<_> = (0..512)
            .filter_map(|_| heap.allocate(32).ok())
            .collect();
        for p in live.iter().step_by(2) {
            heap.release(*p);
        }
        b.iter(|| {
            let p = heap.allocate(16).unwrap();
            heap.release(black_box(p));
        });
    });
}

/// Benchmark: full address-order walk of a churned heap.
fn bench_block_walk(c: &mut Criterion) {
    let mut heap = bench_heap(Strategy::FirstFit);
    let live: Vec<_> = (0..512)
        .filter_map(|_| heap.allocate(48).ok())
        .collect();
    for p in live.iter().step_by(3) {
        heap.release(*p);
    }
    c.bench_function("block_walk", |b| {
        b.iter(|| black_box(heap.stats()));
    });
}

criterion_group!(
    benches,
    bench_churn_by_strategy,
    bench_fragmented_alloc,
    bench_block_walk
);
criterion_main!(benches);
