//! Benchmarks comparing the two containers against std baselines.
//!
//! Run with: cargo bench

use std::collections::VecDeque;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use linear_seq::{DynamicArray, LinkedSequence};

const COUNT: usize = 10_000;

// ============================================================================
// Append (push to the back)
// ============================================================================

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(COUNT as u64));

    group.bench_function("dynamic-array", |b| {
        b.iter(|| {
            let mut seq = DynamicArray::new();
            for i in 0..COUNT as u64 {
                seq.append(black_box(i));
            }
            seq
        });
    });

    group.bench_function("linked-sequence", |b| {
        b.iter(|| {
            let mut seq = LinkedSequence::new();
            for i in 0..COUNT as u64 {
                seq.append(black_box(i));
            }
            seq
        });
    });

    group.bench_function("std-vec", |b| {
        b.iter(|| {
            let mut seq = Vec::new();
            for i in 0..COUNT as u64 {
                seq.push(black_box(i));
            }
            seq
        });
    });

    group.finish();
}

// ============================================================================
// Prepend (push to the front) - quadratic for the array, O(1) for the list
// ============================================================================

fn bench_prepend(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepend");
    // Keep the quadratic case affordable.
    let count = COUNT / 10;
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("dynamic-array", |b| {
        b.iter(|| {
            let mut seq = DynamicArray::new();
            for i in 0..count as u64 {
                seq.prepend(black_box(i));
            }
            seq
        });
    });

    group.bench_function("linked-sequence", |b| {
        b.iter(|| {
            let mut seq = LinkedSequence::new();
            for i in 0..count as u64 {
                seq.prepend(black_box(i));
            }
            seq
        });
    });

    group.bench_function("std-vecdeque", |b| {
        b.iter(|| {
            let mut seq = VecDeque::new();
            for i in 0..count as u64 {
                seq.push_front(black_box(i));
            }
            seq
        });
    });

    group.finish();
}

// ============================================================================
// Full traversal
// ============================================================================

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(COUNT as u64));

    let array: DynamicArray<u64> = (0..COUNT as u64).collect();
    let list: LinkedSequence<u64> = (0..COUNT as u64).collect();

    group.bench_function("dynamic-array", |b| {
        b.iter(|| array.iter().copied().sum::<u64>());
    });

    group.bench_function("linked-sequence", |b| {
        b.iter(|| list.iter().copied().sum::<u64>());
    });

    group.finish();
}

// ============================================================================
// Pop from the front until drained
// ============================================================================

fn bench_drain_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain_front");
    let count = COUNT / 10;
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("dynamic-array", |b| {
        b.iter(|| {
            let mut seq: DynamicArray<u64> = (0..count as u64).collect();
            while let Ok(value) = seq.pop_front() {
                black_box(value);
            }
        });
    });

    group.bench_function("linked-sequence", |b| {
        b.iter(|| {
            let mut seq: LinkedSequence<u64> = (0..count as u64).collect();
            while let Ok(value) = seq.pop_front() {
                black_box(value);
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_append,
    bench_prepend,
    bench_iterate,
    bench_drain_front
);
criterion_main!(benches);
