//! Benchmark for IndexedSequence vs standard Vec.
//!
//! The map-backed sequence is not meant to be fast; these numbers track the
//! cost of re-keying so that regressions in the mutation paths stay visible.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use listy::sequence::{IndexedSequence, Slice};
use std::hint::black_box;

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let indexed_sequence: IndexedSequence<i32> = (0..size).collect();
        let standard_vector: Vec<i32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("IndexedSequence", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0_i64;
                    for index in 0..size as isize {
                        sum += i64::from(*indexed_sequence.get_index(black_box(-index - 1)).unwrap());
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0_i64;
                for index in 0..size as usize {
                    sum += i64::from(standard_vector[black_box(size as usize - index - 1)]);
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// insert Benchmark (front insertion re-keys every entry)
// =============================================================================

fn benchmark_insert_front(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert_front");

    for size in [100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("IndexedSequence", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sequence = IndexedSequence::new();
                    for value in 0..size {
                        sequence.insert(0, black_box(value));
                    }
                    black_box(sequence)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vec::new();
                for value in 0..size {
                    vector.insert(0, black_box(value));
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

// =============================================================================
// slice Benchmark
// =============================================================================

fn benchmark_slice_assignment(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("slice_assignment");

    for size in [100, 1000, 10000] {
        let base: IndexedSequence<i32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("unit_step_grow", size),
            &base,
            |bencher, base| {
                bencher.iter(|| {
                    let mut sequence = base.clone();
                    sequence
                        .set_slice(Slice::range(1, 2), black_box([7, 8, 9]))
                        .unwrap();
                    black_box(sequence)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("extended_delete", size),
            &base,
            |bencher, base| {
                bencher.iter(|| {
                    let mut sequence = base.clone();
                    sequence.delete_slice(black_box(Slice::new(None, None, Some(-2)).unwrap()));
                    black_box(sequence)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("reversed_get", size), &base, |bencher, base| {
            bencher.iter(|| black_box(base.get_slice(black_box(Slice::reversed()))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_get,
    benchmark_insert_front,
    benchmark_slice_assignment
);
criterion_main!(benches);
