//! # Storage Performance Benchmark
//!
//! Hot paths of the columnar storage:
//! - pushes with and without reserved capacity
//! - column iteration over one million rows
//! - swap-removal churn
//!
//! Run with: `cargo bench --package monolith_core`

// Benchmarks don't need docs and reach into the unchecked push path
#![allow(missing_docs)]
#![allow(dead_code)]
#![allow(unsafe_code)]

use bytemuck::{Pod, Zeroable};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use monolith_core::StructOfArrays;

/// Row count for the large iteration benchmarks.
const ROW_COUNT: usize = 1_000_000;

/// Position component, padded to 16 bytes for SIMD-friendly columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Position {
    x: f32,
    y: f32,
    z: f32,
    _padding: f32,
}

impl Position {
    const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            _padding: 0.0,
        }
    }
}

/// Velocity component, same layout as [`Position`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Velocity {
    x: f32,
    y: f32,
    z: f32,
    _padding: f32,
}

impl Velocity {
    const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            _padding: 0.0,
        }
    }
}

type MovementRow = (Position, Velocity);

fn filled_storage(rows: usize) -> StructOfArrays<MovementRow> {
    let mut storage: StructOfArrays<MovementRow> = StructOfArrays::new();
    storage.set_capacity(rows);
    for index in 0..rows {
        let f = index as f32;
        // SAFETY: capacity was reserved for every push.
        unsafe {
            storage.push_unchecked((Position::new(f, f, f), Velocity::new(0.1, 0.2, 0.3)));
        }
    }
    storage
}

/// Benchmark: grow-as-you-push against pre-reserved pushes.
fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("soa_push");

    for count in [10_000, 100_000, ROW_COUNT] {
        group.bench_with_input(BenchmarkId::new("unreserved", count), &count, |b, &count| {
            b.iter(|| {
                let mut storage: StructOfArrays<MovementRow> = StructOfArrays::new();
                for index in 0..count {
                    let f = index as f32;
                    storage.push((Position::new(f, f, f), Velocity::new(0.1, 0.2, 0.3)));
                }
                storage.len()
            });
        });

        group.bench_with_input(BenchmarkId::new("reserved", count), &count, |b, &count| {
            b.iter(|| filled_storage(count).len());
        });
    }

    group.finish();
}

/// Benchmark: sum one column across a million rows.
fn bench_column_sum(c: &mut Criterion) {
    let storage = filled_storage(ROW_COUNT);

    c.bench_function("soa_column_sum_1M", |b| {
        b.iter(|| {
            let mut total = 0.0f32;
            for position in storage.column::<0>() {
                total += position.x;
            }
            black_box(total)
        });
    });
}

/// THE CRITICAL BENCHMARK: integrate 1M positions from velocities.
fn bench_integrate(c: &mut Criterion) {
    let mut storage = filled_storage(ROW_COUNT);

    c.bench_function("soa_integrate_1M", |b| {
        b.iter(|| {
            let (positions, velocities) = storage.column_pair_mut::<0, 1>();
            for (position, velocity) in positions.iter_mut().zip(velocities.iter()) {
                position.x += velocity.x * 0.016;
                position.y += velocity.y * 0.016;
                position.z += velocity.z * 0.016;
            }
            black_box(positions.len())
        });
    });
}

/// Benchmark: churn half the rows out via swap-removal.
fn bench_swap_remove(c: &mut Criterion) {
    c.bench_function("soa_swap_remove_100k", |b| {
        b.iter_batched(
            || filled_storage(100_000),
            |mut storage| {
                while storage.len() > 50_000 {
                    storage.swap_remove(0);
                }
                storage
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_push,
    bench_column_sum,
    bench_integrate,
    bench_swap_remove
);
criterion_main!(benches);
