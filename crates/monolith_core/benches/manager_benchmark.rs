//! # Component Manager Benchmark
//!
//! Attach/detach churn, per-field writes and entity lookups at one
//! hundred thousand components.
//!
//! Run with: `cargo bench --package monolith_core`

// Benchmarks don't need docs
#![allow(missing_docs)]
#![allow(dead_code)]

use bytemuck::{Pod, Zeroable};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use monolith_core::{ComponentManager, Entity, EntityAllocator, Instance};

/// Component count for the steady-state benchmarks.
const ENTITY_COUNT: usize = 100_000;

/// Health component, a plain pair of counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
struct Health {
    current: u32,
    maximum: u32,
}

type HealthRow = (Health,);

fn issued_entities() -> Vec<Entity> {
    let allocator = EntityAllocator::new();
    let mut entities = vec![Entity::NULL; ENTITY_COUNT];
    allocator.create_many(&mut entities);
    entities
}

fn populated() -> (ComponentManager<HealthRow>, Vec<Entity>) {
    let entities = issued_entities();
    let mut manager: ComponentManager<HealthRow> = ComponentManager::new();
    manager.reserve(ENTITY_COUNT);
    for &entity in &entities {
        manager.add_component(entity);
    }
    (manager, entities)
}

/// Benchmark: attach then detach every entity from a reserved manager.
fn bench_attach_detach(c: &mut Criterion) {
    let entities = issued_entities();

    c.bench_function("manager_attach_detach_100k", |b| {
        b.iter_batched(
            || {
                let mut manager: ComponentManager<HealthRow> = ComponentManager::new();
                manager.reserve(ENTITY_COUNT);
                manager
            },
            |mut manager| {
                for &entity in &entities {
                    manager.add_component(entity);
                }
                for &entity in &entities {
                    manager.remove_component(entity);
                }
                manager
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: write one field of every live instance.
fn bench_field_writes(c: &mut Criterion) {
    let (mut manager, _entities) = populated();
    let instances: Vec<Instance> = manager.instances().collect();

    c.bench_function("manager_field_write_100k", |b| {
        b.iter(|| {
            for &instance in &instances {
                manager.field::<0>(instance).set(Health {
                    current: 90,
                    maximum: 100,
                });
            }
            black_box(manager.component_count())
        });
    });
}

/// Benchmark: entity-to-instance lookups that hit.
fn bench_instance_lookup(c: &mut Criterion) {
    let (manager, entities) = populated();

    c.bench_function("manager_instance_lookup_100k", |b| {
        b.iter(|| {
            let mut live = 0usize;
            for &entity in &entities {
                if manager.instance(black_box(entity)).is_valid() {
                    live += 1;
                }
            }
            black_box(live)
        });
    });
}

criterion_group!(
    benches,
    bench_attach_detach,
    bench_field_writes,
    bench_instance_lookup
);
criterion_main!(benches);
