//! # MONOLITH Core Kernel
//!
//! Columnar entity-component storage for simulation-heavy runtimes.
//! Components live in structure-of-arrays tables, entities are opaque
//! recycled ids, and every lookup that can miss reports a null sentinel
//! instead of failing.
//!
//! ## Architecture Rules
//!
//! 1. **One block per store**: all columns of a store share a single
//!    contiguous allocation, grown together and migrated with plain
//!    byte copies.
//! 2. **Stable O(1) lookups**: entity handles survive swap-and-pop
//!    compaction because the sparse index is patched in the same step.
//! 3. **Allocation is injected**: storage asks a [`RawAllocator`]
//!    handle for memory, never a global behind the caller's back.
//!
//! ## Example
//!
//! ```
//! use monolith_core::{ComponentManager, EntityAllocator};
//!
//! let allocator = EntityAllocator::new();
//! let player = allocator.create();
//!
//! let mut health: ComponentManager<(u32,)> = ComponentManager::new();
//! let instance = health.add_component(player);
//! health.field::<0>(instance).set(100);
//! assert_eq!(*health.element::<0>(instance), 100);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;
pub mod memory;

pub use ecs::{
    ColumnAt, ColumnInfo, ColumnTable, ColumnVisitor, ComponentManager, Elements, Entity,
    EntityAllocator, Field, Instance, Row, RowClone, RowIter, Section, SectionId, SparseIndex,
    StructOfArrays, World, MAX_COLUMN_ALIGN,
};
pub use memory::{GlobalAllocator, RawAllocator};
