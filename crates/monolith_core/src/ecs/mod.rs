//! # Entity-Component Core
//!
//! Dense, cache-friendly storage for entities and their components,
//! layered from bytes up to safe handles:
//!
//! - [`columnar`]: type-erased parallel arrays in one allocation
//! - [`StructOfArrays`]: compile-time-typed facade over the arena
//! - [`SparseIndex`]: entity-to-row resolution with a null sentinel
//! - [`ComponentManager`]: attach, detach and per-field access
//! - [`World`]: named sections sharing one id space
//!
//! ## Design Philosophy
//!
//! Hot loops read columns as plain slices. Everything above the arena
//! exists to hand those slices out safely and to keep entity handles
//! stable while rows move underneath them.

pub mod columnar;

mod entity;
mod manager;
mod soa;
mod sparse;
mod world;

pub use columnar::{ColumnInfo, ColumnTable, MAX_COLUMN_ALIGN};
pub use entity::{Entity, EntityAllocator};
pub use manager::{ComponentManager, Elements, Field};
pub use soa::{ColumnAt, ColumnVisitor, Row, RowClone, RowIter, StructOfArrays};
pub use sparse::{Instance, SparseIndex};
pub use world::{Section, SectionId, World};
