//! # Memory Management
//!
//! The injection seam between storage containers and the system allocator.
//!
//! ## Design Philosophy
//!
//! Storage never reaches for a global behind the caller's back: every
//! container takes an allocator handle at construction, defaulting to
//! [`GlobalAllocator`] only at the composition root.

mod alloc;

pub use alloc::{GlobalAllocator, RawAllocator};
