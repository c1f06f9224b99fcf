//! # Raw Allocation Seam
//!
//! Columnar tables do not call the global allocator directly. They go
//! through a [`RawAllocator`] handle injected at construction, so a
//! composition root can substitute instrumented or arena-backed allocation
//! without touching storage code.

// SAFETY: this module defines the raw allocation contract; every unsafe
// block documents the invariant it relies on.
#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Allocation interface threaded through every storage constructor.
///
/// Allocation failure is not recoverable at this layer: `allocate` never
/// returns null, it diverts to [`std::alloc::handle_alloc_error`] instead.
///
/// # Safety
///
/// Implementations must return blocks that satisfy the requested layout
/// and stay valid until passed back to [`RawAllocator::deallocate`] on the
/// same instance with the same layout.
pub unsafe trait RawAllocator {
    /// Allocates a block satisfying `layout`.
    ///
    /// # Panics
    ///
    /// Panics if `layout` is zero-sized. Out-of-memory does not return:
    /// the process aborts via [`std::alloc::handle_alloc_error`].
    fn allocate(&self, layout: Layout) -> NonNull<u8>;

    /// Frees a block previously obtained from [`RawAllocator::allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this same instance with this
    /// same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The process-wide default allocator, backed by [`std::alloc`].
///
/// A zero-sized handle: threading it through containers costs nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalAllocator;

// SAFETY: std::alloc blocks satisfy the requested layout and remain valid
// until freed with the same layout.
unsafe impl RawAllocator for GlobalAllocator {
    fn allocate(&self, layout: Layout) -> NonNull<u8> {
        assert!(layout.size() > 0, "zero-size allocation request");
        // SAFETY: layout is non-zero-sized, checked above.
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw) {
            Some(block) => block,
            None => alloc::handle_alloc_error(layout),
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the caller guarantees ptr/layout came from `allocate`.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
    }
}
