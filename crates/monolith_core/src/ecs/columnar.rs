//! # Columnar Storage Arena
//!
//! Type-erased storage for N parallel columns packed into one contiguous
//! allocation. Each column is a dense array of a single element type, and
//! row `i` of every column together forms one logical record.
//!
//! ```text
//! +- one allocation ------------------------------------------------+
//! | column 0 ........ | pad | column 1 ............ | pad | col 2   |
//! +-----------------------------------------------------------------+
//!   each column base is aligned to at least MAX_COLUMN_ALIGN
//! ```
//!
//! ## Design Philosophy
//!
//! The arena works on bytes and function pointers, never on concrete
//! types. A [`ColumnInfo`] captures everything the table needs from a
//! type up front: size, alignment, drop glue and default construction.
//! From then on every operation is pointer arithmetic over one buffer,
//! and the typed facade lives a layer up in [`crate::ecs::soa`].
//!
//! Growth never constructs or destroys elements. Moving a value in Rust
//! is an untyped byte copy, so migrating to a bigger buffer is a single
//! `memcpy` per column and drop glue runs only when a row is logically
//! removed.

// SAFETY: this module owns the raw buffer behind all columnar storage;
// every unsafe block states the invariant it relies on.
#![allow(unsafe_code)]
// Column base pointers are aligned to the element type by construction,
// so widening casts from the byte view are sound.
#![allow(clippy::cast_ptr_alignment)]

use std::alloc::Layout;
use std::any::TypeId;
use std::ptr::{self, NonNull};

use crate::memory::{GlobalAllocator, RawAllocator};

/// Minimum alignment of every column base, chosen to satisfy the widest
/// scalar and vector types in common use.
pub const MAX_COLUMN_ALIGN: usize = 16;

// ============================================================================
// COLUMN DESCRIPTORS
// ============================================================================

/// Type-erased drop glue. `raw` must point at a live, properly aligned `T`
/// the caller owns.
unsafe fn drop_in_place_erased<T>(raw: *mut u8) {
    // SAFETY: the caller hands us a pointer to a live T it owns.
    unsafe { raw.cast::<T>().drop_in_place() };
}

/// Type-erased default construction. `raw` must point at a properly
/// aligned, writable slot that holds no live value.
unsafe fn write_default_erased<T: Default>(raw: *mut u8) {
    // SAFETY: the caller hands us an aligned, vacant slot.
    unsafe { raw.cast::<T>().write(T::default()) };
}

/// Everything a [`ColumnTable`] needs to know about one column's element
/// type, captured once at construction.
#[derive(Clone, Copy, Debug)]
pub struct ColumnInfo {
    type_id: TypeId,
    type_name: &'static str,
    layout: Layout,
    drop_fn: Option<unsafe fn(*mut u8)>,
    default_fn: unsafe fn(*mut u8),
}

impl ColumnInfo {
    /// Describes a column holding elements of type `T`.
    #[must_use]
    pub fn of<T: Default + 'static>() -> Self {
        let drop_fn = if std::mem::needs_drop::<T>() {
            Some(drop_in_place_erased::<T> as unsafe fn(*mut u8))
        } else {
            None
        };
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            layout: Layout::new::<T>(),
            drop_fn,
            default_fn: write_default_erased::<T>,
        }
    }

    /// Identity of the element type.
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Diagnostic name of the element type.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Size and alignment of one element.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

// ============================================================================
// LAYOUT MATH
// ============================================================================

/// Rounds `value` up to the next multiple of `align`. `None` on overflow.
fn align_up(value: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two());
    value.checked_add(align - 1).map(|padded| padded & !(align - 1))
}

/// Well-aligned non-null pointer for the unallocated state.
fn dangling_for(align: usize) -> NonNull<u8> {
    NonNull::new(align as *mut u8).unwrap_or(NonNull::dangling())
}

/// Computes the packed buffer layout for `capacity` rows and writes each
/// column's byte offset into `offsets`.
///
/// # Panics
///
/// Panics when the requested row span cannot be addressed.
fn compute_layout(columns: &[ColumnInfo], capacity: usize, offsets: &mut [usize]) -> Layout {
    debug_assert_eq!(columns.len(), offsets.len());
    let mut cursor = 0usize;
    let mut buffer_align = MAX_COLUMN_ALIGN;
    for (info, slot) in columns.iter().zip(offsets.iter_mut()) {
        let align = info.layout.align().max(MAX_COLUMN_ALIGN);
        buffer_align = buffer_align.max(align);
        let placed = align_up(cursor, align).and_then(|base| {
            info.layout
                .size()
                .checked_mul(capacity)
                .and_then(|bytes| base.checked_add(bytes))
                .map(|end| (base, end))
        });
        let Some((base, end)) = placed else {
            panic!("columnar buffer of {capacity} rows overflows the address space");
        };
        *slot = base;
        cursor = end;
    }
    match Layout::from_size_align(cursor, buffer_align) {
        Ok(layout) => layout,
        Err(_) => panic!("columnar buffer of {cursor} bytes overflows the address space"),
    }
}

// ============================================================================
// COLUMN TABLE
// ============================================================================

/// N parallel type-erased arrays in one contiguous allocation.
///
/// The table tracks a logical length (rows holding live values) and a
/// physical capacity (rows the buffer can hold). Rows between the two are
/// reserved but vacant. Removal is swap-and-pop, so row order is not
/// stable across [`ColumnTable::swap_remove`].
///
/// # Performance
///
/// One allocation backs all columns, so growing N columns costs one
/// allocator round trip plus N `memcpy` calls. Element access is two adds
/// and a multiply off the base pointer.
#[derive(Debug)]
pub struct ColumnTable<A: RawAllocator = GlobalAllocator> {
    columns: Box<[ColumnInfo]>,
    offsets: Box<[usize]>,
    data: NonNull<u8>,
    buffer: Layout,
    len: usize,
    capacity: usize,
    allocator: A,
}

impl ColumnTable {
    /// Creates an empty table with the given column set, backed by the
    /// global allocator. No memory is allocated until rows are reserved.
    ///
    /// # Panics
    ///
    /// Panics when `columns` is empty.
    #[must_use]
    pub fn new(columns: Vec<ColumnInfo>) -> Self {
        Self::with_allocator(columns, GlobalAllocator)
    }
}

impl<A: RawAllocator> ColumnTable<A> {
    /// Creates an empty table that allocates through `allocator`.
    ///
    /// # Panics
    ///
    /// Panics when `columns` is empty.
    #[must_use]
    pub fn with_allocator(columns: Vec<ColumnInfo>, allocator: A) -> Self {
        assert!(!columns.is_empty(), "a column table needs at least one column");
        let columns: Box<[ColumnInfo]> = columns.into();
        let offsets = vec![0usize; columns.len()].into_boxed_slice();
        let align = columns
            .iter()
            .map(|info| info.layout.align().max(MAX_COLUMN_ALIGN))
            .max()
            .unwrap_or(MAX_COLUMN_ALIGN);
        Self {
            columns,
            offsets,
            data: dangling_for(align),
            buffer: Layout::new::<()>(),
            len: 0,
            capacity: 0,
            allocator,
        }
    }

    /// Number of live rows.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no rows are live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of rows the current buffer can hold.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Descriptor of one column.
    ///
    /// # Panics
    ///
    /// Panics when `column` is out of bounds.
    #[must_use]
    pub fn column_info(&self, column: usize) -> &ColumnInfo {
        &self.columns[column]
    }

    /// Replaces the buffer with one sized for exactly `new_capacity` rows
    /// and migrates all live rows into it.
    ///
    /// A request below the current length is ignored, so live rows are
    /// never truncated from here. Requesting the current capacity is a
    /// no-op. Shrinking to the exact length compacts the buffer.
    ///
    /// # Panics
    ///
    /// Panics when the row span cannot be addressed. Allocation failure
    /// aborts via [`std::alloc::handle_alloc_error`].
    pub fn set_capacity(&mut self, new_capacity: usize) {
        if new_capacity < self.len || new_capacity == self.capacity {
            return;
        }
        let mut offsets = vec![0usize; self.columns.len()].into_boxed_slice();
        let buffer = compute_layout(&self.columns, new_capacity, &mut offsets);
        let data = if buffer.size() > 0 {
            self.allocator.allocate(buffer)
        } else {
            dangling_for(buffer.align())
        };

        if self.len > 0 {
            for (column, info) in self.columns.iter().enumerate() {
                let bytes = info.layout.size() * self.len;
                if bytes == 0 {
                    continue;
                }
                // Moves are untyped byte copies, so one memcpy per column
                // migrates every live row. No drop glue runs here.
                //
                // SAFETY: both buffers cover `len` rows of this column and
                // cannot overlap, the destination is freshly allocated.
                unsafe {
                    ptr::copy_nonoverlapping(
                        self.data.as_ptr().add(self.offsets[column]),
                        data.as_ptr().add(offsets[column]),
                        bytes,
                    );
                }
            }
        }

        self.release_buffer();
        self.data = data;
        self.offsets = offsets;
        self.buffer = buffer;
        self.capacity = new_capacity;
    }

    /// Grows the buffer so at least `needed` rows fit, multiplying by 1.5
    /// to amortize repeated growth. Does nothing when capacity already
    /// suffices.
    ///
    /// # Panics
    ///
    /// Same failure modes as [`ColumnTable::set_capacity`].
    pub fn ensure_capacity(&mut self, needed: usize) {
        if needed <= self.capacity {
            return;
        }
        let grown = needed
            .checked_mul(3)
            .map_or(needed, |tripled| (tripled + 1) / 2);
        self.set_capacity(grown.max(needed));
    }

    /// Sets the logical length, default-constructing new rows on growth
    /// and running drop glue on the rows cut off by shrinking.
    ///
    /// # Panics
    ///
    /// Same failure modes as [`ColumnTable::set_capacity`] when growth
    /// has to reallocate.
    pub fn resize(&mut self, new_len: usize) {
        if new_len > self.len {
            self.ensure_capacity(new_len);
            let base = self.data.as_ptr();
            for (column, info) in self.columns.iter().enumerate() {
                let size = info.layout.size();
                // SAFETY: capacity covers new_len, the offset math stays
                // inside the buffer.
                let column_base = unsafe { base.add(self.offsets[column]) };
                for row in self.len..new_len {
                    // SAFETY: rows len..new_len are reserved and vacant.
                    unsafe { (info.default_fn)(column_base.add(row * size)) };
                }
            }
        } else {
            let base = self.data.as_ptr();
            for (column, info) in self.columns.iter().enumerate() {
                let Some(drop_fn) = info.drop_fn else { continue };
                let size = info.layout.size();
                // SAFETY: offsets index into the live buffer.
                let column_base = unsafe { base.add(self.offsets[column]) };
                for row in new_len..self.len {
                    // SAFETY: rows new_len..len hold live values owned by
                    // the table, each is dropped exactly once.
                    unsafe { drop_fn(column_base.add(row * size)) };
                }
            }
        }
        self.len = new_len;
    }

    /// Appends one default-constructed row.
    ///
    /// # Panics
    ///
    /// Same failure modes as [`ColumnTable::set_capacity`] when growth
    /// has to reallocate.
    pub fn push_default(&mut self) {
        self.resize(self.len + 1);
    }

    /// Removes the last row, running its drop glue. No-op when empty.
    pub fn pop_back(&mut self) {
        if self.len == 0 {
            return;
        }
        self.resize(self.len - 1);
    }

    /// Drops every live row. Capacity is retained.
    pub fn clear(&mut self) {
        self.resize(0);
    }

    /// Exchanges rows `first` and `second` across every column.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of bounds.
    pub fn swap(&mut self, first: usize, second: usize) {
        assert!(
            first < self.len && second < self.len,
            "row index out of bounds"
        );
        if first == second {
            return;
        }
        let base = self.data.as_ptr();
        for (column, info) in self.columns.iter().enumerate() {
            let size = info.layout.size();
            if size == 0 {
                continue;
            }
            // SAFETY: offsets index into the live buffer.
            let column_base = unsafe { base.add(self.offsets[column]) };
            // SAFETY: first != second, so the two element spans are
            // disjoint and both lie below len.
            unsafe {
                ptr::swap_nonoverlapping(
                    column_base.add(first * size),
                    column_base.add(second * size),
                    size,
                );
            }
        }
    }

    /// Removes row `index` by dropping it and moving the last row into
    /// the gap. Order is not preserved.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds.
    pub fn swap_remove(&mut self, index: usize) {
        assert!(index < self.len, "row index out of bounds");
        let last = self.len - 1;
        let base = self.data.as_ptr();
        for (column, info) in self.columns.iter().enumerate() {
            let Some(drop_fn) = info.drop_fn else { continue };
            // SAFETY: offsets index into the live buffer.
            let column_base = unsafe { base.add(self.offsets[column]) };
            // SAFETY: row `index` is live until this drop retires it.
            unsafe { drop_fn(column_base.add(index * info.layout.size())) };
        }
        // SAFETY: row `index` holds no live value after the drops above,
        // the copy from `last` revives it and vacates `last`.
        unsafe { self.move_row(last, index) };
        self.len = last;
    }

    /// Copies row `from` over row `to` in every column, without running
    /// drop glue. No-op when the indices are equal.
    ///
    /// # Safety
    ///
    /// `to` must not hold live values the table still owns, and the
    /// caller must treat `from` as vacated afterwards: the bytes left
    /// behind are a duplicate that must never be dropped or read as
    /// owned.
    pub unsafe fn move_row(&mut self, from: usize, to: usize) {
        debug_assert!(from < self.len && to < self.len, "row index out of bounds");
        if from == to {
            return;
        }
        let base = self.data.as_ptr();
        for (column, info) in self.columns.iter().enumerate() {
            let size = info.layout.size();
            if size == 0 {
                continue;
            }
            // SAFETY: offsets index into the live buffer.
            let column_base = unsafe { base.add(self.offsets[column]) };
            // SAFETY: from != to, so source and destination spans are
            // disjoint.
            unsafe {
                ptr::copy_nonoverlapping(
                    column_base.add(from * size),
                    column_base.add(to * size),
                    size,
                );
            }
        }
    }

    /// Sets the logical length without constructing or dropping rows.
    ///
    /// # Safety
    ///
    /// `new_len` must not exceed capacity, and every row below `new_len`
    /// must hold initialized values in every column. Rows at or above it
    /// are treated as vacant from here on.
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity, "length exceeds capacity");
        self.len = new_len;
    }

    /// Read pointer to the first element of a column.
    ///
    /// The pointer is valid for reading `len` elements of the column's
    /// type. On an unallocated table it is dangling and must not be
    /// dereferenced, though it stays well aligned.
    ///
    /// # Panics
    ///
    /// Panics when `column` is out of bounds.
    #[inline]
    #[must_use]
    pub fn column_ptr(&self, column: usize) -> *const u8 {
        self.data
            .as_ptr()
            .wrapping_add(self.offsets[column])
            .cast_const()
    }

    /// Write pointer to the first element of a column.
    ///
    /// Valid for `capacity` elements, though only the first `len` hold
    /// live values.
    ///
    /// # Panics
    ///
    /// Panics when `column` is out of bounds.
    #[inline]
    #[must_use]
    pub fn column_ptr_mut(&mut self, column: usize) -> *mut u8 {
        self.data.as_ptr().wrapping_add(self.offsets[column])
    }

    /// Read pointer to one live element.
    ///
    /// # Panics
    ///
    /// Panics when `column` is out of bounds. A row at or beyond the
    /// logical length is caught by a debug assertion.
    #[inline]
    #[must_use]
    pub fn element_ptr(&self, column: usize, row: usize) -> *const u8 {
        debug_assert!(row < self.len, "row index out of bounds");
        let size = self.columns[column].layout.size();
        self.column_ptr(column).wrapping_add(row * size)
    }

    /// Write pointer to one live element.
    ///
    /// # Panics
    ///
    /// Panics when `column` is out of bounds. A row at or beyond the
    /// logical length is caught by a debug assertion.
    #[inline]
    #[must_use]
    pub fn element_ptr_mut(&mut self, column: usize, row: usize) -> *mut u8 {
        debug_assert!(row < self.len, "row index out of bounds");
        let size = self.columns[column].layout.size();
        self.column_ptr_mut(column).wrapping_add(row * size)
    }

    /// Write pointer to a reserved slot, which may lie beyond the logical
    /// length. Used by push paths that construct in place before
    /// publishing the new length.
    ///
    /// # Panics
    ///
    /// Panics when `column` is out of bounds. A row at or beyond capacity
    /// is caught by a debug assertion.
    #[inline]
    #[must_use]
    pub fn slot_ptr_mut(&mut self, column: usize, row: usize) -> *mut u8 {
        debug_assert!(row < self.capacity, "slot index out of bounds");
        let size = self.columns[column].layout.size();
        self.column_ptr_mut(column).wrapping_add(row * size)
    }

    fn release_buffer(&mut self) {
        if self.buffer.size() == 0 {
            return;
        }
        // SAFETY: data and buffer describe the allocation made by this
        // allocator in set_capacity.
        unsafe { self.allocator.deallocate(self.data, self.buffer) };
    }
}

impl<A: RawAllocator> Drop for ColumnTable<A> {
    fn drop(&mut self) {
        self.clear();
        self.release_buffer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn table_of(columns: Vec<ColumnInfo>) -> ColumnTable {
        ColumnTable::new(columns)
    }

    unsafe fn read_u32(table: &ColumnTable, column: usize, row: usize) -> u32 {
        unsafe { *table.element_ptr(column, row).cast::<u32>() }
    }

    unsafe fn write_u32(table: &mut ColumnTable, column: usize, row: usize, value: u32) {
        unsafe { table.element_ptr_mut(column, row).cast::<u32>().write(value) };
    }

    #[test]
    fn test_column_info_describes_type() {
        let info = ColumnInfo::of::<u64>();
        assert_eq!(info.type_id(), TypeId::of::<u64>());
        assert_eq!(info.layout(), Layout::new::<u64>());
        assert!(info.type_name().contains("u64"));
    }

    #[test]
    fn test_columns_are_packed_and_aligned() {
        let mut table = table_of(vec![
            ColumnInfo::of::<u8>(),
            ColumnInfo::of::<u64>(),
            ColumnInfo::of::<u16>(),
        ]);
        table.set_capacity(10);

        let base = table.column_ptr(0) as usize;
        let second = table.column_ptr(1) as usize;
        let third = table.column_ptr(2) as usize;

        assert_eq!(base % MAX_COLUMN_ALIGN, 0);
        // 10 bytes of u8 rounded up to the next 16-byte boundary.
        assert_eq!(second - base, 16);
        // 80 bytes of u64 follow without extra padding.
        assert_eq!(third - second, 80);
    }

    #[test]
    fn test_growth_follows_three_halves_rule() {
        let mut table = table_of(vec![ColumnInfo::of::<u32>()]);

        table.ensure_capacity(1);
        assert_eq!(table.capacity(), 2);
        table.ensure_capacity(3);
        assert_eq!(table.capacity(), 5);
        table.ensure_capacity(4);
        assert_eq!(table.capacity(), 5);
        table.ensure_capacity(6);
        assert_eq!(table.capacity(), 9);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_set_capacity_below_len_is_ignored() {
        let mut table = table_of(vec![ColumnInfo::of::<u32>()]);
        table.resize(4);
        for row in 0..4 {
            unsafe { write_u32(&mut table, 0, row, row as u32 * 10) };
        }
        let before = table.capacity();

        table.set_capacity(2);
        assert_eq!(table.capacity(), before);

        // Shrinking to the exact length compacts without losing rows.
        table.set_capacity(4);
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.len(), 4);
        for row in 0..4 {
            assert_eq!(unsafe { read_u32(&table, 0, row) }, row as u32 * 10);
        }
    }

    #[test]
    fn test_migration_preserves_all_columns() {
        let mut table = table_of(vec![ColumnInfo::of::<u32>(), ColumnInfo::of::<u64>()]);
        table.resize(3);
        for row in 0..3 {
            unsafe {
                write_u32(&mut table, 0, row, 100 + row as u32);
                table
                    .element_ptr_mut(1, row)
                    .cast::<u64>()
                    .write(1_000_000_000_000 + row as u64);
            }
        }

        table.set_capacity(64);
        assert_eq!(table.capacity(), 64);
        for row in 0..3 {
            assert_eq!(unsafe { read_u32(&table, 0, row) }, 100 + row as u32);
            let wide = unsafe { *table.element_ptr(1, row).cast::<u64>() };
            assert_eq!(wide, 1_000_000_000_000 + row as u64);
        }
    }

    #[test]
    fn test_push_and_pop_track_len() {
        let mut table = table_of(vec![ColumnInfo::of::<u32>()]);
        table.push_default();
        table.push_default();
        assert_eq!(table.len(), 2);
        assert_eq!(unsafe { read_u32(&table, 0, 0) }, 0);
        assert_eq!(unsafe { read_u32(&table, 0, 1) }, 0);

        table.pop_back();
        assert_eq!(table.len(), 1);
        table.pop_back();
        table.pop_back();
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_swap_exchanges_rows() {
        let mut table = table_of(vec![ColumnInfo::of::<u32>()]);
        table.resize(3);
        for row in 0..3 {
            unsafe { write_u32(&mut table, 0, row, (row as u32 + 1) * 10) };
        }

        table.swap(0, 2);
        assert_eq!(unsafe { read_u32(&table, 0, 0) }, 30);
        assert_eq!(unsafe { read_u32(&table, 0, 1) }, 20);
        assert_eq!(unsafe { read_u32(&table, 0, 2) }, 10);

        table.swap(1, 1);
        assert_eq!(unsafe { read_u32(&table, 0, 1) }, 20);
    }

    #[test]
    fn test_swap_remove_moves_last_into_gap() {
        let mut table = table_of(vec![ColumnInfo::of::<u32>()]);
        table.resize(3);
        for row in 0..3 {
            unsafe { write_u32(&mut table, 0, row, (row as u32 + 1) * 10) };
        }

        table.swap_remove(0);
        assert_eq!(table.len(), 2);
        assert_eq!(unsafe { read_u32(&table, 0, 0) }, 30);
        assert_eq!(unsafe { read_u32(&table, 0, 1) }, 20);

        // Removing the last row needs no back-fill.
        table.swap_remove(1);
        assert_eq!(table.len(), 1);
        assert_eq!(unsafe { read_u32(&table, 0, 0) }, 30);
    }

    #[test]
    fn test_drop_glue_runs_once_per_removed_row() {
        static DROPS: AtomicUsize = AtomicUsize::new(0);

        struct Tracked(#[allow(dead_code)] u64);
        impl Default for Tracked {
            fn default() -> Self {
                Self(7)
            }
        }
        impl Drop for Tracked {
            fn drop(&mut self) {
                DROPS.fetch_add(1, Ordering::SeqCst);
            }
        }

        let mut table = table_of(vec![ColumnInfo::of::<Tracked>()]);
        table.resize(4);

        // Migration copies bytes, it never drops.
        table.set_capacity(32);
        assert_eq!(DROPS.load(Ordering::SeqCst), 0);

        table.resize(2);
        assert_eq!(DROPS.load(Ordering::SeqCst), 2);

        table.swap_remove(0);
        assert_eq!(DROPS.load(Ordering::SeqCst), 3);

        drop(table);
        assert_eq!(DROPS.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_zero_sized_columns_are_supported() {
        let mut table = table_of(vec![ColumnInfo::of::<()>(), ColumnInfo::of::<u32>()]);
        table.resize(10);
        assert_eq!(table.len(), 10);

        unsafe { write_u32(&mut table, 1, 9, 99) };
        table.swap(0, 9);
        assert_eq!(unsafe { read_u32(&table, 1, 0) }, 99);

        table.swap_remove(5);
        assert_eq!(table.len(), 9);
    }
}
