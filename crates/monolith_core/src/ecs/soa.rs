//! # Structure-of-Arrays Storage
//!
//! Compile-time-typed facade over the type-erased [`ColumnTable`]. A row
//! type is a tuple, each tuple position becomes one column, and the
//! [`Row`] trait bridges the tuple world and the byte world.
//!
//! ## Design Philosophy
//!
//! All type knowledge lives here, in traits implemented once per tuple
//! arity. The arena below stays monomorphization-free, while user code
//! gets slices, row views and iterators with no `unsafe` at the call
//! site. Column selection is by position, so a row may repeat an element
//! type and both columns stay addressable.

// SAFETY: this module vouches that every table wrapped here was built
// from its row type's own column layout.
#![allow(unsafe_code)]
// Column base pointers are aligned to the element type by construction,
// so widening casts from the byte view are sound.
#![allow(clippy::cast_ptr_alignment)]

use std::marker::PhantomData;
use std::slice;

use crate::ecs::columnar::{ColumnInfo, ColumnTable};
use crate::memory::{GlobalAllocator, RawAllocator};

// ============================================================================
// ROW TRAITS
// ============================================================================

/// A tuple stored one element per column.
///
/// Implemented for tuples up to arity six. The associated constants and
/// methods translate between the tuple and the erased table that holds
/// its elements column by column.
///
/// # Safety
///
/// `column_info` must describe exactly the columns the other methods
/// read and write, in the same order, and every method must touch only
/// the row it is given. All methods additionally require a table that
/// was built from `Self::column_info`.
pub unsafe trait Row: Sized + 'static {
    /// Number of columns this row spans.
    const COLUMN_COUNT: usize;

    /// Borrowed view of one row, one shared reference per column.
    type Ref<'a>;

    /// Column descriptors, one per tuple position, in order.
    fn column_info() -> Vec<ColumnInfo>;

    /// Writes `self` into row `row`, one element per column.
    ///
    /// # Safety
    ///
    /// `row` must be below capacity and the slot must be vacant, the
    /// caller publishes the new length afterwards.
    unsafe fn write<A: RawAllocator>(self, table: &mut ColumnTable<A>, row: usize);

    /// Moves row `row` out of the table.
    ///
    /// # Safety
    ///
    /// `row` must be below the logical length. The slot is vacated, the
    /// caller must retire it before anything else reads it as live.
    unsafe fn read<A: RawAllocator>(table: &mut ColumnTable<A>, row: usize) -> Self;

    /// Borrows row `row` as a tuple of shared references.
    ///
    /// # Safety
    ///
    /// `row` must be below the logical length.
    unsafe fn borrow_row<'a, A: RawAllocator>(table: &'a ColumnTable<A>, row: usize)
        -> Self::Ref<'a>;

    /// Presents every column to `visitor` as a typed mutable slice.
    ///
    /// # Safety
    ///
    /// The table must have been built from `Self::column_info`.
    unsafe fn visit_columns<A: RawAllocator, V: ColumnVisitor>(
        table: &mut ColumnTable<A>,
        visitor: &mut V,
    );
}

/// Rows whose elements can be cloned out without vacating the slot.
pub trait RowClone: Row {
    /// Clones row `row` out of the table, leaving it live.
    ///
    /// # Safety
    ///
    /// `row` must be below the logical length of a table built from
    /// [`Row::column_info`] for `Self`.
    unsafe fn clone_row<A: RawAllocator>(table: &ColumnTable<A>, row: usize) -> Self;
}

/// Maps a column position to its element type.
///
/// Selection is positional rather than type-driven, so rows with
/// repeated element types stay unambiguous.
pub trait ColumnAt<const I: usize>: Row {
    /// Element type stored in column `I`.
    type Element: Default + 'static;
}

/// Callback receiving every column of a storage as a typed slice.
pub trait ColumnVisitor {
    /// Called once per column, in column order.
    fn visit<T: Default + 'static>(&mut self, column_index: usize, elements: &mut [T]);
}

// ============================================================================
// TYPED STORAGE
// ============================================================================

/// Dense storage of `R` rows, one contiguous allocation for all columns.
///
/// Removal is swap-and-pop, so row order is not stable across
/// [`StructOfArrays::swap_remove`]. Column slices come back as plain
/// `&[T]` and `&mut [T]`, which keeps iteration auto-vectorizable.
///
/// # Performance
///
/// Pushing grows capacity by 1.5x, so N pushes cost O(log N)
/// reallocations. Column access is pointer math, no per-element
/// indirection.
#[derive(Debug)]
pub struct StructOfArrays<R: Row, A: RawAllocator = GlobalAllocator> {
    table: ColumnTable<A>,
    marker: PhantomData<R>,
}

impl<R: Row> StructOfArrays<R> {
    /// Creates empty storage backed by the global allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_allocator(GlobalAllocator)
    }
}

impl<R: Row> Default for StructOfArrays<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Row, A: RawAllocator> StructOfArrays<R, A> {
    /// Creates empty storage that allocates through `allocator`.
    #[must_use]
    pub fn with_allocator(allocator: A) -> Self {
        Self {
            table: ColumnTable::with_allocator(R::column_info(), allocator),
            marker: PhantomData,
        }
    }

    /// Number of live rows.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` when no rows are live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of rows the current buffer can hold.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Number of columns, fixed by the row type.
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    /// Resizes the buffer to exactly `new_capacity` rows, migrating live
    /// rows. Requests below the current length are ignored.
    pub fn set_capacity(&mut self, new_capacity: usize) {
        self.table.set_capacity(new_capacity);
    }

    /// Grows capacity to at least `needed` rows.
    pub fn ensure_capacity(&mut self, needed: usize) {
        self.table.ensure_capacity(needed);
    }

    /// Grows capacity to hold `additional` more rows beyond the current
    /// length.
    pub fn reserve(&mut self, additional: usize) {
        self.table.ensure_capacity(self.table.len() + additional);
    }

    /// Appends one row, growing the buffer when needed.
    pub fn push(&mut self, value: R) {
        let next = self.table.len();
        self.table.ensure_capacity(next + 1);
        // SAFETY: capacity covers the new row, write fills every column
        // before the length is published.
        unsafe {
            value.write(&mut self.table, next);
            self.table.set_len(next + 1);
        }
    }

    /// Appends one row without the capacity check.
    ///
    /// # Safety
    ///
    /// The caller must have reserved capacity beyond the current length,
    /// for example via [`StructOfArrays::reserve`].
    pub unsafe fn push_unchecked(&mut self, value: R) {
        let next = self.table.len();
        debug_assert!(next < self.table.capacity(), "push beyond reserved capacity");
        // SAFETY: the caller reserved the slot, write fills every column
        // before the length is published.
        unsafe {
            value.write(&mut self.table, next);
            self.table.set_len(next + 1);
        }
    }

    /// Appends one default-constructed row.
    pub fn push_default(&mut self) {
        self.table.push_default();
    }

    /// Removes and returns the last row, or `None` when empty.
    pub fn pop(&mut self) -> Option<R> {
        let last = self.table.len().checked_sub(1)?;
        // SAFETY: row `last` is live, the read vacates it and the length
        // retreats past it before anyone can observe the slot.
        unsafe {
            let value = R::read(&mut self.table, last);
            self.table.set_len(last);
            Some(value)
        }
    }

    /// Removes row `index` by moving the last row into the gap, returning
    /// the removed row. Order is not preserved.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds.
    pub fn swap_remove(&mut self, index: usize) -> R {
        let len = self.table.len();
        assert!(index < len, "row index out of bounds");
        let last = len - 1;
        // SAFETY: the read vacates `index`, move_row refills the gap from
        // `last`, and the length then retreats past the duplicate.
        unsafe {
            let removed = R::read(&mut self.table, index);
            self.table.move_row(last, index);
            self.table.set_len(last);
            removed
        }
    }

    /// Exchanges two rows across every column.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of bounds.
    pub fn swap(&mut self, first: usize, second: usize) {
        self.table.swap(first, second);
    }

    /// Drops every row. Capacity is retained.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Sets the logical length, default-constructing appended rows and
    /// dropping truncated ones.
    pub fn resize(&mut self, new_len: usize) {
        self.table.resize(new_len);
    }

    /// Shared slice over column `I`.
    #[must_use]
    pub fn column<const I: usize>(&self) -> &[<R as ColumnAt<I>>::Element]
    where
        R: ColumnAt<I>,
    {
        let len = self.table.len();
        let ptr = self.table.column_ptr(I).cast::<<R as ColumnAt<I>>::Element>();
        // SAFETY: column I holds len initialized elements of this type,
        // and the base pointer is aligned even when unallocated.
        unsafe { slice::from_raw_parts(ptr, len) }
    }

    /// Mutable slice over column `I`.
    #[must_use]
    pub fn column_mut<const I: usize>(&mut self) -> &mut [<R as ColumnAt<I>>::Element]
    where
        R: ColumnAt<I>,
    {
        let len = self.table.len();
        let ptr = self
            .table
            .column_ptr_mut(I)
            .cast::<<R as ColumnAt<I>>::Element>();
        // SAFETY: column I holds len initialized elements of this type,
        // the exclusive borrow of self covers the slice.
        unsafe { slice::from_raw_parts_mut(ptr, len) }
    }

    /// Mutable slice over column `I` alongside a shared slice over column
    /// `J`, for kernels that read one column while writing another.
    ///
    /// # Panics
    ///
    /// Panics when `I` and `J` name the same column.
    #[must_use]
    pub fn column_pair_mut<const I: usize, const J: usize>(
        &mut self,
    ) -> (&mut [<R as ColumnAt<I>>::Element], &[<R as ColumnAt<J>>::Element])
    where
        R: ColumnAt<I> + ColumnAt<J>,
    {
        assert!(I != J, "column indices must differ");
        let len = self.table.len();
        let first = self
            .table
            .column_ptr_mut(I)
            .cast::<<R as ColumnAt<I>>::Element>();
        let second = self.table.column_ptr(J).cast::<<R as ColumnAt<J>>::Element>();
        // SAFETY: distinct columns occupy disjoint byte ranges, both hold
        // len initialized elements, and the exclusive borrow covers both.
        unsafe {
            (
                slice::from_raw_parts_mut(first, len),
                slice::from_raw_parts(second, len),
            )
        }
    }

    /// Shared reference to one element.
    ///
    /// # Panics
    ///
    /// Panics when `row` is at or beyond the logical length.
    #[must_use]
    pub fn element<const I: usize>(&self, row: usize) -> &<R as ColumnAt<I>>::Element
    where
        R: ColumnAt<I>,
    {
        &self.column::<I>()[row]
    }

    /// Mutable reference to one element.
    ///
    /// # Panics
    ///
    /// Panics when `row` is at or beyond the logical length.
    #[must_use]
    pub fn element_mut<const I: usize>(&mut self, row: usize) -> &mut <R as ColumnAt<I>>::Element
    where
        R: ColumnAt<I>,
    {
        &mut self.column_mut::<I>()[row]
    }

    /// Shared reference to the last element of column `I`.
    ///
    /// # Panics
    ///
    /// Panics when the storage is empty.
    #[must_use]
    pub fn back<const I: usize>(&self) -> &<R as ColumnAt<I>>::Element
    where
        R: ColumnAt<I>,
    {
        assert!(!self.is_empty(), "back on empty storage");
        self.element::<I>(self.len() - 1)
    }

    /// Mutable reference to the last element of column `I`.
    ///
    /// # Panics
    ///
    /// Panics when the storage is empty.
    #[must_use]
    pub fn back_mut<const I: usize>(&mut self) -> &mut <R as ColumnAt<I>>::Element
    where
        R: ColumnAt<I>,
    {
        assert!(!self.is_empty(), "back on empty storage");
        self.element_mut::<I>(self.len() - 1)
    }

    /// Clones one row out of the storage.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds.
    #[must_use]
    pub fn row(&self, index: usize) -> R
    where
        R: RowClone,
    {
        assert!(index < self.table.len(), "row index out of bounds");
        // SAFETY: the row is live and clone_row only reads through shared
        // references.
        unsafe { R::clone_row(&self.table, index) }
    }

    /// Borrowed view of one row, one shared reference per column.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds.
    #[must_use]
    pub fn row_ref(&self, index: usize) -> R::Ref<'_> {
        assert!(index < self.table.len(), "row index out of bounds");
        // SAFETY: the row is live for the duration of the borrow.
        unsafe { R::borrow_row(&self.table, index) }
    }

    /// Iterates row views in storage order.
    #[must_use]
    pub fn iter(&self) -> RowIter<'_, R, A> {
        RowIter {
            storage: self,
            row: 0,
        }
    }

    /// Presents every column to `visitor` as a typed mutable slice.
    pub fn visit_columns<V: ColumnVisitor>(&mut self, visitor: &mut V) {
        // SAFETY: the table was built from R::column_info, layouts match.
        unsafe { R::visit_columns(&mut self.table, visitor) };
    }
}

// SAFETY: the storage owns plain values of R's element types, so thread
// transfer is safe exactly when the row and allocator allow it.
unsafe impl<R: Row + Send, A: RawAllocator + Send> Send for StructOfArrays<R, A> {}
// SAFETY: shared access hands out only shared references to R's elements.
unsafe impl<R: Row + Sync, A: RawAllocator + Sync> Sync for StructOfArrays<R, A> {}

/// Iterator over borrowed row views.
#[derive(Debug)]
pub struct RowIter<'a, R: Row, A: RawAllocator = GlobalAllocator> {
    storage: &'a StructOfArrays<R, A>,
    row: usize,
}

impl<'a, R: Row, A: RawAllocator> Iterator for RowIter<'a, R, A> {
    type Item = R::Ref<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let storage: &'a StructOfArrays<R, A> = self.storage;
        if self.row >= storage.len() {
            return None;
        }
        let current = self.row;
        self.row += 1;
        // SAFETY: current is below the logical length, the row stays live
        // for 'a.
        Some(unsafe { R::borrow_row(&storage.table, current) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.storage.len() - self.row;
        (remaining, Some(remaining))
    }
}

impl<R: Row, A: RawAllocator> ExactSizeIterator for RowIter<'_, R, A> {}

impl<'a, R: Row, A: RawAllocator> IntoIterator for &'a StructOfArrays<R, A> {
    type Item = R::Ref<'a>;
    type IntoIter = RowIter<'a, R, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// TUPLE IMPLEMENTATIONS
// ============================================================================

macro_rules! impl_row {
    ($( ($($field:ident : $T:ident [$idx:tt]),+) );+ $(;)?) => {$(
        // SAFETY: column_info lists one descriptor per tuple position in
        // order, and every method below addresses exactly those columns.
        unsafe impl<$($T: Default + 'static),+> Row for ($($T,)+) {
            const COLUMN_COUNT: usize = [$(stringify!($T)),+].len();

            type Ref<'a> = ($(&'a $T,)+);

            fn column_info() -> Vec<ColumnInfo> {
                vec![$(ColumnInfo::of::<$T>()),+]
            }

            unsafe fn write<AL: RawAllocator>(self, table: &mut ColumnTable<AL>, row: usize) {
                let ($($field,)+) = self;
                // SAFETY: the caller guarantees the slot is reserved and
                // vacant in every column.
                unsafe {
                    $( table.slot_ptr_mut($idx, row).cast::<$T>().write($field); )+
                }
            }

            unsafe fn read<AL: RawAllocator>(table: &mut ColumnTable<AL>, row: usize) -> Self {
                // SAFETY: the caller guarantees the row is live and takes
                // ownership of the values read out.
                unsafe { ($( table.element_ptr($idx, row).cast::<$T>().read(), )+) }
            }

            unsafe fn borrow_row<'a, AL: RawAllocator>(
                table: &'a ColumnTable<AL>,
                row: usize,
            ) -> Self::Ref<'a> {
                // SAFETY: the caller guarantees the row is live for 'a.
                unsafe { ($( &*table.element_ptr($idx, row).cast::<$T>(), )+) }
            }

            unsafe fn visit_columns<AL: RawAllocator, V: ColumnVisitor>(
                table: &mut ColumnTable<AL>,
                visitor: &mut V,
            ) {
                let len = table.len();
                $(
                    // SAFETY: each column holds len initialized elements,
                    // and the visitor releases one slice before the next
                    // is formed.
                    visitor.visit::<$T>($idx, unsafe {
                        slice::from_raw_parts_mut(table.column_ptr_mut($idx).cast::<$T>(), len)
                    });
                )+
            }
        }

        impl<$($T: Clone + Default + 'static),+> RowClone for ($($T,)+) {
            unsafe fn clone_row<AL: RawAllocator>(table: &ColumnTable<AL>, row: usize) -> Self {
                // SAFETY: the caller guarantees the row is live, cloning
                // reads through shared references only.
                unsafe { ($( (*table.element_ptr($idx, row).cast::<$T>()).clone(), )+) }
            }
        }
    )+};
}

impl_row! {
    (a: T0 [0]);
    (a: T0 [0], b: T1 [1]);
    (a: T0 [0], b: T1 [1], c: T2 [2]);
    (a: T0 [0], b: T1 [1], c: T2 [2], d: T3 [3]);
    (a: T0 [0], b: T1 [1], c: T2 [2], d: T3 [3], e: T4 [4]);
    (a: T0 [0], b: T1 [1], c: T2 [2], d: T3 [3], e: T4 [4], f: T5 [5])
}

macro_rules! impl_column_at {
    ($( ($($T:ident),+) [$idx:tt] => $El:ident );+ $(;)?) => {$(
        impl<$($T: Default + 'static),+> ColumnAt<$idx> for ($($T,)+) {
            type Element = $El;
        }
    )+};
}

impl_column_at! {
    (T0) [0] => T0;
    (T0, T1) [0] => T0;
    (T0, T1) [1] => T1;
    (T0, T1, T2) [0] => T0;
    (T0, T1, T2) [1] => T1;
    (T0, T1, T2) [2] => T2;
    (T0, T1, T2, T3) [0] => T0;
    (T0, T1, T2, T3) [1] => T1;
    (T0, T1, T2, T3) [2] => T2;
    (T0, T1, T2, T3) [3] => T3;
    (T0, T1, T2, T3, T4) [0] => T0;
    (T0, T1, T2, T3, T4) [1] => T1;
    (T0, T1, T2, T3, T4) [2] => T2;
    (T0, T1, T2, T3, T4) [3] => T3;
    (T0, T1, T2, T3, T4) [4] => T4;
    (T0, T1, T2, T3, T4, T5) [0] => T0;
    (T0, T1, T2, T3, T4, T5) [1] => T1;
    (T0, T1, T2, T3, T4, T5) [2] => T2;
    (T0, T1, T2, T3, T4, T5) [3] => T3;
    (T0, T1, T2, T3, T4, T5) [4] => T4;
    (T0, T1, T2, T3, T4, T5) [5] => T5
}
