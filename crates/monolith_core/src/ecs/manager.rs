//! # Component Manager
//!
//! Associates entities with dense component rows. Each manager owns one
//! [`StructOfArrays`] whose row is the user's component tuple plus a
//! hidden owner column, and a [`SparseIndex`] resolving entities to rows.
//!
//! ## Design Philosophy
//!
//! Row zero of every manager is a reserved sentinel. Lookups that miss
//! return [`Instance::NULL`], and release-mode access through a null
//! instance lands harmlessly in the sentinel row instead of touching
//! live data. Removal is swap-and-pop with the index patched in the same
//! step, so the dense array never grows holes.

use std::fmt;

use crate::ecs::entity::Entity;
use crate::ecs::soa::{ColumnAt, Row, StructOfArrays};
use crate::ecs::sparse::{Instance, SparseIndex};
use crate::memory::{GlobalAllocator, RawAllocator};

// ============================================================================
// ELEMENT TUPLES
// ============================================================================

/// Component tuple storable in a [`ComponentManager`].
///
/// Implemented for tuples up to arity five. The stored row appends one
/// owner column after the user's columns, which is what lets removal
/// find the entity whose row it relocates.
pub trait Elements: Sized + 'static {
    /// Physical row type: the component columns, then the owner column.
    type Stored: Row;

    /// Column index of the owner entity inside [`Elements::Stored`].
    const ENTITY_COLUMN: usize;

    /// Reads the owner of `row`.
    fn entity_at<A: RawAllocator>(data: &StructOfArrays<Self::Stored, A>, row: usize) -> Entity;

    /// Writes the owner of `row`.
    fn set_entity_at<A: RawAllocator>(
        data: &mut StructOfArrays<Self::Stored, A>,
        row: usize,
        entity: Entity,
    );
}

macro_rules! impl_elements {
    ($( ($($T:ident),+) [$entity_col:tt] );+ $(;)?) => {$(
        impl<$($T: Default + 'static),+> Elements for ($($T,)+) {
            type Stored = ($($T,)+ Entity);

            const ENTITY_COLUMN: usize = $entity_col;

            fn entity_at<AL: RawAllocator>(
                data: &StructOfArrays<Self::Stored, AL>,
                row: usize,
            ) -> Entity {
                *data.element::<$entity_col>(row)
            }

            fn set_entity_at<AL: RawAllocator>(
                data: &mut StructOfArrays<Self::Stored, AL>,
                row: usize,
                entity: Entity,
            ) {
                *data.element_mut::<$entity_col>(row) = entity;
            }
        }
    )+};
}

impl_elements! {
    (T0) [1];
    (T0, T1) [2];
    (T0, T1, T2) [3];
    (T0, T1, T2, T3) [4];
    (T0, T1, T2, T3, T4) [5]
}

// ============================================================================
// MANAGER
// ============================================================================

/// Dense storage of one component tuple per entity.
///
/// Attach is idempotent, detach compacts by moving the last row into the
/// vacated slot, and every lookup that misses reports the null sentinel
/// rather than failing.
pub struct ComponentManager<R: Elements, A: RawAllocator = GlobalAllocator> {
    data: StructOfArrays<R::Stored, A>,
    index: SparseIndex,
}

impl<R: Elements> ComponentManager<R> {
    /// Creates an empty manager backed by the global allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_allocator(GlobalAllocator)
    }
}

impl<R: Elements> Default for ComponentManager<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Elements, A: RawAllocator> ComponentManager<R, A> {
    /// Creates an empty manager that allocates through `allocator`.
    #[must_use]
    pub fn with_allocator(allocator: A) -> Self {
        let mut data = StructOfArrays::with_allocator(allocator);
        // Row zero is the reserved sentinel every null lookup lands on.
        data.push_default();
        Self {
            data,
            index: SparseIndex::new(),
        }
    }

    /// Number of entities holding this component.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.data.len() - 1
    }

    /// Returns `true` when no entity holds this component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.component_count() == 0
    }

    /// Grows the backing buffer for `additional` more components.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Attaches the component to `entity`, default-constructed.
    ///
    /// Attaching twice is a no-op that returns the existing instance, so
    /// callers never hold two rows for one entity.
    ///
    /// # Panics
    ///
    /// The null entity is caught by a debug assertion.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_component(&mut self, entity: Entity) -> Instance {
        debug_assert!(!entity.is_null(), "cannot attach components to the null entity");
        let existing = self.index.get(entity);
        if existing.is_valid() {
            return existing;
        }

        let row = self.data.len();
        self.data.push_default();
        R::set_entity_at(&mut self.data, row, entity);

        let instance = Instance::from_raw(row as u32);
        self.index.insert(entity, instance);
        instance
    }

    /// Detaches the component from `entity`.
    ///
    /// The last row moves into the vacated slot and the moved entity's
    /// mapping is patched. Returns the instance that named the old last
    /// row, which is no longer valid, so callers holding instances can
    /// repair them. Returns [`Instance::NULL`] when `entity` holds no
    /// component.
    #[allow(clippy::cast_possible_truncation)]
    pub fn remove_component(&mut self, entity: Entity) -> Instance {
        let instance = self.index.get(entity);
        if !instance.is_valid() {
            return Instance::NULL;
        }

        let row = instance.row();
        let last = self.data.len() - 1;
        let moved = R::entity_at(&self.data, last);

        self.data.swap_remove(row);

        // Remap before unmapping: when the removed row is the last row,
        // the moved entity is the removed entity and the removal must
        // win.
        self.index.insert(moved, Instance::from_raw(row as u32));
        self.index.remove(entity);

        Instance::from_raw(last as u32)
    }

    /// Instance held by `entity`, or [`Instance::NULL`] when it holds
    /// none.
    #[must_use]
    pub fn instance(&self, entity: Entity) -> Instance {
        self.index.get(entity)
    }

    /// Returns `true` when `entity` holds this component.
    #[must_use]
    pub fn has_component(&self, entity: Entity) -> bool {
        self.index.get(entity).is_valid()
    }

    /// Owner of `instance`.
    ///
    /// # Panics
    ///
    /// The null instance is caught by a debug assertion. In release
    /// builds it reports the sentinel row's owner, the null entity.
    #[must_use]
    pub fn entity_of(&self, instance: Instance) -> Entity {
        debug_assert!(instance.is_valid(), "the null instance has no owner");
        R::entity_at(&self.data, instance.row())
    }

    /// Shared reference to one element of `instance`.
    ///
    /// # Panics
    ///
    /// The null instance is caught by a debug assertion. In release
    /// builds the read lands in the sentinel row.
    #[must_use]
    pub fn element<const I: usize>(&self, instance: Instance) -> &<R::Stored as ColumnAt<I>>::Element
    where
        R::Stored: ColumnAt<I>,
    {
        debug_assert!(instance.is_valid(), "reading through the null instance");
        self.data.element::<I>(instance.row())
    }

    /// Mutable reference to one element of `instance`.
    ///
    /// # Panics
    ///
    /// The null instance is caught by a debug assertion. In release
    /// builds the write lands in the sentinel row.
    #[must_use]
    pub fn element_mut<const I: usize>(
        &mut self,
        instance: Instance,
    ) -> &mut <R::Stored as ColumnAt<I>>::Element
    where
        R::Stored: ColumnAt<I>,
    {
        debug_assert!(instance.is_valid(), "writing through the null instance");
        self.data.element_mut::<I>(instance.row())
    }

    /// Proxy for reading and writing one field of `instance`.
    pub fn field<const I: usize>(&mut self, instance: Instance) -> Field<'_, R, A, I>
    where
        R::Stored: ColumnAt<I>,
    {
        Field {
            manager: self,
            instance,
        }
    }

    /// Iterates every live instance in row order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn instances(&self) -> impl Iterator<Item = Instance> {
        (1..self.data.len() as u32).map(Instance::from_raw)
    }
}

impl<R: Elements, A: RawAllocator> fmt::Debug for ComponentManager<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentManager")
            .field("components", &self.component_count())
            .field("capacity", &self.data.capacity())
            .finish()
    }
}

// ============================================================================
// FIELD PROXY
// ============================================================================

/// Borrowed handle to one field of one instance.
///
/// Wraps the manager borrow and the instance so call sites read as
/// `manager.field::<0>(instance).set(value)`.
pub struct Field<'m, R, A, const I: usize>
where
    R: Elements,
    A: RawAllocator,
    R::Stored: ColumnAt<I>,
{
    manager: &'m mut ComponentManager<R, A>,
    instance: Instance,
}

impl<R, A, const I: usize> Field<'_, R, A, I>
where
    R: Elements,
    A: RawAllocator,
    R::Stored: ColumnAt<I>,
{
    /// Reads the field.
    #[must_use]
    pub fn get(&self) -> &<R::Stored as ColumnAt<I>>::Element {
        self.manager.element::<I>(self.instance)
    }

    /// Overwrites the field.
    pub fn set(&mut self, value: <R::Stored as ColumnAt<I>>::Element) {
        *self.manager.element_mut::<I>(self.instance) = value;
    }

    /// Applies `apply` to the field in place.
    pub fn update(&mut self, apply: impl FnOnce(&mut <R::Stored as ColumnAt<I>>::Element)) {
        apply(self.manager.element_mut::<I>(self.instance));
    }
}
