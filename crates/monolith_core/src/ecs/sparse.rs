//! # Sparse Entity Index
//!
//! Maps sparse [`Entity`] handles onto dense physical rows. Row zero of
//! every component store is a reserved sentinel, which lets the raw value
//! `0` double as "no instance": lookups for unmapped entities return
//! [`Instance::NULL`] instead of an `Option`, mirroring the null-entity
//! convention.

use std::collections::HashMap;

use crate::ecs::entity::Entity;

// ============================================================================
// INSTANCE HANDLE
// ============================================================================

/// Dense handle naming one physical row inside a component store.
///
/// The wrapped value IS the row index. Zero names the reserved sentinel
/// row and means "entity has no instance here".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Instance(u32);

impl Instance {
    /// The null instance, aliasing the sentinel row.
    pub const NULL: Self = Self(0);

    /// Rebuilds an instance from a raw row index.
    #[inline]
    #[must_use]
    pub const fn from_raw(row: u32) -> Self {
        Self(row)
    }

    /// Returns the raw row index.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the physical row this instance occupies.
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` for any instance other than [`Instance::NULL`].
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

// ============================================================================
// INDEX
// ============================================================================

/// Entity-to-row lookup table for one component store.
///
/// The store owns keeping this consistent under swap-removal; the index
/// itself is a thin map with sentinel-returning lookups.
#[derive(Debug, Default)]
pub struct SparseIndex {
    rows: HashMap<Entity, Instance>,
}

impl SparseIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the instance mapped to `entity`.
    ///
    /// Returns [`Instance::NULL`] when the entity has no mapping.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: Entity) -> Instance {
        self.rows.get(&entity).copied().unwrap_or(Instance::NULL)
    }

    /// Returns `true` if `entity` has a mapping.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.rows.contains_key(&entity)
    }

    /// Maps `entity` to `instance`, returning the previous mapping if any.
    pub fn insert(&mut self, entity: Entity, instance: Instance) -> Option<Instance> {
        debug_assert!(instance.is_valid(), "cannot map an entity to the sentinel row");
        self.rows.insert(entity, instance)
    }

    /// Removes the mapping for `entity`, returning it if one existed.
    pub fn remove(&mut self, entity: Entity) -> Option<Instance> {
        self.rows.remove(&entity)
    }

    /// Number of mapped entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no entity is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_instance_is_null() {
        assert_eq!(Instance::default(), Instance::NULL);
        assert!(!Instance::NULL.is_valid());
        assert_eq!(Instance::NULL.row(), 0);
    }

    #[test]
    fn test_unmapped_entity_returns_null() {
        let index = SparseIndex::new();
        let lookup = index.get(Entity::from_raw(7));
        assert_eq!(lookup, Instance::NULL);
        assert!(!index.contains(Entity::from_raw(7)));
    }

    #[test]
    fn test_insert_then_get_round_trips() {
        let mut index = SparseIndex::new();
        let entity = Entity::from_raw(3);

        assert_eq!(index.insert(entity, Instance::from_raw(5)), None);
        assert_eq!(index.get(entity).row(), 5);
        assert!(index.contains(entity));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_insert_overwrites_and_reports_previous_row() {
        let mut index = SparseIndex::new();
        let entity = Entity::from_raw(3);

        index.insert(entity, Instance::from_raw(5));
        let previous = index.insert(entity, Instance::from_raw(2));
        assert_eq!(previous, Some(Instance::from_raw(5)));
        assert_eq!(index.get(entity).row(), 2);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove_clears_mapping() {
        let mut index = SparseIndex::new();
        let entity = Entity::from_raw(9);

        index.insert(entity, Instance::from_raw(1));
        assert_eq!(index.remove(entity), Some(Instance::from_raw(1)));
        assert_eq!(index.remove(entity), None);
        assert_eq!(index.get(entity), Instance::NULL);
        assert!(index.is_empty());
    }
}
