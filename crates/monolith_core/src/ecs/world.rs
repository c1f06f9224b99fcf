//! # World Organization
//!
//! Groups entities into named sections while one shared
//! [`EntityAllocator`] issues every identity. Component managers live
//! outside the world and key purely off [`Entity`], so sections stay
//! bookkeeping, not ownership boundaries.

use crate::ecs::entity::{Entity, EntityAllocator};

/// Handle naming one section of a [`World`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SectionId(u32);

impl SectionId {
    /// Position of the section inside its world.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Named group of entities.
#[derive(Debug)]
pub struct Section {
    name: String,
    entities: Vec<Entity>,
}

impl Section {
    /// Section name given at creation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entities currently tracked by this section.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of tracked entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` when the section tracks no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// A set of sections sharing one entity id space.
#[derive(Debug, Default)]
pub struct World {
    allocator: EntityAllocator,
    sections: Vec<Section>,
}

impl World {
    /// Creates a world with no sections and no live entities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The allocator issuing every identity in this world.
    #[must_use]
    pub fn allocator(&self) -> &EntityAllocator {
        &self.allocator
    }

    /// Adds an empty section and returns its handle.
    #[allow(clippy::cast_possible_truncation)]
    pub fn create_section(&mut self, name: impl Into<String>) -> SectionId {
        let id = SectionId(self.sections.len() as u32);
        self.sections.push(Section {
            name: name.into(),
            entities: Vec::new(),
        });
        id
    }

    /// Number of sections.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Borrows one section.
    ///
    /// # Panics
    ///
    /// Panics when `id` names no section of this world.
    #[must_use]
    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.index()]
    }

    /// Spawns an entity into the given section.
    ///
    /// # Panics
    ///
    /// Panics when `id` names no section of this world.
    pub fn create_entity(&mut self, id: SectionId) -> Entity {
        let entity = self.allocator.create();
        self.sections[id.index()].entities.push(entity);
        entity
    }

    /// Destroys an entity tracked by the given section.
    ///
    /// Returns `false` without side effects when the section does not
    /// track `entity` or the handle is no longer live.
    pub fn destroy_entity(&mut self, id: SectionId, entity: Entity) -> bool {
        let Some(section) = self.sections.get_mut(id.index()) else {
            return false;
        };
        let Some(position) = section
            .entities
            .iter()
            .position(|&candidate| candidate == entity)
        else {
            return false;
        };
        if !self.allocator.destroy(entity) {
            return false;
        }
        section.entities.swap_remove(position);
        true
    }
}
