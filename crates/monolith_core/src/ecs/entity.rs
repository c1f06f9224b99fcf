//! # Entity Identity
//!
//! Entities are opaque 32-bit handles. Identity zero is reserved as the
//! null sentinel, so the first entity ever issued is `1` and a
//! default-constructed handle is never mistaken for a live one.
//!
//! ## Design Philosophy
//!
//! Identifiers are recycled first-in-first-out: a destroyed id goes to the
//! back of the free queue and is reissued only after every id freed before
//! it. This keeps recently destroyed ids out of circulation for as long as
//! possible, which makes stale-handle bugs loud instead of silent.

use std::collections::VecDeque;

use parking_lot::Mutex;

// ============================================================================
// ENTITY HANDLE
// ============================================================================

/// Opaque handle naming one entity.
///
/// The wrapped integer carries no meaning beyond identity. Handles are
/// `Copy` and cheap to pass around; liveness questions go to the
/// [`EntityAllocator`] that issued them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// The reserved null handle. Never issued by an allocator.
    pub const NULL: Self = Self(0);

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns `true` if this is the null handle.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Rebuilds a handle from a raw identifier.
    ///
    /// Intended for tests and serialization boundaries. A handle built
    /// from an id the allocator never issued is not live.
    #[inline]
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }
}

// ============================================================================
// ALLOCATOR
// ============================================================================

/// Book-keeping behind the mutex. `alive.len()` always equals `next_id`,
/// so `alive[id]` is in bounds for every id ever issued.
#[derive(Debug)]
struct AllocatorState {
    free: VecDeque<u32>,
    alive: Vec<bool>,
    next_id: u32,
    live: usize,
}

impl AllocatorState {
    fn create_one(&mut self) -> Entity {
        let id = if let Some(recycled) = self.free.pop_front() {
            self.alive[recycled as usize] = true;
            recycled
        } else {
            let fresh = self.next_id;
            self.next_id += 1;
            self.alive.push(true);
            fresh
        };
        self.live += 1;
        Entity(id)
    }

    fn destroy_one(&mut self, entity: Entity) -> bool {
        let slot = entity.id() as usize;
        if entity.is_null() || slot >= self.alive.len() || !self.alive[slot] {
            return false;
        }
        self.alive[slot] = false;
        self.free.push_back(entity.id());
        self.live -= 1;
        true
    }
}

/// Issues and recycles [`Entity`] handles.
///
/// Internally synchronized: systems on different threads may create and
/// destroy entities through a shared reference. Identifiers start at `1`
/// and destroyed ids are reissued in the order they were freed.
#[derive(Debug)]
pub struct EntityAllocator {
    state: Mutex<AllocatorState>,
}

impl EntityAllocator {
    /// Creates an allocator with no live entities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(AllocatorState {
                free: VecDeque::new(),
                // Slot 0 backs the null handle and is permanently dead.
                alive: vec![false],
                next_id: 1,
                live: 0,
            }),
        }
    }

    /// Issues one entity.
    ///
    /// Reuses the oldest freed id when one exists, otherwise mints the
    /// next sequential id.
    #[must_use]
    pub fn create(&self) -> Entity {
        self.state.lock().create_one()
    }

    /// Fills `out` with freshly issued entities.
    ///
    /// One lock acquisition for the whole batch.
    pub fn create_many(&self, out: &mut [Entity]) {
        let mut state = self.state.lock();
        for slot in out {
            *slot = state.create_one();
        }
    }

    /// Destroys `entity`, returning its id to the back of the free queue.
    ///
    /// Returns `false` without side effects when the handle is null, was
    /// never issued, or has already been destroyed.
    pub fn destroy(&self, entity: Entity) -> bool {
        self.state.lock().destroy_one(entity)
    }

    /// Destroys every handle in `entities`, returning how many were live.
    pub fn destroy_many(&self, entities: &[Entity]) -> usize {
        let mut state = self.state.lock();
        entities
            .iter()
            .copied()
            .filter(|&entity| state.destroy_one(entity))
            .count()
    }

    /// Returns `true` if `entity` has been issued and not yet destroyed.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        let state = self.state.lock();
        let slot = entity.id() as usize;
        slot < state.alive.len() && state.alive[slot]
    }

    /// Number of currently live entities.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.state.lock().live
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_start_at_one_and_ascend() {
        let allocator = EntityAllocator::new();
        assert_eq!(allocator.create().id(), 1);
        assert_eq!(allocator.create().id(), 2);
        assert_eq!(allocator.create().id(), 3);
    }

    #[test]
    fn test_null_is_never_issued() {
        let allocator = EntityAllocator::new();
        for _ in 0..64 {
            assert!(!allocator.create().is_null());
        }
    }

    #[test]
    fn test_destroyed_ids_recycle_fifo() {
        let allocator = EntityAllocator::new();
        let a = allocator.create();
        let b = allocator.create();
        let c = allocator.create();

        assert!(allocator.destroy(b));
        assert!(allocator.destroy(a));
        assert!(allocator.destroy(c));

        // Reissue order follows destruction order: b first, then a, then c.
        assert_eq!(allocator.create(), b);
        assert_eq!(allocator.create(), a);
        assert_eq!(allocator.create(), c);
        assert_eq!(allocator.create().id(), 4);
    }

    #[test]
    fn test_interleaved_create_and_destroy() {
        let allocator = EntityAllocator::new();
        let first = allocator.create();
        let second = allocator.create();
        assert!(allocator.destroy(second));

        assert_eq!(allocator.create(), second);
        assert_eq!(allocator.create().id(), 3);
        assert!(allocator.is_alive(first));
    }

    #[test]
    fn test_double_destroy_is_rejected() {
        let allocator = EntityAllocator::new();
        let entity = allocator.create();

        assert!(allocator.destroy(entity));
        assert!(!allocator.destroy(entity));
        assert_eq!(allocator.live_count(), 0);
    }

    #[test]
    fn test_destroying_unissued_handles_is_rejected() {
        let allocator = EntityAllocator::new();
        assert!(!allocator.destroy(Entity::NULL));
        assert!(!allocator.destroy(Entity::from_raw(99)));
        assert_eq!(allocator.live_count(), 0);
    }

    #[test]
    fn test_live_count_tracks_population() {
        let allocator = EntityAllocator::new();
        let mut batch = [Entity::NULL; 10];
        allocator.create_many(&mut batch);

        assert_eq!(allocator.live_count(), 10);
        assert!(batch.iter().all(|&entity| allocator.is_alive(entity)));

        assert_eq!(allocator.destroy_many(&batch[..4]), 4);
        assert_eq!(allocator.live_count(), 6);
        assert!(!allocator.is_alive(batch[0]));
        assert!(allocator.is_alive(batch[4]));

        // The already-dead prefix is skipped on a second sweep.
        assert_eq!(allocator.destroy_many(&batch), 6);
        assert_eq!(allocator.live_count(), 0);
    }

    #[test]
    fn test_concurrent_creation_yields_unique_ids() {
        let allocator = EntityAllocator::new();

        let mut issued: Vec<Entity> = Vec::new();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        (0..250).map(|_| allocator.create()).collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                issued.extend(handle.join().unwrap());
            }
        });

        let unique: HashSet<Entity> = issued.iter().copied().collect();
        assert_eq!(unique.len(), 1000);
        assert_eq!(allocator.live_count(), 1000);
    }
}
