//! # Pooler
//!
//! Fixed-size array of pre-built entities with lazy in-place defragmentation.

use std::ops::{Index, IndexMut};

use super::observer::{PoolEvent, PoolObserver};
use super::poolable::{Attach, PoolId, Poolable};
use crate::error::BoundsError;

/// A fixed-capacity pool of entities.
///
/// Enabled entities are handed out from `enable_index` upward. Entities may
/// disable themselves anywhere in the array, which leaves holes below the
/// boundary; those holes are reclaimed by [`Pooler::sort`] only when the
/// pool looks full, so steady-state ticks never pay for compaction.
///
/// # Layout
///
/// ```text
/// Before sort: [.2.45]   enable_index = 4
///                   ^
/// After sort:  [524..]   enable_index = 3
///                  ^
/// . = disabled, [number] = enabled
/// ```
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use [`SharedPooler`](super::SharedPooler)
/// when several threads allocate from the same pool.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = Pooler::new(5, |id| Block::new(id));
///
/// // Enable - O(1) amortized, no heap allocation
/// let id = pool.enable().map(|block| block.id());
///
/// // Disable - O(1), the slot is reclaimed by the next compaction
/// pool.disable(id.unwrap());
/// ```
pub struct Pooler<T> {
    /// The entity slots.
    slots: Box<[T]>,
    /// Slot index of every entity, indexed by `PoolId`.
    slot_of: Box<[usize]>,
    /// Boundary between the enabled prefix and free slots.
    enable_index: usize,
    /// Index of the last slot.
    end_index: usize,
    /// Pooled type name for diagnostics.
    label: &'static str,
    /// Optional diagnostics sink.
    observer: Option<Box<dyn PoolObserver + Send>>,
}

impl<T: Poolable> Pooler<T> {
    /// Creates a pool of `capacity` entities built by `factory`.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of slots
    /// * `factory` - Builds the entity for a given identity
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new<F>(capacity: usize, factory: F) -> Self
    where
        F: FnMut(PoolId) -> T,
    {
        Self::with_owner(capacity, &mut (), factory)
    }

    /// Creates a pool and attaches every entity to `owner` once.
    ///
    /// Every entity starts disabled, whatever the factory returned.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`, or if the factory
    /// returns an entity whose ID differs from the one it was given.
    #[must_use]
    pub fn with_owner<O, F>(capacity: usize, owner: &mut O, mut factory: F) -> Self
    where
        O: Attach<T> + ?Sized,
        F: FnMut(PoolId) -> T,
    {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            u32::try_from(capacity).is_ok(),
            "Capacity cannot exceed u32::MAX"
        );

        let mut slots = Vec::with_capacity(capacity);
        for raw in 0..capacity {
            #[allow(clippy::cast_possible_truncation)]
            let id = PoolId::new(raw as u32);
            let mut entity = factory(id);
            assert_eq!(entity.id(), id, "factory must keep the assigned id");
            entity.set_enabled(false);
            owner.attach(&entity);
            slots.push(entity);
        }

        Self {
            slots: slots.into_boxed_slice(),
            slot_of: (0..capacity).collect::<Vec<_>>().into_boxed_slice(),
            enable_index: 0,
            end_index: capacity - 1,
            label: short_type_name::<T>(),
            observer: None,
        }
    }

    /// Installs a diagnostics observer, replacing any previous one.
    #[must_use]
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: PoolObserver + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the slot new entities are enabled from.
    #[inline]
    #[must_use]
    pub const fn enable_index(&self) -> usize {
        self.enable_index
    }

    /// Returns the number of enabled entities. O(capacity).
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.slots.iter().filter(|entity| entity.is_enabled()).count()
    }

    /// Returns the pooled type name used in diagnostics.
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Enables a disabled entity and returns it.
    ///
    /// Compacts the pool first when the boundary sits on an enabled last slot.
    ///
    /// # Returns
    ///
    /// The enabled entity, or `None` if every slot is in use.
    pub fn enable(&mut self) -> Option<&mut T> {
        if self.boundary_full() && self.sort() {
            return None;
        }

        let index = self.enable_index;
        debug_assert!(!self.slots[index].is_enabled());
        if self.enable_index != self.end_index {
            self.enable_index += 1;
        }

        let entity = &mut self.slots[index];
        entity.set_enabled(true);
        Some(entity)
    }

    /// Checks whether `amount` entities can be enabled.
    ///
    /// Answers from the boundary when it can; otherwise compacts the pool
    /// and checks again, so a query may reorder slots.
    pub fn has_available(&mut self, amount: usize) -> bool {
        if self.free_estimate() >= amount {
            return true;
        }
        self.sort();
        self.free_estimate() >= amount
    }

    /// Disables every enabled entity and moves the boundary back to zero.
    pub fn reset(&mut self) {
        self.reset_with(|_| {});
    }

    /// Like [`Pooler::reset`], calling `teardown` on each enabled entity
    /// before disabling it.
    pub fn reset_with<F>(&mut self, mut teardown: F)
    where
        F: FnMut(&mut T),
    {
        for entity in self.slots[..=self.enable_index].iter_mut().rev() {
            if entity.is_enabled() {
                teardown(entity);
                entity.disable();
            }
        }
        self.enable_index = 0;
    }

    /// Defragments the pool in place.
    ///
    /// Afterwards every enabled entity sits below `enable_index` and every
    /// slot from `enable_index` up is disabled, except when the pool is full:
    /// then `enable_index` is the last slot and that slot is enabled too.
    /// Entities keep their identity and state; only their slots change, and
    /// relative order is not preserved.
    ///
    /// # Returns
    ///
    /// `true` if every slot is enabled (no free slot could be recovered).
    pub fn sort(&mut self) -> bool {
        let boundary_before = self.enable_index;
        let mut current = 0;

        while current < self.enable_index {
            if self.slots[current].is_enabled() {
                current += 1;
                continue;
            }
            // Pull the highest enabled entity into the hole. Disabled slots
            // passed on the way down are beyond the enabled prefix.
            while self.enable_index > current {
                if self.slots[self.enable_index].is_enabled() {
                    self.swap(current, self.enable_index);
                    current += 1;
                    break;
                }
                self.enable_index -= 1;
            }
        }

        let full = self.boundary_full();
        let event = if full {
            PoolEvent::Exhausted {
                capacity: self.count(),
            }
        } else {
            PoolEvent::Compacted {
                free: self.count() - self.enable_index,
                recovered: boundary_before - self.enable_index,
            }
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(self.label, event);
        }
        full
    }

    /// Disables the entity with the given ID.
    ///
    /// # Returns
    ///
    /// `true` if the entity was enabled.
    pub fn disable(&mut self, id: PoolId) -> bool {
        match self.get_mut(id) {
            Some(entity) if entity.is_enabled() => {
                entity.disable();
                true
            }
            _ => false,
        }
    }

    /// Returns the current slot of the entity with the given ID.
    #[inline]
    #[must_use]
    pub fn slot_of(&self, id: PoolId) -> Option<usize> {
        self.slot_of.get(id.as_usize()).copied()
    }

    /// Looks an entity up by identity, wherever compaction moved it.
    #[inline]
    #[must_use]
    pub fn get(&self, id: PoolId) -> Option<&T> {
        self.slots.get(self.slot_of(id)?)
    }

    /// Looks an entity up mutably by identity.
    #[inline]
    pub fn get_mut(&mut self, id: PoolId) -> Option<&mut T> {
        let slot = self.slot_of(id)?;
        self.slots.get_mut(slot)
    }

    /// Returns the entity in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] if `index` is not a slot.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, BoundsError> {
        let index = BoundsError::check(index, self.slots.len())?;
        Ok(&self.slots[index])
    }

    /// Returns the entity in slot `index` mutably.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] if `index` is not a slot.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, BoundsError> {
        let index = BoundsError::check(index, self.slots.len())?;
        Ok(&mut self.slots[index])
    }

    /// Iterates over every slot in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    /// Iterates over enabled entities in slot order.
    pub fn iter_enabled(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|entity| entity.is_enabled())
    }

    /// Iterates mutably over enabled entities in slot order.
    pub fn iter_enabled_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|entity| entity.is_enabled())
    }

    /// Slots known to be free without compacting.
    #[inline]
    fn free_estimate(&self) -> usize {
        self.count() - self.enable_index - usize::from(self.boundary_full())
    }

    /// The boundary can't advance: it sits on an enabled last slot.
    #[inline]
    fn boundary_full(&self) -> bool {
        self.enable_index == self.end_index && self.slots[self.end_index].is_enabled()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.slot_of[self.slots[a].id().as_usize()] = a;
        self.slot_of[self.slots[b].id().as_usize()] = b;
    }
}

impl<T: Poolable> Index<usize> for Pooler<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(entity) => entity,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Poolable> IndexMut<usize> for Pooler<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(entity) => entity,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a Pooler<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// `wormblocks::worm::Segment` -> `Segment`.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
