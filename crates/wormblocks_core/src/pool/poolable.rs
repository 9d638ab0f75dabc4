//! # Poolable Contract
//!
//! The capability every pooled entity type implements.

use std::fmt;

/// Stable identity of a pooled entity.
///
/// Assigned once by the pool at construction time and never reassigned.
/// Unlike a slot index, it survives defragmentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PoolId(u32);

impl PoolId {
    /// Creates an ID from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the raw value as a table index.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entity that lives in a [`Pooler`](super::Pooler) slot.
///
/// Entities are constructed once per slot and toggled between enabled and
/// disabled for the lifetime of the pool.
pub trait Poolable {
    /// The identity handed to the entity's factory.
    fn id(&self) -> PoolId;

    /// Whether the entity currently represents live game state.
    fn is_enabled(&self) -> bool;

    /// Flips the enabled flag.
    fn set_enabled(&mut self, enabled: bool);

    /// Returns the entity to its pool.
    #[inline]
    fn disable(&mut self) {
        self.set_enabled(false);
    }
}

/// A display owner that pooled entities are attached to.
///
/// The pool calls [`Attach::attach`] exactly once per entity, right after
/// the entity is built.
pub trait Attach<T> {
    /// Registers `entity` with this owner.
    fn attach(&mut self, entity: &T);
}

impl<T> Attach<T> for () {
    #[inline]
    fn attach(&mut self, _entity: &T) {}
}

impl<T: Poolable> Attach<T> for Vec<PoolId> {
    fn attach(&mut self, entity: &T) {
        self.push(entity.id());
    }
}
