//! # Shared Pooler
//!
//! A pool behind one mutex for callers on more than one thread.
//!
//! `has_available` followed by `enable` is a check-then-act sequence; with
//! two threads it races. Every operation here holds the same lock across
//! the capacity check and the slot mutation.

use std::sync::Arc;

use parking_lot::Mutex;

use super::poolable::{PoolId, Poolable};
use super::pooler::Pooler;

/// A cloneable handle to a mutex-guarded [`Pooler`].
pub struct SharedPooler<T> {
    inner: Arc<Mutex<Pooler<T>>>,
}

impl<T> Clone for SharedPooler<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Poolable> SharedPooler<T> {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: Pooler<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Enables `amount` entities, all or none, appending their IDs to `out`.
    ///
    /// # Returns
    ///
    /// `false` (and `out` untouched) if the pool can't supply `amount`.
    pub fn enable_batch(&self, amount: usize, out: &mut Vec<PoolId>) -> bool {
        let mut pool = self.inner.lock();
        if !pool.has_available(amount) {
            return false;
        }

        let start = out.len();
        for _ in 0..amount {
            if let Some(entity) = pool.enable() {
                out.push(entity.id());
            } else {
                for id in out.drain(start..) {
                    pool.disable(id);
                }
                return false;
            }
        }
        true
    }

    /// Disables the entity with the given ID.
    pub fn disable(&self, id: PoolId) -> bool {
        self.inner.lock().disable(id)
    }

    /// Runs `f` with exclusive access to the pool.
    pub fn with<R>(&self, f: impl FnOnce(&mut Pooler<T>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
