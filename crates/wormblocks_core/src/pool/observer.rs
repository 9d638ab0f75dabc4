//! # Pool Observers
//!
//! Diagnostics hook for the defragmentation pass. The pool never logs by
//! itself; it reports significant events to an optional observer.

/// Something worth reporting happened inside a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolEvent {
    /// A defragmentation pass finished with free slots left.
    Compacted {
        /// Free slots available after the pass.
        free: usize,
        /// How far the enable boundary moved down during the pass.
        recovered: usize,
    },
    /// A defragmentation pass found every slot enabled.
    Exhausted {
        /// Total pool capacity.
        capacity: usize,
    },
}

/// Receives [`PoolEvent`]s from a pool.
///
/// Any `FnMut(&'static str, PoolEvent)` closure is an observer.
pub trait PoolObserver {
    /// Called with the pooled type's name and the event.
    fn on_event(&mut self, pool: &'static str, event: PoolEvent);
}

impl<F> PoolObserver for F
where
    F: FnMut(&'static str, PoolEvent),
{
    #[inline]
    fn on_event(&mut self, pool: &'static str, event: PoolEvent) {
        self(pool, event);
    }
}

/// Forwards pool events to `tracing`.
///
/// Exhaustion means the pool is undersized and is reported as a warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl PoolObserver for TracingObserver {
    fn on_event(&mut self, pool: &'static str, event: PoolEvent) {
        match event {
            PoolEvent::Compacted { free, recovered } => {
                tracing::debug!(pool, free, recovered, "pool compacted");
            }
            PoolEvent::Exhausted { capacity } => {
                tracing::warn!(pool, capacity, "pool fully utilized");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |pool: &'static str, event: PoolEvent| seen.push((pool, event));
            observer.on_event("Segment", PoolEvent::Exhausted { capacity: 4 });
        }
        assert_eq!(seen, vec![("Segment", PoolEvent::Exhausted { capacity: 4 })]);
    }

    #[test]
    fn test_tracing_observer_accepts_events() {
        let mut observer = TracingObserver;
        observer.on_event("Fruit", PoolEvent::Compacted { free: 2, recovered: 1 });
        observer.on_event("Fruit", PoolEvent::Exhausted { capacity: 8 });
    }
}
