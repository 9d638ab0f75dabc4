//! # Worm Blocks Core
//!
//! Fixed-capacity object pools for tick-driven games:
//! - Every pooled entity is built once, at pool creation
//! - Entities are toggled, never created or dropped, during gameplay
//! - Enabled entities are kept in a contiguous low-index prefix by a lazy,
//!   in-place defragmentation pass
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in hot path** - All slots are pre-allocated
//! 2. **Stable identity** - A [`PoolId`] never changes, only the slot does
//! 3. **Side-effect-free algorithms** - Diagnostics go through a [`PoolObserver`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use wormblocks_core::{Pooler, Poolable};
//!
//! let mut pool = Pooler::new(128, |id| Particle::new(id));
//! let particle = pool.enable().map(|p| p.id());
//! // All memory pre-allocated, zero allocations during gameplay
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod pool;

pub use error::BoundsError;
pub use pool::{
    Attach, PoolEvent, PoolId, PoolObserver, Poolable, Pooler, SharedPooler, TracingObserver,
};
