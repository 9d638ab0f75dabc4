//! # Object Pooling
//!
//! Pre-built entity pools for zero-allocation gameplay.
//!
//! ## Design Philosophy
//!
//! All entities are constructed once at startup. During gameplay:
//! - No heap allocations
//! - No entity construction or destruction
//! - Predictable, flat latency; compaction only runs when a pool looks full

mod observer;
mod poolable;
mod pooler;
mod shared;

pub use observer::{PoolEvent, PoolObserver, TracingObserver};
pub use poolable::{Attach, PoolId, Poolable};
pub use pooler::Pooler;
pub use shared::SharedPooler;
