//! # Worm Blocks
//!
//! Game objects for a grid-based worm game, built from pooled entities.
//!
//! ## Data Flow
//!
//! ```text
//! Session::tick()
//!   └─ Worm::step()
//!        ├─ Collision::can_move()          (may the head move?)
//!        ├─ shift position/target tail-ward (snake follow)
//!        └─ SpatialIndex::occupy/vacate    (keep the grid in sync)
//!
//! Session::spawn_worm() / Worm::grow()
//!   └─ Pooler<Segment>::enable()           (may compact the pool)
//!
//! Session::spawn_block()
//!   └─ Block::spawn()
//!        ├─ Pooler<BlockModule>::enable()  (one module per worm cell)
//!        └─ Worm::disable()                (segments back to the pool)
//! ```
//!
//! ## Modules
//!
//! - `grid`: Cells, directions, bounds and colors
//! - `spatial`: Collision / occupancy contracts and the reference `PlayArea`
//! - `worm`: Segments and the segment chain
//! - `fruit`: Pooled pickups
//! - `block`: Worms turned to stone
//! - `config`: TOML configuration
//! - `session`: Headless tick driver tying the pools together

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod block;
pub mod config;
pub mod error;
pub mod fruit;
pub mod grid;
pub mod session;
pub mod spatial;
pub mod worm;

pub use block::{Block, BlockModule};
pub use config::Config;
pub use error::{GameError, GameResult};
pub use fruit::Fruit;
pub use grid::{Bounds, Cell, Color, Delta, Direction};
pub use session::{Session, TickReport};
pub use spatial::{Collision, Occupant, PlayArea, SpatialIndex};
pub use worm::{Segment, Worm, WormState};

// Re-export the pooling kernel
pub use wormblocks_core as core;
