//! # Blocks
//!
//! A block is a worm turned to stone: every cell the worm covered becomes
//! a module borrowed from a `Pooler<BlockModule>`, and the worm itself goes
//! back to its pool.
//!
//! ```text
//! worm:   [head] [body0] [body1]        Pooler<Segment>
//!            │  Block::spawn()
//!            ▼
//! block:  [m0]   [m1]    [m2]           Pooler<BlockModule>
//! ```

mod brick;
mod module;

pub use brick::Block;
pub use module::BlockModule;
