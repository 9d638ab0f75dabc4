//! # Worms
//!
//! A worm is a head segment plus a chain of body segments borrowed from a
//! `Pooler<Segment>`. The worm never owns segment memory; it holds stable
//! [`PoolId`](wormblocks_core::PoolId)s and returns every one on teardown.

mod chain;
mod segment;

pub use chain::{Worm, WormState};
pub use segment::Segment;
