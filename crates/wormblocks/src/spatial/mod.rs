//! # Spatial Services
//!
//! Contracts the game objects call into before and after they move, plus
//! [`PlayArea`], a dense occupancy grid implementing both.
//!
//! Worms only depend on the traits; any spatial index honoring them can
//! stand in for the reference grid.

mod play_area;

use rand::Rng;
use wormblocks_core::PoolId;

use crate::grid::{Bounds, Cell, Delta};

pub use play_area::PlayArea;

/// What occupies a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// Some segment of the worm with this ID.
    Worm(PoolId),
    /// The fruit with this ID.
    Fruit(PoolId),
    /// Some module of the block with this ID.
    Block(PoolId),
}

/// Cell occupancy bookkeeping.
pub trait SpatialIndex {
    /// Marks `cell` as held by `occupant`.
    fn occupy(&mut self, cell: Cell, occupant: Occupant);

    /// Frees `cell`. Freeing an empty cell is a no-op.
    fn vacate(&mut self, cell: Cell);

    /// Returns what holds `cell`, if anything.
    fn occupant(&self, cell: Cell) -> Option<Occupant>;

    /// Picks an unoccupied cell inside `bounds`, or `None` if there is none.
    fn find_free_position<R: Rng + ?Sized>(&self, bounds: Bounds, rng: &mut R) -> Option<Cell>;
}

/// Movement validation.
pub trait Collision {
    /// Whether the worm whose head targets `from` may step by `delta`.
    ///
    /// `noclip` bypasses every check.
    fn can_move(&self, head: PoolId, from: Cell, delta: Delta, noclip: bool) -> bool;
}
