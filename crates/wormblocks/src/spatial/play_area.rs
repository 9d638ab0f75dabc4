//! # Play Area
//!
//! Dense occupancy grid: one optional occupant per cell, allocated once.

use rand::Rng;
use wormblocks_core::PoolId;

use super::{Collision, Occupant, SpatialIndex};
use crate::grid::{Bounds, Cell, Delta};

/// Random picks tried before falling back to a linear scan.
const FREE_CELL_ATTEMPTS: usize = 16;

/// Reference spatial index and collision service.
#[derive(Clone, Debug)]
pub struct PlayArea {
    bounds: Bounds,
    cells: Box<[Option<Occupant>]>,
}

impl PlayArea {
    /// Creates an empty area.
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![None; bounds.area()].into_boxed_slice(),
        }
    }

    /// The area's extent.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether `cell` is inside the area and unoccupied.
    #[inline]
    #[must_use]
    pub fn is_free(&self, cell: Cell) -> bool {
        matches!(self.bounds.index(cell), Some(index) if self.cells[index].is_none())
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Number of cells held by `occupant`.
    #[must_use]
    pub fn occupied_by(&self, occupant: Occupant) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Some(occupant))
            .count()
    }

    /// Frees every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl SpatialIndex for PlayArea {
    fn occupy(&mut self, cell: Cell, occupant: Occupant) {
        if let Some(index) = self.bounds.index(cell) {
            self.cells[index] = Some(occupant);
        }
    }

    fn vacate(&mut self, cell: Cell) {
        if let Some(index) = self.bounds.index(cell) {
            self.cells[index] = None;
        }
    }

    fn occupant(&self, cell: Cell) -> Option<Occupant> {
        self.cells[self.bounds.index(cell)?]
    }

    fn find_free_position<R: Rng + ?Sized>(&self, bounds: Bounds, rng: &mut R) -> Option<Cell> {
        let area = bounds.area();
        if area == 0 {
            return None;
        }

        for _ in 0..FREE_CELL_ATTEMPTS {
            let cell = bounds.cell(rng.gen_range(0..area))?;
            if self.is_free(cell) {
                return Some(cell);
            }
        }

        // Crowded: scan once, starting somewhere random.
        let start = rng.gen_range(0..area);
        (0..area)
            .filter_map(|step| bounds.cell((start + step) % area))
            .find(|cell| self.is_free(*cell))
    }
}

impl Collision for PlayArea {
    fn can_move(&self, head: PoolId, from: Cell, delta: Delta, noclip: bool) -> bool {
        if noclip {
            return true;
        }

        let to = from.offset(delta);
        match self.bounds.index(to).map(|index| self.cells[index]) {
            None => {
                tracing::trace!(worm = %head, %to, "blocked by edge");
                false
            }
            Some(Some(Occupant::Worm(other))) => {
                tracing::trace!(worm = %head, blocker = %other, %to, "blocked by worm");
                false
            }
            Some(Some(Occupant::Block(block))) => {
                tracing::trace!(worm = %head, %block, %to, "blocked by block");
                false
            }
            Some(Some(Occupant::Fruit(_)) | None) => true,
        }
    }
}
