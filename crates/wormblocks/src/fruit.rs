//! # Fruit
//!
//! Pooled pickups that spawn on a free cell.

use rand::Rng;
use wormblocks_core::{PoolId, Poolable};

use crate::config::Config;
use crate::grid::{Bounds, Cell};
use crate::spatial::{Occupant, SpatialIndex};

/// A pooled fruit.
#[derive(Clone, Debug)]
pub struct Fruit {
    id: PoolId,
    enabled: bool,
    position: Cell,
    bounds: Bounds,
}

impl Fruit {
    /// Builds a disabled fruit that spawns within the configured area.
    #[must_use]
    pub fn new(id: PoolId, config: &Config) -> Self {
        Self {
            id,
            enabled: false,
            position: Cell::default(),
            bounds: config.bounds(),
        }
    }

    /// The cell the fruit sits on.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Cell {
        self.position
    }

    /// Places the fruit on a free cell and registers it.
    ///
    /// # Returns
    ///
    /// The chosen cell, or `None` if the area is full; the fruit then
    /// disables itself.
    pub fn spawn<S, R>(&mut self, area: &mut S, rng: &mut R) -> Option<Cell>
    where
        S: SpatialIndex + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(cell) = area.find_free_position(self.bounds, rng) else {
            tracing::debug!(fruit = %self.id, "no free cell");
            self.disable();
            return None;
        };
        self.position = cell;
        self.enabled = true;
        area.occupy(cell, Occupant::Fruit(self.id));
        Some(cell)
    }

    /// Disables the fruit, freeing its cell if it still holds it.
    pub fn despawn<S>(&mut self, area: &mut S)
    where
        S: SpatialIndex + ?Sized,
    {
        if self.enabled && area.occupant(self.position) == Some(Occupant::Fruit(self.id)) {
            area.vacate(self.position);
        }
        self.disable();
    }
}

impl Poolable for Fruit {
    #[inline]
    fn id(&self) -> PoolId {
        self.id
    }

    #[inline]
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
