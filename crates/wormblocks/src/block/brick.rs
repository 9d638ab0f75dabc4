//! # Block
//!
//! A pooled block built from the cells of a worm. Stacked worm segments
//! share a cell, so they share a module.

use wormblocks_core::{PoolId, Poolable, Pooler};

use super::module::BlockModule;
use crate::config::Config;
use crate::error::{GameError, GameResult};
use crate::grid::{Cell, Color};
use crate::spatial::{Occupant, SpatialIndex};
use crate::worm::{Segment, Worm};

/// A pooled block.
///
/// Modules are on loan from a `Pooler<BlockModule>` and go back through
/// [`Block::disable`]. Like [`Worm`], flipping the pool flag of a block
/// that still holds modules trips a debug assertion.
#[derive(Clone, Debug)]
pub struct Block {
    id: PoolId,
    enabled: bool,
    position: Cell,
    /// Borrowed modules, head cell first. Capacity is reserved up front.
    modules: Vec<PoolId>,
}

impl Block {
    /// Builds a disabled block slot.
    #[must_use]
    pub fn new(id: PoolId, config: &Config) -> Self {
        Self {
            id,
            enabled: false,
            position: Cell::default(),
            modules: Vec::with_capacity(config.max_worm_length.max(1)),
        }
    }

    /// The cell the worm's head held when the block formed.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Cell {
        self.position
    }

    /// Number of modules.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the block holds no modules.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Borrowed module IDs, head cell first.
    #[inline]
    #[must_use]
    pub fn modules(&self) -> &[PoolId] {
        &self.modules
    }

    /// Color of the first module, if any.
    #[must_use]
    pub fn color(&self, modules: &Pooler<BlockModule>) -> Option<Color> {
        self.modules
            .first()
            .and_then(|id| modules.get(*id))
            .map(BlockModule::color)
    }

    /// Recolors every module.
    pub fn set_color(&self, color: Color, modules: &mut Pooler<BlockModule>) {
        for id in &self.modules {
            if let Some(module) = modules.get_mut(*id) {
                module.set_color(color);
            }
        }
    }

    /// Cells covered by the block, head cell first.
    pub fn cells<'a>(&'a self, modules: &'a Pooler<BlockModule>) -> impl Iterator<Item = Cell> + 'a {
        self.modules
            .iter()
            .filter_map(|id| modules.get(*id))
            .map(BlockModule::cell)
    }

    /// Turns `worm` into this block.
    ///
    /// Borrows one module per distinct cell the worm covers. Once every
    /// module is in hand the worm is disabled, its segments go back to
    /// `tails` and its cells are handed to the block.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotSpawned`] if `worm` has no live chain
    /// - [`GameError::PoolExhausted`] if `modules` runs dry; modules
    ///   borrowed by this call are returned, the block is left disabled
    ///   and the worm is untouched
    pub fn spawn<S>(
        &mut self,
        worm: &mut Worm,
        modules: &mut Pooler<BlockModule>,
        tails: &mut Pooler<Segment>,
        area: &mut S,
    ) -> GameResult<()>
    where
        S: SpatialIndex + ?Sized,
    {
        if !worm.is_active() {
            self.enabled = false;
            return Err(GameError::NotSpawned);
        }
        if !self.modules.is_empty() {
            self.release(modules, area);
        }

        let pool = modules.label();
        let color = worm.color();
        for cell in worm.targets(tails) {
            if self.cells(modules).any(|held| held == cell) {
                continue;
            }
            let Some(module) = modules.enable() else {
                let borrowed = self.modules.len();
                for id in self.modules.drain(..) {
                    modules.disable(id);
                }
                self.enabled = false;
                tracing::warn!(
                    block = %self.id,
                    worm = %worm.id(),
                    returned = borrowed,
                    "block module pool exhausted, rolled back"
                );
                return Err(GameError::PoolExhausted {
                    pool,
                    requested: worm.len(),
                });
            };
            module.place(cell, color);
            self.modules.push(module.id());
        }

        self.position = worm.head().target();
        worm.disable(tails, area);
        for id in &self.modules {
            if let Some(module) = modules.get(*id) {
                area.occupy(module.cell(), Occupant::Block(self.id));
            }
        }
        self.enabled = true;

        tracing::debug!(
            block = %self.id,
            worm = %worm.id(),
            modules = self.modules.len(),
            "worm turned to block"
        );
        Ok(())
    }

    /// Returns every module to `modules`, frees the block's cells and
    /// disables the block. Safe on a block that never formed.
    pub fn disable<S>(&mut self, modules: &mut Pooler<BlockModule>, area: &mut S)
    where
        S: SpatialIndex + ?Sized,
    {
        if !self.modules.is_empty() {
            let returned = self.modules.len();
            self.release(modules, area);
            tracing::debug!(block = %self.id, returned, "block disabled");
        }
        self.enabled = false;
    }

    fn release<S>(&mut self, modules: &mut Pooler<BlockModule>, area: &mut S)
    where
        S: SpatialIndex + ?Sized,
    {
        for id in self.modules.drain(..) {
            if let Some(module) = modules.get_mut(id) {
                if area.occupant(module.cell()) == Some(Occupant::Block(self.id)) {
                    area.vacate(module.cell());
                }
                module.disable();
            }
        }
    }
}

impl Poolable for Block {
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
        debug_assert!(
            enabled || self.modules.is_empty(),
            "block {} disabled while holding modules; use Block::disable",
            self.id
        );
        self.enabled = enabled;
    }
}
