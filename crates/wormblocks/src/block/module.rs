//! # Block Module
//!
//! One cell of a block.

use wormblocks_core::{PoolId, Poolable};

use crate::config::Config;
use crate::grid::{Cell, Color};

/// A pooled block cell.
#[derive(Clone, Debug)]
pub struct BlockModule {
    id: PoolId,
    enabled: bool,
    cell: Cell,
    color: Color,
    size: u32,
}

impl BlockModule {
    /// Builds a disabled module.
    #[must_use]
    pub fn new(id: PoolId, config: &Config) -> Self {
        Self {
            id,
            enabled: false,
            cell: Cell::default(),
            color: Color::default(),
            size: config.size,
        }
    }

    /// The cell this module holds.
    #[inline]
    #[must_use]
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Module color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Visual size in pixels.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Sets the module color.
    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn place(&mut self, cell: Cell, color: Color) {
        self.cell = cell;
        self.color = color;
    }
}

impl Poolable for BlockModule {
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
