//! # Segment
//!
//! One body unit of a worm.

use wormblocks_core::{PoolId, Poolable};

use crate::config::Config;
use crate::grid::{Cell, Color, Delta};

/// A pooled worm body unit.
///
/// `position` is where the segment is drawn from, `target` the cell it
/// logically holds. Both move together on every step; a renderer may
/// interpolate between them on its own schedule.
#[derive(Clone, Debug)]
pub struct Segment {
    id: PoolId,
    enabled: bool,
    position: Cell,
    target: Cell,
    color: Color,
    size: u32,
}

impl Segment {
    /// Builds a disabled segment.
    #[must_use]
    pub fn new(id: PoolId, config: &Config) -> Self {
        Self {
            id,
            enabled: false,
            position: Cell::default(),
            target: Cell::default(),
            color: Color::default(),
            size: config.size,
        }
    }

    /// Visual diameter in pixels.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Current drawn position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Cell {
        self.position
    }

    /// The cell this segment holds.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> Cell {
        self.target
    }

    /// Segment color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Sets the segment color.
    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Puts the segment on `cell`, both drawn and logical.
    #[inline]
    pub fn place(&mut self, cell: Cell) {
        self.position = cell;
        self.target = cell;
    }

    /// Moves the segment by `delta`.
    #[inline]
    pub(crate) fn shift(&mut self, delta: Delta) {
        self.position = self.position.offset(delta);
        self.target = self.target.offset(delta);
    }

    /// Takes over a predecessor's `(position, target)` and hands back this
    /// segment's previous pair for its own successor.
    #[inline]
    pub(crate) fn follow(&mut self, (position, target): (Cell, Cell)) -> (Cell, Cell) {
        let previous = (self.position, self.target);
        self.position = position;
        self.target = target;
        previous
    }
}

impl Poolable for Segment {
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
