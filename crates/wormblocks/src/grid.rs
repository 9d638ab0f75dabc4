//! # Grid Types
//!
//! Integer grid coordinates. `y` grows downward, like screen space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Cell {
    /// Creates a cell.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this cell moved by `delta`, wrapping at the `i32` limits.
    #[inline]
    #[must_use]
    pub const fn offset(self, delta: Delta) -> Self {
        Self {
            x: self.x.wrapping_add(delta.dx),
            y: self.y.wrapping_add(delta.dy),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A signed cell offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Delta {
    /// Horizontal offset.
    pub dx: i32,
    /// Vertical offset.
    pub dy: i32,
}

impl Delta {
    /// Creates a delta.
    #[inline]
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// One of the four axis-aligned facings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Toward row 0.
    #[default]
    Up,
    /// Toward column 0.
    Left,
    /// Away from row 0.
    Down,
    /// Away from column 0.
    Right,
}

impl Direction {
    /// All directions, clockwise from up.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// The one-cell step for this facing.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> Delta {
        match self {
            Self::Up => Delta::new(0, -1),
            Self::Left => Delta::new(-1, 0),
            Self::Down => Delta::new(0, 1),
            Self::Right => Delta::new(1, 0),
        }
    }

    /// The reverse facing.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UP" => Ok(Self::Up),
            "LEFT" => Ok(Self::Left),
            "DOWN" => Ok(Self::Down),
            "RIGHT" => Ok(Self::Right),
            _ => Err(GameError::InvalidDirection(s.to_owned())),
        }
    }
}

/// A `width × height` rectangle of cells anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

impl Bounds {
    /// Creates bounds.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `cell` lies inside.
    #[inline]
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Row-major index of `cell`, or `None` outside the bounds.
    #[inline]
    #[must_use]
    pub fn index(self, cell: Cell) -> Option<usize> {
        let x = u32::try_from(cell.x).ok()?;
        let y = u32::try_from(cell.y).ok()?;
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Bounds::index`].
    #[inline]
    #[must_use]
    pub fn cell(self, index: usize) -> Option<Cell> {
        if index >= self.area() {
            return None;
        }
        let width = self.width as usize;
        let x = i32::try_from(index % width).ok()?;
        let y = i32::try_from(index / width).ok()?;
        Some(Cell::new(x, y))
    }
}

/// An RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque red.
    pub const RED: Self = Self::rgb(230, 60, 60);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(60, 200, 90);

    /// Creates an opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Cell::new(5, 5).offset(Direction::Up.delta()), Cell::new(5, 4));
        assert_eq!(Cell::new(5, 5).offset(Direction::Left.delta()), Cell::new(4, 5));
        assert_eq!(Cell::new(5, 5).offset(Direction::Down.delta()), Cell::new(5, 6));
        assert_eq!(Cell::new(5, 5).offset(Direction::Right.delta()), Cell::new(6, 5));
    }

    #[test]
    fn test_offset_wraps_at_limits() {
        let edge = Cell::new(i32::MAX, i32::MIN);
        assert_eq!(edge.offset(Delta::new(1, -1)), Cell::new(i32::MIN, i32::MAX));
        assert_eq!(Bounds::new(4, 4).index(edge.offset(Delta::new(1, 0))), None);
    }

    #[test]
    fn test_opposite_cancels() {
        for direction in Direction::ALL {
            let there = Cell::new(2, 2).offset(direction.delta());
            assert_eq!(there.offset(direction.opposite().delta()), Cell::new(2, 2));
        }
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("right".parse::<Direction>().unwrap(), Direction::Right);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(GameError::InvalidDirection(name)) if name == "sideways"
        ));
    }

    #[test]
    fn test_bounds_index() {
        let bounds = Bounds::new(4, 3);
        assert_eq!(bounds.area(), 12);
        assert_eq!(bounds.index(Cell::new(0, 0)), Some(0));
        assert_eq!(bounds.index(Cell::new(3, 2)), Some(11));
        assert_eq!(bounds.index(Cell::new(4, 0)), None);
        assert_eq!(bounds.index(Cell::new(-1, 0)), None);
        assert_eq!(bounds.cell(11), Some(Cell::new(3, 2)));
        assert_eq!(bounds.cell(12), None);
    }
}
