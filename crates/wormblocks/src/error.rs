//! # Game Error Types
//!
//! All errors that can occur while spawning, moving or configuring game objects.

use thiserror::Error;
use wormblocks_core::BoundsError;

use crate::grid::Cell;

/// Errors that can occur in the game-object layer.
#[derive(Error, Debug)]
pub enum GameError {
    /// Index outside a pool or a worm.
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    /// A pool could not supply the requested entities.
    #[error("{pool} pool exhausted: needed {requested} more")]
    PoolExhausted {
        /// Pooled type name.
        pool: &'static str,
        /// How many entities were requested.
        requested: usize,
    },

    /// A worm length outside `1..=max`.
    #[error("invalid worm length {length} (max {max})")]
    InvalidLength {
        /// The requested length.
        length: usize,
        /// The configured maximum.
        max: usize,
    },

    /// A spawn cell is taken or lies outside the play area.
    #[error("cell {0} is occupied or outside the play area")]
    CellOccupied(Cell),

    /// The worm has no live chain.
    #[error("worm is not spawned")]
    NotSpawned,

    /// Unknown direction name.
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// Invalid configuration values.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
