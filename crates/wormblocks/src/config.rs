//! # Configuration
//!
//! Game configuration, loaded once at startup from TOML. Every field has a
//! default, so a file only needs the values it changes:
//!
//! ```toml
//! width = 32
//! height = 20
//! max_worm_length = 48
//! segment_pool = 256
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::grid::Bounds;

/// Pool capacities, grid size and entity visuals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Entity visual size in pixels.
    pub size: u32,
    /// Play area width in cells.
    pub width: u32,
    /// Play area height in cells.
    pub height: u32,
    /// Longest worm, head included. Bounds each worm's segment index.
    pub max_worm_length: usize,
    /// Worm pool capacity.
    pub worm_pool: usize,
    /// Segment pool capacity, shared by every worm.
    pub segment_pool: usize,
    /// Fruit pool capacity.
    pub fruit_pool: usize,
    /// Block pool capacity.
    pub block_pool: usize,
    /// Block module pool capacity, shared by every block.
    pub module_pool: usize,
    /// Seed for spawn positions.
    pub seed: u64,
    /// Start new worms with collision checks bypassed.
    pub noclip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 32,
            width: 40,
            height: 24,
            max_worm_length: 64,
            worm_pool: 8,
            segment_pool: 512,
            fruit_pool: 16,
            block_pool: 16,
            module_pool: 512,
            seed: 0x5EED,
            noclip: false,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`GameError::Toml`] on malformed input, [`GameError::Config`] on
    /// out-of-range values.
    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`GameError::Io`] if the file can't be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks that every size and capacity is usable.
    ///
    /// # Errors
    ///
    /// [`GameError::Config`] naming the first bad field.
    pub fn validate(&self) -> GameResult<()> {
        let checks = [
            ("size", u64::from(self.size)),
            ("width", u64::from(self.width)),
            ("height", u64::from(self.height)),
            ("max_worm_length", self.max_worm_length as u64),
            ("worm_pool", self.worm_pool as u64),
            ("segment_pool", self.segment_pool as u64),
            ("fruit_pool", self.fruit_pool as u64),
            ("block_pool", self.block_pool as u64),
            ("module_pool", self.module_pool as u64),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(GameError::Config(format!("{field} must be greater than zero")));
            }
        }
        let pools = [
            self.worm_pool,
            self.segment_pool,
            self.fruit_pool,
            self.block_pool,
            self.module_pool,
        ];
        if pools.iter().any(|&capacity| capacity > u32::MAX as usize) {
            return Err(GameError::Config("pool capacity exceeds u32::MAX".to_owned()));
        }
        Ok(())
    }

    /// The play area extent.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Play area size in pixels.
    #[inline]
    #[must_use]
    pub const fn window_size(&self) -> (u32, u32) {
        (self.width * self.size, self.height * self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str("width = 10\nheight = 8\nnoclip = true\n").unwrap();
        assert_eq!(config.bounds(), Bounds::new(10, 8));
        assert!(config.noclip);
        assert_eq!(config.segment_pool, Config::default().segment_pool);
        assert_eq!(config.window_size(), (320, 256));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Config::from_toml_str("segment_pool = 0").unwrap_err();
        assert!(matches!(err, GameError::Config(ref msg) if msg.contains("segment_pool")));

        let err = Config::from_toml_str("module_pool = 0").unwrap_err();
        assert!(matches!(err, GameError::Config(ref msg) if msg.contains("module_pool")));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Config::from_toml_str("width = \"wide\""),
            Err(GameError::Toml(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config {
            seed: 99,
            ..Config::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/definitely/not/here.toml"),
            Err(GameError::Io(_))
        ));
    }
}
