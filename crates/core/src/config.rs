//! Engine configuration.
//!
//! Rule knobs for one engine instance: board size, win tile and spawn odds.

use crate::error::ValidationError;
use crate::grid::is_tile_value;
use crate::types::{
    DEFAULT_BOARD_SIZE, FOUR_CHANCE_PERCENT, INITIAL_TILES, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
    WIN_TILE,
};

/// Rules for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Board side length.
    pub size: usize,
    /// First appearance of this value fires `ReachedTarget`.
    pub win_tile: u32,
    /// Percent chance that a spawned tile is a 4.
    pub four_chance_percent: u8,
    /// Tiles spawned by `reset`.
    pub initial_tiles: usize,
}

impl EngineConfig {
    /// Default rules on a board of the given size.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.size < MIN_BOARD_SIZE {
            return Err(ValidationError::TooSmall {
                size: self.size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.size > MAX_BOARD_SIZE {
            return Err(ValidationError::TooLarge {
                size: self.size,
                max: MAX_BOARD_SIZE,
            });
        }
        if !is_tile_value(self.win_tile) || self.win_tile < 4 {
            return Err(ValidationError::Config(
                "win tile must be a power of two of at least 4",
            ));
        }
        if self.four_chance_percent > 100 {
            return Err(ValidationError::Config(
                "four chance must be a percentage (0..=100)",
            ));
        }
        if self.initial_tiles > self.size.saturating_mul(self.size) {
            return Err(ValidationError::Config(
                "initial tiles exceed the number of cells",
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            win_tile: WIN_TILE,
            four_chance_percent: FOUR_CHANCE_PERCENT,
            initial_tiles: INITIAL_TILES,
        }
    }
}
