use serde::{Deserialize, Serialize};

use crate::types::EMPTY;

/// Read-only copy of everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    /// Row-major tile values, 0 = empty.
    pub grid: Vec<Vec<u32>>,
    pub size: usize,
    pub score: u64,
    pub moves: u32,
    pub empty: usize,
    pub max_tile: u32,
    pub win_tile: u32,
    pub reached_target: bool,
    pub game_over: bool,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(EMPTY)
    }
}

/// Serialized session: the grid plus the score (and optionally the move count).
///
/// Values are signed so that a corrupt payload with negative cells reaches
/// validation in `Game::restore` instead of failing inside the deserializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub grid: Vec<Vec<i64>>,
    pub score: u64,
    #[serde(default)]
    pub moves: u32,
}

impl SavedGame {
    pub fn from_rows(rows: &[Vec<u32>], score: u64, moves: u32) -> Self {
        Self {
            grid: rows
                .iter()
                .map(|row| row.iter().map(|&v| i64::from(v)).collect())
                .collect(),
            score,
            moves,
        }
    }
}
