//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, key mapping).
//!
//! # Board Dimensions
//!
//! The canonical board is 4x4. Other square sizes are allowed as long as they
//! are at least [`MIN_BOARD_SIZE`] on a side.
//!
//! - **Rows** are indexed top to bottom starting at 0
//! - **Columns** are indexed left to right starting at 0
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_SIZE` | 4 | Side length of a new board |
//! | `MIN_BOARD_SIZE` | 2 | Smallest playable board |
//! | `MAX_BOARD_SIZE` | 16 | Largest playable board |
//! | `WIN_TILE` | 2048 | Tile value that counts as reaching the target |
//! | `FOUR_CHANCE_PERCENT` | 10 | Chance that a spawned tile is a 4 instead of a 2 |
//! | `INITIAL_TILES` | 2 | Tiles spawned by a reset |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, Position, DEFAULT_BOARD_SIZE};
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("Left").unwrap();
//! assert_eq!(dir, Direction::Left);
//!
//! // Parse a game action
//! let action = GameAction::from_str("swipeUp").unwrap();
//! assert_eq!(action, GameAction::Swipe(Direction::Up));
//!
//! // Positions are (row, col)
//! let pos = Position::new(1, 3);
//! assert_eq!(pos.row, 1);
//!
//! assert_eq!(DEFAULT_BOARD_SIZE, 4);
//! ```

use std::fmt;

/// Side length of a freshly constructed board (4x4).
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Smallest board the engine accepts (2x2).
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest board the engine accepts (16x16).
pub const MAX_BOARD_SIZE: usize = 16;

/// Tile value that counts as reaching the target.
pub const WIN_TILE: u32 = 2048;

/// Percent chance that a spawned tile is a 4 (otherwise a 2).
pub const FOUR_CHANCE_PERCENT: u8 = 10;

/// Number of tiles placed on the board by a reset.
pub const INITIAL_TILES: usize = 2;

/// Value of an empty cell.
pub const EMPTY: u32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_defaults() {
        assert_eq!(DEFAULT_BOARD_SIZE, 4);
        assert_eq!(MIN_BOARD_SIZE, 2);
        assert_eq!(MAX_BOARD_SIZE, 16);
        assert_eq!(WIN_TILE, 2048);
        assert_eq!(FOUR_CHANCE_PERCENT, 10);
        assert_eq!(INITIAL_TILES, 2);
    }

    #[test]
    fn direction_string_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
        }
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(2, 0).to_string(), "(2, 0)");
    }
}

/// A cell coordinate on the board: `(row, col)`, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Swipe directions.
///
/// A direction names the edge tiles travel toward:
/// - **Left**: tiles slide toward column 0
/// - **Right**: tiles slide toward the last column
/// - **Up**: tiles slide toward row 0
/// - **Down**: tiles slide toward the last row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order the engine probes them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r".
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Commands a front-end can forward into the engine.
///
/// These actions are used by both keyboard input and scripted play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide every tile toward one edge
    Swipe(Direction),
    /// Clear the board and start a new session
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("swipeLeft"), Some(GameAction::Swipe(Direction::Left)));
    /// assert_eq!(GameAction::from_str("down"), Some(GameAction::Swipe(Direction::Down)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if lower == "restart" || lower == "reset" {
            return Some(GameAction::Restart);
        }
        let dir = lower.strip_prefix("swipe").unwrap_or(lower.as_str());
        Direction::from_str(dir).map(GameAction::Swipe)
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Swipe(Direction::Up) => "swipeUp",
            GameAction::Swipe(Direction::Down) => "swipeDown",
            GameAction::Swipe(Direction::Left) => "swipeLeft",
            GameAction::Swipe(Direction::Right) => "swipeRight",
            GameAction::Restart => "restart",
        }
    }
}

/// One step of a board transition, reported to the caller in order.
///
/// A single command yields its events in this order: `Moved`/`Merged` (line by
/// line), `ScoreChanged`, `Spawned`, `ReachedTarget`, `GameOver`, and finally
/// `MoveCompleted`. A reset yields `ScoreChanged` (if the score was nonzero)
/// and `Spawned`, followed by `ReachedTarget`/`GameOver` only on boards small
/// enough for the starting tiles to end the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new tile appeared on an empty cell.
    Spawned { at: Position, value: u32 },
    /// A tile slid without merging.
    Moved { from: Position, to: Position },
    /// A tile slid into an equal tile; `value` is the doubled result at `to`.
    Merged {
        from: Position,
        to: Position,
        value: u32,
    },
    /// The score changed by `delta` and is now `score`.
    ScoreChanged { score: u64, delta: i64 },
    /// The target tile appeared for the first time this session.
    ReachedTarget { value: u32 },
    /// The board is full and no swipe can change it.
    GameOver,
    /// Fired once per swipe, including swipes that changed nothing.
    MoveCompleted { changed: bool },
}
