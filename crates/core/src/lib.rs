//! Core game logic module - pure, deterministic, and testable
//!
//! This crate is the 2048 board engine: it owns the grid, interprets swipes,
//! performs the slide/merge/spawn transition, tracks the score, and detects
//! terminal states. It has **no dependencies** on terminals, input devices or
//! storage, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every command returns the exact events it caused
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: N x N tile storage and validation of restore payloads
//! - [`line`]: single-line slide and merge (the core algorithm)
//! - [`moves`]: mapping a swipe direction onto rows or columns
//! - [`game`]: the engine: commands, spawning, terminal detection
//! - [`rng`]: seedable randomness and the spawn policy
//! - [`snapshot`]: read-only frames and the save/restore payload
//! - [`config`]: rule knobs (board size, win tile, spawn odds)
//! - [`error`]: the validation error returned by restore
//!
//! # Game Rules
//!
//! - **Merging**: two equal tiles meeting during a swipe combine into one tile
//!   of double value; the new value is added to the score
//! - **Merge once**: a tile produced by a merge cannot merge again in the same swipe
//! - **Spawning**: every swipe that changes the board spawns a 2 (90%) or a 4 (10%)
//!   on a random empty cell
//! - **Target**: the first 2048 tile of a session is reported once
//! - **Game over**: the board is full and no swipe can change it
//!
//! # Example
//!
//! ```
//! use tui_2048_core::Game;
//! use tui_2048_types::{Direction, GameEvent};
//!
//! // Restore a known board and swipe it
//! let mut game = Game::new(12345);
//! game.restore(&[
//!     vec![2u32, 2, 2, 2],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//! ], 0).unwrap();
//!
//! let events = game.swipe(Direction::Left);
//! assert_eq!(game.score(), 8);
//! assert_eq!(&game.grid()[0][..2], &[4, 4]);
//! assert_eq!(events.last(), Some(&GameEvent::MoveCompleted { changed: true }));
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod line;
pub mod moves;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use error::ValidationError;
pub use game::Game;
pub use grid::Grid;
pub use line::{compact, compact_into, LineStep, LineSummary};
pub use moves::{is_stuck, slide, would_change, Slide};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, SavedGame};
