//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep the view pure so layout can be asserted without a terminal

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{format_u64, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_style, GameView, Hud, Viewport};
pub use renderer::{encode_full_into, TerminalRenderer};
