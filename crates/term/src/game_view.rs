//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Values shown next to the board that the engine does not track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub best_score: u64,
}

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// A lightweight terminal renderer for the 2048 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 fits a six-digit tile with padding and keeps tiles roughly square.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: Hud,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        // Layout is computed wide and clamped; oversized boards are clipped.
        let size = snap.size as u64;
        let step_x = u64::from(self.cell_w) + 1;
        let step_y = u64::from(self.cell_h) + 1;
        // One column/row of board background between tiles and around the edge.
        let board_w = clamp_u16(size.saturating_mul(step_x).saturating_add(1));
        let board_h = clamp_u16(size.saturating_mul(step_y).saturating_add(1));
        let frame_h = board_h.saturating_add(4);

        let start_x = viewport.width.saturating_sub(board_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_header(fb, snap, hud, start_x, start_y);

        let board_y = start_y.saturating_add(2);
        let board_style = CellStyle::new(BOARD_BG, BOARD_BG);
        fb.fill_rect(start_x, board_y, board_w, board_h, ' ', board_style);

        for row in 0..snap.size {
            let y = u64::from(board_y) + 1 + row as u64 * step_y;
            if y >= u64::from(viewport.height) {
                break;
            }
            for col in 0..snap.size {
                let x = u64::from(start_x) + 1 + col as u64 * step_x;
                if x >= u64::from(viewport.width) {
                    break;
                }
                let value = snap.tile(row, col);
                self.draw_tile(fb, clamp_u16(x), clamp_u16(y), value);
            }
        }

        let footer_y = board_y.saturating_add(board_h).saturating_add(1);
        if snap.game_over {
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_centered(start_x, footer_y, board_w, "GAME OVER - r to restart", style);
        } else if snap.reached_target {
            let style = CellStyle::new(Rgb::new(237, 194, 46), Rgb::new(0, 0, 0)).bold();
            let mut buf = [0u8; 20];
            let tile = crate::fb::format_u64(u64::from(snap.win_tile), &mut buf);
            let x = start_x.saturating_add(board_w.saturating_sub(20) / 2);
            let x = fb.put_str(x, footer_y, "Reached ", style);
            let x = fb.put_str(x, footer_y, tile, style);
            fb.put_str(x, footer_y, "!", style);
        } else {
            let style = CellStyle::new(Rgb::new(140, 140, 140), Rgb::new(0, 0, 0));
            fb.put_centered(start_x, footer_y, board_w, "arrows/hjkl/wasd  r  q", style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_header(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: Hud,
        x: u16,
        y: u16,
    ) {
        let label = CellStyle::default().bold();
        let value = CellStyle::default();

        let title = CellStyle::new(Rgb::new(237, 194, 46), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, "2048", title);

        let mut cx = x.saturating_add(6);
        cx = fb.put_str(cx, y, "SCORE ", label);
        cx = fb.put_u64(cx, y, snap.score, value);
        cx = fb.put_str(cx.saturating_add(2), y, "BEST ", label);
        cx = fb.put_u64(cx, y, hud.best_score.max(snap.score), value);
        cx = fb.put_str(cx.saturating_add(2), y, "MOVES ", label);
        fb.put_u64(cx, y, u64::from(snap.moves), value);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, value: u32) {
        let style = tile_style(value);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);
        if value == 0 {
            return;
        }
        let mut buf = [0u8; 20];
        let label = crate::fb::format_u64(u64::from(value), &mut buf);
        fb.put_centered(x, y.saturating_add(self.cell_h / 2), self.cell_w, label, style.bold());
    }
}

fn clamp_u16(value: u64) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Classic 2048 palette; values past 2048 share one color.
pub fn tile_style(value: u32) -> CellStyle {
    let (bg, fg) = match value {
        0 => (EMPTY_BG, DARK_TEXT),
        2 => (Rgb::new(238, 228, 218), DARK_TEXT),
        4 => (Rgb::new(237, 224, 200), DARK_TEXT),
        8 => (Rgb::new(242, 177, 121), LIGHT_TEXT),
        16 => (Rgb::new(245, 149, 99), LIGHT_TEXT),
        32 => (Rgb::new(246, 124, 95), LIGHT_TEXT),
        64 => (Rgb::new(246, 94, 59), LIGHT_TEXT),
        128 => (Rgb::new(237, 207, 114), LIGHT_TEXT),
        256 => (Rgb::new(237, 204, 97), LIGHT_TEXT),
        512 => (Rgb::new(237, 200, 80), LIGHT_TEXT),
        1024 => (Rgb::new(237, 197, 63), LIGHT_TEXT),
        2048 => (Rgb::new(237, 194, 46), LIGHT_TEXT),
        _ => (Rgb::new(60, 58, 50), LIGHT_TEXT),
    };
    CellStyle::new(fg, bg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_colors_differ_by_value() {
        assert_ne!(tile_style(2), tile_style(4));
        assert_eq!(tile_style(4096), tile_style(8192));
        assert_eq!(tile_style(0).bg, EMPTY_BG);
    }

    #[test]
    fn oversized_board_is_clipped_not_overflowed() {
        let snap = GameSnapshot {
            size: 9000,
            ..GameSnapshot::default()
        };
        let fb = GameView::default().render(&snap, Hud::default(), Viewport::new(80, 24));
        assert_eq!((fb.width(), fb.height()), (80, 24));

        let view = GameView::new(u16::MAX, u16::MAX);
        let snap = GameSnapshot {
            size: 4,
            grid: vec![vec![2; 4]; 4],
            ..GameSnapshot::default()
        };
        let fb = view.render(&snap, Hud::default(), Viewport::new(u16::MAX, 2));
        assert_eq!(fb.width(), u16::MAX);
    }

    #[test]
    fn new_clamps_zero_dimensions() {
        assert_eq!(GameView::new(0, 0), GameView::new(1, 1));
    }
}
