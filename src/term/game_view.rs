//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot, RotationMask, ShapeCatalog};
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, GRID_HEIGHT, GRID_WIDTH};

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

/// Cell colors, indexed by color id (index 0 is the empty background).
const CELL_COLORS: [Rgb; 13] = [
    Rgb::new(0, 0, 0),
    Rgb::new(0, 240, 240),   // cyan
    Rgb::new(0, 0, 240),     // blue
    Rgb::new(240, 160, 0),   // orange
    Rgb::new(240, 240, 0),   // yellow
    Rgb::new(0, 240, 0),     // green
    Rgb::new(160, 0, 240),   // purple
    Rgb::new(240, 0, 0),     // red
    Rgb::new(255, 105, 180), // pink
    Rgb::new(0, 206, 209),   // dark turquoise
    Rgb::new(255, 215, 0),   // gold
    Rgb::new(255, 20, 147),  // deep pink
    Rgb::new(50, 205, 50),   // lime green
];

fn color_rgb(color: ColorId) -> Rgb {
    CELL_COLORS
        .get(color as usize)
        .copied()
        .unwrap_or(Rgb::new(128, 128, 128))
}

/// Renders the playfield, next-piece preview, stats, and overlays.
pub struct GameView {
    catalog: ShapeCatalog,
    /// Board cell width in terminal columns (2x1 compensates for the
    /// typical terminal glyph aspect ratio).
    cell_w: u16,
}

impl GameView {
    pub fn new(catalog: ShapeCatalog) -> Self {
        Self { catalog, cell_w: 2 }
    }

    fn mask(&self, piece: &PieceSnapshot) -> Option<RotationMask> {
        let shape = self.catalog.get(piece.shape as usize)?;
        shape.rotations.get(piece.rotation as usize).copied()
    }

    /// Render a snapshot into a fresh framebuffer.
    pub fn render(&self, snapshot: &GameSnapshot, paused: bool, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_w = GRID_WIDTH as u16 * self.cell_w;
        let board_h = GRID_HEIGHT as u16;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + 18) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let field = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(20, 20, 28),
            bold: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_w, board_h, ' ', field);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for y in 0..GRID_HEIGHT as usize {
            for x in 0..GRID_WIDTH as usize {
                let color = snapshot.board[y][x];
                if color != 0 {
                    self.draw_board_cell(&mut fb, start_x, start_y, x as u16, y as u16, color);
                }
            }
        }

        // Active piece (kept visible in the game-over state as well).
        if let Some(mask) = self.mask(&snapshot.active) {
            for (cx, cy) in mask.cells() {
                let x = snapshot.active.x + cx;
                let y = snapshot.active.y + cy;
                if x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8 {
                    self.draw_board_cell(
                        &mut fb,
                        start_x,
                        start_y,
                        x as u16,
                        y as u16,
                        snapshot.active.color,
                    );
                }
            }
        }

        self.draw_side_panel(&mut fb, snapshot, viewport, start_x, start_y, frame_w);

        if paused {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if snapshot.game_over {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        color: ColorId,
    ) {
        let style = CellStyle {
            fg: color_rgb(color),
            bg: Rgb::new(20, 20, 28),
            bold: true,
        };
        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y;
        fb.fill_rect(px, py, self.cell_w, 1, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snapshot: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x + 12 >= viewport.width {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };
        let dim = CellStyle {
            fg: Rgb::new(128, 128, 128),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        if let Some(mask) = self.mask(&snapshot.next) {
            let style = CellStyle {
                fg: color_rgb(snapshot.next.color),
                bg: Rgb::new(0, 0, 0),
                bold: true,
            };
            for (cx, cy) in mask.cells() {
                fb.put_str(panel_x + cx as u16 * 2, y + cy as u16, "██", style);
            }
        }
        y += 6;

        for (name, amount) in [
            ("SCORE", snapshot.score),
            ("LEVEL", snapshot.level),
            ("LINES", snapshot.lines_cleared),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x + 7, y, &format!("{amount}"), value);
            y += 2;
        }

        let controls = [
            "← → move",
            "↑ rotate",
            "↓ soft drop",
            "space hard drop",
            "p pause  r reset",
            "q quit",
        ];
        for line in controls {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        fb.put_str(x, mid_y, text, style);
    }
}
