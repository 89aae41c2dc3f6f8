//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{shape_matrix, GameSnapshot};
use crossterm::style::Color;

use crate::fb::{rgb, Digits, FrameBuffer, Style};
use crate::types::{Cell, CellState, Phase, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Color = rgb((30, 30, 40));
const PANEL_BG: Color = Color::Black;
const GRID: Color = rgb((90, 90, 100));

/// Lines shown over the empty board before the first game.
const CONTROLS_HELP: [&str; 5] = [
    "← →  move",
    "↑    rotate",
    "↓    soft drop",
    "ENTER start",
    "Q    quit",
];

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen placement of the board frame for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// Terminal renderer for a game snapshot.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Where the bordered board lands in a viewport of this size.
    pub fn board_frame(&self, viewport: Viewport) -> BoardFrame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        BoardFrame { x, y, w, h }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height);

        let frame = self.board_frame(viewport);
        let border = Style::new(rgb((200, 200, 200)), PANEL_BG);
        self.draw_border(fb, frame, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = cell_glyph(*cell);
                self.fill_cell_rect(fb, frame, x as u16, y as u16, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            Phase::NotStarted => {
                let mut lines = [""; CONTROLS_HELP.len() + 2];
                lines[0] = "BLOCKFALL";
                lines[2..].copy_from_slice(&CONTROLS_HELP);
                self.draw_overlay_lines(fb, frame, &lines);
            }
            Phase::GameOver => {
                self.draw_overlay_lines(fb, frame, &["GAME OVER", "", "SCORE", "", "ENTER: again"]);
                // Final score on the blank line under "SCORE".
                let mid = frame.y.saturating_add(frame.h / 2);
                let text_w = Digits::new(snap.progress.score).width();
                let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
                fb.number(x, mid.saturating_add(1), snap.progress.score, overlay_style());
            }
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: BoardFrame, style: Style) {
        let BoardFrame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put(x, y, '┌', style);
        fb.put(x + w - 1, y, '┐', style);
        fb.put(x, y + h - 1, '└', style);
        fb.put(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', style);
            fb.put(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', style);
            fb.put(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: BoardFrame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: Style,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.block(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: BoardFrame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = Style::new(rgb((220, 220, 220)), PANEL_BG).bold();
        let value = Style::new(rgb((200, 200, 200)), PANEL_BG);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.progress.score),
            ("ROWS", snap.progress.rows_cleared),
            ("LEVEL", snap.progress.level),
        ] {
            fb.text(panel_x, y, name, label);
            fb.number(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.text(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next);
        y = y.saturating_add(5);

        fb.text(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        match snap.drop_interval_ms {
            Some(ms) => {
                let end = fb.number(panel_x, y, ms, value);
                fb.text(end.saturating_add(1), y, "ms", value.dim());
                if snap.soft_drop {
                    fb.text(panel_x, y.saturating_add(1), "soft drop", value.dim());
                }
            }
            None => {
                fb.text(panel_x, y, "-", value);
            }
        }
    }

    /// The next shape in its spawn orientation, at one column per cell.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: ShapeKind) {
        let style = Style::new(rgb(kind.rgb()), PANEL_BG).bold();
        for (dx, dy, _) in shape_matrix(kind).occupied() {
            let px = x.saturating_add(dx as u16 * self.cell_w);
            fb.block(px, y.saturating_add(dy as u16), self.cell_w, 1, '█', style);
        }
    }

    /// Centered text lines over the middle of the board frame.
    fn draw_overlay_lines(&self, fb: &mut FrameBuffer, frame: BoardFrame, lines: &[&str]) {
        let style = overlay_style();
        let top = frame
            .y
            .saturating_add(frame.h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
            fb.text(x, top.saturating_add(i as u16), text, style);
        }
    }
}

fn overlay_style() -> Style {
    Style::new(Color::White, PANEL_BG).bold()
}

/// Glyph for one board cell, by state.
fn cell_glyph(cell: Cell) -> (char, Style) {
    let color = cell
        .occupancy
        .map(|k| rgb(k.rgb()))
        .unwrap_or(GRID);
    match cell.state {
        CellState::Merged => ('█', Style::new(color, PLAY_BG)),
        CellState::Colliding => ('█', Style::new(color, PLAY_BG).bold()),
        CellState::Clear => ('░', Style::new(color, PLAY_BG).dim()),
        CellState::Empty => ('·', Style::new(GRID, PLAY_BG).dim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Weight;

    #[test]
    fn cell_glyphs_follow_state() {
        assert_eq!(cell_glyph(Cell::EMPTY).0, '·');
        assert_eq!(cell_glyph(Cell::new(ShapeKind::T, CellState::Merged)).0, '█');
        assert_eq!(cell_glyph(Cell::new(ShapeKind::T, CellState::Clear)).0, '░');
        let falling = cell_glyph(Cell::new(ShapeKind::Z, CellState::Colliding)).1;
        assert_eq!(falling.weight, Weight::Bold);
        assert_eq!(falling.fg, rgb(ShapeKind::Z.rgb()));
    }

    #[test]
    fn board_frame_is_centered() {
        let view = GameView::default();
        let frame = view.board_frame(Viewport::new(80, 30));
        assert_eq!((frame.w, frame.h), (26, 22));
        assert_eq!((frame.x, frame.y), (27, 4));
        let top = view.with_anchor_y(AnchorY::Top).board_frame(Viewport::new(80, 30));
        assert_eq!(top.y, 0);
    }
}
