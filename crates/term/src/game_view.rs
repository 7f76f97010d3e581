//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Tetromino};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{cell_from_code, GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Where the board frame landed in the last layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
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
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
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

    /// Board frame size in terminal cells, border included
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes. Clearing rows are drawn highlighted.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_flash(snap, true, viewport, fb);
    }

    /// Like [`GameView::render_into`], with the clearing-row highlight
    /// switched by the caller's animation.
    pub fn render_into_with_flash(
        &self,
        snap: &GameSnapshot,
        flash_on: bool,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let layout = Layout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(
            fb,
            layout,
            CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        self.draw_locked_cells(fb, layout, snap, flash_on);

        if matches!(snap.phase, GamePhase::Playing | GamePhase::Paused) {
            if let Some(ghost) = snap.ghost {
                let style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
                for (x, y) in on_board(&ghost) {
                    self.fill_cell_rect(fb, layout, x, y, '░', style);
                }
            }
            for (x, y) in on_board(&snap.current) {
                self.fill_cell_rect(fb, layout, x, y, '█', piece_style(snap.current.kind));
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        match snap.phase {
            GamePhase::Title => {
                draw_overlay(fb, layout, &["BLOCKTRIS", "", "ENTER TO START", "Q TO QUIT"]);
            }
            GamePhase::Paused => draw_overlay(fb, layout, &["PAUSED", "", "P TO RESUME"]),
            GamePhase::GameOver => {
                let record = snap.score > 0 && snap.score >= snap.high_score;
                let headline = if record { "NEW HIGH SCORE!" } else { "" };
                draw_overlay(fb, layout, &["GAME OVER", headline, "R TO RETRY", "Q TO QUIT"]);
            }
            GamePhase::Playing | GamePhase::LineClearAnimation => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_locked_cells(&self, fb: &mut FrameBuffer, layout: Layout, snap: &GameSnapshot, flash_on: bool) {
        let flash = CellStyle::new(Rgb::new(255, 255, 255), PLAY_BG).bold();
        let grid = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();

        for (y, row) in snap.board.iter().enumerate() {
            let clearing = flash_on && snap.is_clearing_row(y);
            for (x, &code) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell_from_code(code) {
                    _ if clearing => self.fill_cell_rect(fb, layout, x, y, '█', flash),
                    Some(kind) => self.fill_cell_rect(fb, layout, x, y, '█', piece_style(kind)),
                    None => self.fill_cell_rect(fb, layout, x, y, '·', grid),
                }
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.x + 1 + cell_x * self.cell_w;
        let py = layout.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout.x.saturating_add(layout.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let gold = CellStyle::new(Rgb::new(255, 215, 0), SCREEN_BG);

        let mut y = layout.y;
        for (name, n, style) in [
            ("SCORE", snap.score, value),
            ("HIGH", snap.high_score, gold),
            ("LEVEL", snap.level, value),
            ("LINES", snap.lines, value),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, style);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y + 1, snap.next.kind, false);
        y = y.saturating_add(5);

        let end = fb.put_str(panel_x, y, "HOLD", label);
        if !snap.can_hold {
            fb.put_str(end + 1, y, "(used)", value.dim());
        }
        match snap.held {
            Some(kind) => self.draw_preview(fb, panel_x, y + 1, kind, !snap.can_hold),
            None => {
                fb.put_char(panel_x, y + 1, '-', value);
            }
        }
    }

    /// Draw `kind` in spawn orientation, trimmed to its occupied rows.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dim: bool) {
        let piece = Tetromino::at(kind, 0, 0);
        let top = piece.cells().map(|(_, row)| row).min().unwrap_or(0);
        let style = if dim {
            piece_style(kind).dim()
        } else {
            piece_style(kind)
        };

        for (col, row) in piece.cells() {
            let px = x + col as u16 * self.cell_w;
            let py = y + (row - top) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', CellStyle { bg: SCREEN_BG, ..style });
        }
    }
}

fn on_board(piece: &Tetromino) -> impl Iterator<Item = (u16, u16)> {
    piece.cells().filter_map(|(x, y)| {
        let inside = (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y);
        inside.then_some((x as u16, y as u16))
    })
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, PLAY_BG).bold()
}

fn draw_border(fb: &mut FrameBuffer, l: Layout, style: CellStyle) {
    if l.w < 2 || l.h < 2 {
        return;
    }
    let (right, bottom) = (l.x + l.w - 1, l.y + l.h - 1);

    fb.put_char(l.x, l.y, '┌', style);
    fb.put_char(right, l.y, '┐', style);
    fb.put_char(l.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);

    for x in l.x + 1..right {
        fb.put_char(x, l.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in l.y + 1..bottom {
        fb.put_char(l.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}

/// Centered block of lines over the board; empty lines are skipped but keep
/// their slot.
fn draw_overlay(fb: &mut FrameBuffer, l: Layout, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let top = l.y + (l.h / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, line) in lines.iter().enumerate() {
        if !line.is_empty() {
            fb.put_str_centered(l.x, l.w, top + i as u16, line, style);
        }
    }
}
