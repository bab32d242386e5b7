//! GameView: maps a session [`Snapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::Snapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, Status, BOARD_HEIGHT, BOARD_WIDTH};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const CONTROLS: [(&str, &str); 7] = [
    ("←→", "move"),
    ("↑", "rotate"),
    ("↓", "soft drop"),
    ("space", "hard drop"),
    ("p", "pause"),
    ("enter", "new game"),
    ("q", "quit"),
];

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

/// Playfield plus side panel, centered in the viewport.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares typical glyphs.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let origin_x = viewport.width.saturating_sub(frame_w + PANEL_MIN_W) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        // The overlay grid already clips the active piece to visible cells.
        for (row, cells) in snap.overlay.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(color) => ('█', CellStyle::new(rgb(*color), PLAYFIELD_BG).bold()),
                    None => ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim()),
                };
                let px = origin_x + 1 + col as u16 * self.cell_w;
                let py = origin_y + 1 + row as u16;
                fb.fill_rect(px, py, self.cell_w, 1, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin_x + frame_w + 2, origin_y);

        let banner = match snap.status {
            Status::Idle => Some("PRESS ENTER"),
            Status::Paused => Some("PAUSED"),
            Status::GameOver => Some("GAME OVER"),
            Status::Playing => None,
        };
        if let Some(text) = banner {
            self.draw_banner(fb, origin_x, origin_y, frame_w, frame_h, text);
        }
    }

    /// Allocate a framebuffer and render into it.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let right = x + w - 1;
        let bottom = y + h - 1;

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for cx in x + 1..right {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            fb.put_char(x, cy, '│', style);
            fb.put_char(right, cy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &Snapshot,
        viewport: Viewport,
        x: u16,
        top: u16,
    ) {
        if x >= viewport.width || viewport.width - x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = top;
        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(x, y, "STATUS", label);
        fb.put_str(x, y + 1, status_label(snap.status), value);
        y += 3;

        fb.put_str(x, y, "CONTROLS", label);
        for (key, action) in CONTROLS {
            y += 1;
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, key, value);
            fb.put_str(x + 7, y, action, hint);
        }
    }

    fn draw_banner(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let text_w = text.chars().count() as u16;
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(
            x + frame_w.saturating_sub(text_w) / 2,
            y + frame_h / 2,
            text,
            style,
        );
    }
}

/// Width reserved for the side panel when centering.
const PANEL_MIN_W: u16 = 20;

fn status_label(status: Status) -> &'static str {
    match status {
        Status::Idle => "READY",
        Status::Playing => "PLAYING",
        Status::Paused => "PAUSED",
        Status::GameOver => "GAME OVER",
    }
}

/// Terminal color for a board color identifier.
pub fn rgb(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
    }
}
