//! TerminalRenderer: flushes frame buffers to the real terminal.
//!
//! The first frame and any frame after a resize are drawn in full; every other
//! frame only rewrites the horizontal runs of cells that changed.

use std::io::{self, Write};
use std::mem;

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written; None forces a full redraw
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next frame to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents the caller can render over,
    /// so two buffers cycle between caller and renderer without cloning.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame_into(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        let prev = match self.last.take() {
            Some(mut prev) => {
                mem::swap(&mut prev, fb);
                prev
            }
            None => {
                let mut spare = FrameBuffer::new(fb.width(), fb.height());
                mem::swap(&mut spare, fb);
                spare
            }
        };
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode `next` into `out` as crossterm commands, diffing against `prev`
/// when it has the same size and redrawing everything otherwise.
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut pen = Pen::default();

    match prev {
        Some(prev) if prev.same_size(next) => {
            for (x, y, len) in changed_runs(prev, next) {
                out.queue(cursor::MoveTo(x, y))?;
                for dx in 0..len {
                    pen.print(out, next, x + dx, y)?;
                }
            }
        }
        _ => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                out.queue(cursor::MoveTo(0, y))?;
                for x in 0..next.width() {
                    pen.print(out, next, x, y)?;
                }
            }
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Tracks the active style so repeated styles are not re-sent.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, fb: &FrameBuffer, x: u16, y: u16) -> Result<()> {
        let cell = fb.get(x, y).unwrap_or_default();
        if self.style != Some(cell.style) {
            apply_style(out, cell.style)?;
            self.style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }
}

fn apply_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Maximal runs `(x, y, len)` of differing cells, row by row.
/// Both buffers must have the same size.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let w = next.width() as usize;
    let mut runs = Vec::new();
    if w == 0 {
        return runs;
    }

    for (y, (a, b)) in prev
        .cells()
        .chunks(w)
        .zip(next.cells().chunks(w))
        .enumerate()
    {
        let mut x = 0;
        while x < w {
            if a[x] == b[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && a[x] != b[x] {
                x += 1;
            }
            runs.push((start as u16, y as u16, (x - start) as u16));
        }
    }
    runs
}
