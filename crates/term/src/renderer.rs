//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is written in
//! full; later frames only rewrite runs of cells that differ from the previous
//! frame. Colours are emitted as xterm 256-colour indices.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::Color256;

pub struct TerminalRenderer {
    stdout: io::Stdout,
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

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, diffing against the previously drawn one.
    ///
    /// The view keeps `fb` persistent across frames, so the previous frame is
    /// kept as a copy rather than swapped out.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        let same_size = |prev: &&mut FrameBuffer| {
            prev.width() == fb.width() && prev.height() == fb.height()
        };
        if let Some(prev) = self.last.as_mut().filter(same_size) {
            encode_diff_into(prev, fb, &mut self.buf)?;
            prev.clone_from(fb);
        } else {
            encode_full_into(fb, &mut self.buf)?;
            self.last = Some(fb.clone());
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Writes cells to a command buffer, emitting style changes only when the
/// style differs from the previous cell's.
struct StyledWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> StyledWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            apply_style_into(self.out, cell.style)?;
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a clear followed by every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?
        .queue(cursor::MoveTo(0, 0))?;

    let mut writer = StyledWriter::new(out);
    let width = fb.width() as usize;
    if width > 0 {
        for (y, row) in fb.cells().chunks(width).enumerate() {
            if y > 0 {
                writer.out.queue(Print("\r\n"))?;
            }
            for &cell in row {
                writer.cell(cell)?;
            }
        }
    }
    writer.finish()
}

/// Encode only the cells of `next` that differ from `prev` into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let runs = changed_runs(prev, next);
    let mut writer = StyledWriter::new(out);
    for run in runs {
        writer.out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            writer.cell(next.get(x, run.y).unwrap_or_default())?;
        }
    }
    writer.finish()
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    // Attribute::Reset also drops colours, so it goes first.
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(palette_color(style.fg)))?
        .queue(SetBackgroundColor(palette_color(style.bg)))?;
    let flags = [
        (style.bold, Attribute::Bold),
        (style.dim, Attribute::Dim),
        (style.reverse, Attribute::Reverse),
    ];
    for (_, attr) in flags.into_iter().filter(|(on, _)| *on) {
        out.queue(SetAttribute(attr))?;
    }
    Ok(())
}

fn palette_color(c: Color256) -> Color {
    Color::AnsiValue(c.0)
}

/// A horizontal stretch of cells that must be rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Maximal runs of differing cells, row by row. Frames of different sizes
/// yield one run per row of `next`.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| Run { x: 0, y, len: w }).collect();
    }
    if w == 0 {
        return Vec::new();
    }

    let rows = prev.cells().chunks(w as usize).zip(next.cells().chunks(w as usize));
    let mut runs = Vec::new();
    for (y, (old, new)) in rows.enumerate() {
        let mut open: Option<u16> = None;
        for x in 0..=w {
            let differs = x < w && old[x as usize] != new[x as usize];
            match (open, differs) {
                (None, true) => open = Some(x),
                (Some(start), false) => {
                    runs.push(Run {
                        x: start,
                        y: y as u16,
                        len: x - start,
                    });
                    open = None;
                }
                _ => {}
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_encode_prints_every_cell() {
        let mut fb = FrameBuffer::new(2, 2);
        let style = CellStyle::fg(Color256::BLUE);
        for (i, ch) in "ABCD".chars().enumerate() {
            fb.set(i as u16 % 2, i as u16 / 2, style.into_cell(ch));
        }

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("AB\r\nCD"));
        assert_eq!(palette_color(style.fg), Color::AnsiValue(21));
    }

    #[test]
    fn identical_frames_have_no_runs() {
        let a = FrameBuffer::new(4, 2);
        assert!(changed_runs(&a, &a.clone()).is_empty());

        let mut out = Vec::new();
        encode_diff_into(&a, &a, &mut out).unwrap();
        let mut reset_only = Vec::new();
        StyledWriter::new(&mut reset_only).finish().unwrap();
        assert_eq!(out, reset_only);
    }

    #[test]
    fn adjacent_changes_form_one_run() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = a.clone();
        for x in 1..=3 {
            b.set(x, 0, style.into_cell('X'));
        }
        b.set(5, 1, style.into_cell('Y'));

        assert_eq!(
            changed_runs(&a, &b),
            vec![Run { x: 1, y: 0, len: 3 }, Run { x: 5, y: 1, len: 1 }]
        );
    }

    #[test]
    fn resized_frames_rewrite_every_row() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(2, 2);
        assert_eq!(
            changed_runs(&a, &b),
            vec![Run { x: 0, y: 0, len: 2 }, Run { x: 0, y: 1, len: 2 }]
        );
    }
}
