//! TerminalRenderer: flushes a frame buffer's cells to a real terminal.
//!
//! Each cell carries a 4-bit foreground and a 4-bit background palette index; the
//! renderer resolves both through the frame buffer's [`Palette`] and emits true-color
//! escape sequences. Output is assembled in a reusable byte buffer and written with a
//! single `write_all` per frame.

use std::io::{self, Write};

use anyhow::{Context, Result};
use log::debug;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{Cell, FrameBuffer, Palette};
use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Vec<Cell>,
    last_size: Option<(u16, u16)>,
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
            last: Vec::new(),
            last_size: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.invalidate();
        debug!("terminal entered");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        debug!("terminal restored");
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last_size = None;
    }

    /// Copy the finished cells of `fb` to the terminal.
    ///
    /// The first frame, and any frame whose size differs from the previous one, is a
    /// full redraw; otherwise only changed runs are sent. The previous frame is kept in
    /// a buffer that is reused across frames.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let size = (fb.width(), fb.height());
        self.buf.clear();
        if self.last_size == Some(size) {
            encode_diff_into(&self.last, fb, &mut self.buf)?;
        } else {
            debug!("full redraw {}x{}", size.0, size.1);
            encode_full_into(fb, &mut self.buf)?;
            self.last_size = Some(size);
        }
        self.flush_buf()?;

        self.last.clear();
        self.last.extend_from_slice(fb.flush());
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Current terminal size in cells.
pub fn terminal_size() -> Result<(u16, u16)> {
    terminal::size().context("query terminal size")
}

/// Set the terminal window title on `out`.
pub fn set_title(out: &mut impl Write, title: &str) -> Result<()> {
    out.queue(terminal::SetTitle(title))?;
    out.flush()?;
    Ok(())
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let palette = fb.palette();
    let width = fb.width() as usize;
    let mut current: Option<u8> = None;
    for (y, row) in fb.flush().chunks(width.max(1)).enumerate() {
        for cell in row {
            if current != Some(cell.attribute) {
                apply_attribute_into(out, palette, *cell)?;
                current = Some(cell.attribute);
            }
            out.queue(Print(cell.glyph))?;
        }
        if y + 1 < fb.height() as usize {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// `prev` must hold the cells of a frame with the same dimensions as `next`.
pub fn encode_diff_into(prev: &[Cell], next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let palette = next.palette();
    let cells = next.flush();
    let width = next.width();
    let mut current: Option<u8> = None;

    for_each_changed_run(prev, cells, width, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        let start = y as usize * width as usize + x as usize;
        for cell in &cells[start..start + len as usize] {
            if current != Some(cell.attribute) {
                apply_attribute_into(out, palette, *cell)?;
                current = Some(cell.attribute);
            }
            out.queue(Print(cell.glyph))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_attribute_into(out: &mut Vec<u8>, palette: &Palette, cell: Cell) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(palette.color(cell.fg()))))?;
    out.queue(SetBackgroundColor(rgb_to_color(palette.color(cell.bg()))))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every maximal run of cells that differ between frames.
///
/// A length mismatch treats every row as one dirty run.
fn for_each_changed_run(
    prev: &[Cell],
    next: &[Cell],
    width: u16,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if width == 0 {
        return Ok(());
    }
    let w = width as usize;

    if prev.len() != next.len() {
        for y in 0..next.len() / w {
            f(0, y as u16, width)?;
        }
        return Ok(());
    }

    for (y, (a_row, b_row)) in prev.chunks(w).zip(next.chunks(w)).enumerate() {
        let mut x = 0;
        while x < w {
            if a_row[x] == b_row[x] {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && a_row[x] != b_row[x] {
                x += 1;
            }
            f(start as u16, y as u16, (x - start) as u16)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Shade;
    use crate::types::{Color as Rgba, IVec2};

    fn count(haystack: &[u8], needle: char) -> usize {
        String::from_utf8_lossy(haystack)
            .chars()
            .filter(|c| *c == needle)
            .count()
    }

    #[test]
    fn style_conversion_is_true_color() {
        assert_eq!(
            rgb_to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let blank = Cell::default();
        let x = Cell {
            glyph: 'X',
            attribute: 0x0F,
        };
        let a = vec![blank; 5];
        let mut b = a.clone();
        for cell in &mut b[1..=3] {
            *cell = x;
        }

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, 5, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn changed_runs_do_not_cross_rows() {
        let blank = Cell::default();
        let x = Cell {
            glyph: 'X',
            attribute: 0x0F,
        };
        let a = vec![blank; 6];
        let mut b = a.clone();
        b[2] = x;
        b[3] = x;

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, 3, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(2, 0, 1), (0, 1, 1)]);
    }

    #[test]
    fn size_mismatch_marks_every_row() {
        let a = vec![Cell::default(); 4];
        let b = vec![Cell::default(); 6];
        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, 3, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(0, 0, 3), (0, 1, 3)]);
    }

    #[test]
    fn full_redraw_prints_every_cell() {
        let fb = FrameBuffer::with_size(4, 3);
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        assert_eq!(count(&out, Shade::Full.glyph()), 12);
    }

    #[test]
    fn diff_redraw_prints_only_changed_cells() {
        let mut fb = FrameBuffer::with_size(4, 3);
        let prev = fb.flush().to_vec();

        let mut out = Vec::new();
        encode_diff_into(&prev, &fb, &mut out).unwrap();
        assert_eq!(count(&out, Shade::Full.glyph()), 0);

        fb.rasterizer().set_pixel(IVec2::new(1, 1), Rgba::rgb(128, 128, 128));
        out.clear();
        encode_diff_into(&prev, &fb, &mut out).unwrap();
        assert_eq!(count(&out, Shade::Full.glyph()), 1);
    }
}
