//! Rasterizer - turns primitives into cell writes
//!
//! Every primitive funnels through [`Rasterizer::set_pixel`], which discards writes
//! outside the buffer and composes the color with what is already in the cell:
//!
//! - alpha `0`: nothing happens
//! - alpha `255`: the cell is replaced
//! - otherwise: additive blend with the accumulated color ([`Color::blend`])
//!
//! Span and box fills clamp their loops to the buffer; everything else relies on the
//! per-pixel bounds check.
//!
//! # Module Structure
//!
//! - [`line`]: Bresenham lines and thick lines
//! - [`circle`]: circle outline and thick circle ring
//! - [`oval`]: rotated ellipse outlines
//! - [`rect`]: filled and outlined rectangles, optionally rotated
//! - [`triangle`]: scanline triangle fill

pub mod circle;
pub mod line;
pub mod oval;
pub mod rect;
pub mod triangle;

use crate::framebuffer::FrameBuffer;
use crate::types::{Color, IVec2};

/// Drawing front-end borrowing a [`FrameBuffer`] for the duration of a frame.
pub struct Rasterizer<'a> {
    fb: &'a mut FrameBuffer,
}

impl<'a> Rasterizer<'a> {
    pub fn new(fb: &'a mut FrameBuffer) -> Self {
        Self { fb }
    }

    pub fn width(&self) -> u16 {
        self.fb.width()
    }

    pub fn height(&self) -> u16 {
        self.fb.height()
    }

    /// Clear the whole buffer to `color` (forced opaque).
    pub fn fill(&mut self, color: Color) {
        self.fb.fill(color);
    }

    /// Compose `color` into the cell at `pos`; out-of-range positions are ignored.
    #[inline]
    pub fn set_pixel(&mut self, pos: IVec2, color: Color) {
        if color.a == 0 || !self.fb.in_bounds(pos) {
            return;
        }
        let (col, row) = (pos.x as usize, pos.y as usize);
        let next = if color.a == 255 {
            color
        } else {
            color.blend(self.fb.pixel_at(col, row))
        };
        self.fb.write_pixel(col, row, next);
    }

    #[inline(always)]
    pub(crate) fn plot(&mut self, x: i32, y: i32, color: Color) {
        self.set_pixel(IVec2::new(x, y), color);
    }

    /// Fill `row` from `left` to `right` inclusive.
    ///
    /// The left bound truncates toward zero, the right bound floors. Columns outside
    /// the buffer would be discarded by `set_pixel` anyway, so the loop is clamped.
    #[inline]
    pub(crate) fn span(&mut self, row: i32, left: f32, right: f32, color: Color) {
        if row < 0 || row >= self.fb.height() as i32 {
            return;
        }
        let start = (left as i32).max(0);
        let end = (right.floor() as i32).min(self.fb.width() as i32 - 1);
        for x in start..=end {
            self.plot(x, row, color);
        }
    }
}

impl FrameBuffer {
    /// Borrow this buffer for drawing.
    pub fn rasterizer(&mut self) -> Rasterizer<'_> {
        Rasterizer::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_pixel_is_a_no_op() {
        let mut fb = FrameBuffer::with_size(4, 4);
        let before = fb.pixels().to_vec();
        fb.rasterizer().set_pixel(IVec2::new(1, 1), Color::new(255, 255, 255, 0));
        assert_eq!(fb.pixels(), &before[..]);
    }

    #[test]
    fn out_of_range_is_discarded() {
        let mut fb = FrameBuffer::with_size(4, 4);
        let mut r = fb.rasterizer();
        r.set_pixel(IVec2::new(-1, 0), Color::WHITE);
        r.set_pixel(IVec2::new(0, 4), Color::WHITE);
        r.set_pixel(IVec2::new(i32::MAX, i32::MIN), Color::WHITE);
        assert!(fb.pixels().iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn partial_alpha_blends_with_accumulated_color() {
        let mut fb = FrameBuffer::with_size(4, 4);
        let c = Color::new(255, 0, 0, 51);
        let mut r = fb.rasterizer();
        r.set_pixel(IVec2::new(2, 2), c);
        r.set_pixel(IVec2::new(2, 2), c);
        assert_eq!(fb.pixel(2, 2).map(|p| p.r), Some(102));
    }

    #[test]
    fn span_is_inclusive() {
        let mut fb = FrameBuffer::with_size(8, 1);
        fb.rasterizer().span(0, 1.7, 4.9, Color::WHITE);
        fb.rasterizer().span(0, -100.0, f32::INFINITY, Color::new(0, 0, 0, 0));
        let lit: Vec<i32> = (0..8)
            .filter(|x| fb.pixel(*x, 0) == Some(Color::WHITE))
            .collect();
        assert_eq!(lit, vec![1, 2, 3, 4]);
    }
}
