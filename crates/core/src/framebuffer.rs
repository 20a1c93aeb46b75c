//! Frame buffer - the per-cell state the rasterizer draws into
//!
//! Two parallel buffers are kept for every cell:
//!
//! - the **accumulation buffer** holds the true color of each cell in primitive space
//!   (row 0 is the *bottom* row), and is what blending reads from;
//! - the **rendered-cell buffer** holds the quantized glyph and attribute in display
//!   order (row 0 is the *top* row), and is what gets flushed to the terminal.
//!
//! In [`RenderMode::Depth`] a depth buffer (one `f32` per cell) and an edge buffer (one
//! span per row) are carried as well. Nothing in the 2D primitives reads them; they are
//! reset every frame so a scanline rasterizer can build on them.

use std::sync::Arc;

use log::debug;

use crate::palette::{Palette, Quantized};
use crate::types::{Color, IVec2};

/// Depth value written on reset ("infinitely far").
pub const FAR_DEPTH: f32 = f32::INFINITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// 2D drawing only.
    #[default]
    Flat,
    /// Pseudo-3D: also maintain depth and edge buffers.
    Depth,
}

/// A single rendered cell: glyph plus a two-color attribute (`fg | bg << 4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: char,
    pub attribute: u8,
}

impl Cell {
    pub const fn fg(self) -> usize {
        (self.attribute & 0x0F) as usize
    }

    pub const fn bg(self) -> usize {
        (self.attribute >> 4) as usize
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            attribute: 0,
        }
    }
}

impl From<Quantized> for Cell {
    fn from(q: Quantized) -> Self {
        Self {
            glyph: q.glyph(),
            attribute: q.attribute,
        }
    }
}

/// Horizontal extent of a polygon on one row, used by scanline fills in depth mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpan {
    pub left: i32,
    pub right: i32,
}

impl EdgeSpan {
    pub const EMPTY: EdgeSpan = EdgeSpan {
        left: i32::MAX,
        right: i32::MIN,
    };

    pub fn is_empty(&self) -> bool {
        self.left > self.right
    }

    /// Grow the span to include `x`.
    pub fn include(&mut self, x: i32) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
    }
}

impl Default for EdgeSpan {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Owned cell grid with fixed dimensions between resizes.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    mode: RenderMode,
    background: Color,
    palette: Arc<Palette>,
    pixels: Vec<Color>,
    cells: Vec<Cell>,
    depth: Vec<f32>,
    edges: Vec<EdgeSpan>,
}

impl FrameBuffer {
    /// Allocate a buffer and reset it to black.
    pub fn new(width: u16, height: u16, mode: RenderMode, palette: Arc<Palette>) -> Self {
        let mut fb = Self {
            width: 0,
            height: 0,
            mode,
            background: Color::BLACK,
            palette,
            pixels: Vec::new(),
            cells: Vec::new(),
            depth: Vec::new(),
            edges: Vec::new(),
        };
        fb.resize(width, height);
        fb
    }

    /// 2D buffer over the shared console palette.
    pub fn with_size(width: u16, height: u16) -> Self {
        Self::new(width, height, RenderMode::Flat, Palette::shared())
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Color used by [`FrameBuffer::reset`]; alpha is forced opaque.
    pub fn set_background(&mut self, color: Color) {
        self.background = color.opaque();
    }

    /// Reallocate every buffer for new dimensions and reset.
    ///
    /// Takes `&mut self`, so no drawing can be in flight across a resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            debug!(
                "frame buffer resize {}x{} -> {}x{}",
                self.width, self.height, width, height
            );
        }
        self.width = width;
        self.height = height;
        let len = width as usize * height as usize;
        self.pixels.clear();
        self.pixels.resize(len, self.background);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
        self.depth.clear();
        if self.mode == RenderMode::Depth {
            self.depth.resize(len, FAR_DEPTH);
        }
        self.edges.clear();
        self.edges.resize(height as usize, EdgeSpan::EMPTY);
        self.reset();
    }

    /// Clear to the background color (and depth/edge sentinels in depth mode).
    pub fn reset(&mut self) {
        let background = self.background;
        self.fill_color(background);
        if self.mode == RenderMode::Depth {
            self.depth.fill(FAR_DEPTH);
            self.edges.fill(EdgeSpan::EMPTY);
        }
    }

    /// Clear every cell to `color` (forced opaque) without changing the background.
    ///
    /// The edge buffer is always cleared; the depth buffer only in depth mode.
    pub fn fill(&mut self, color: Color) {
        self.fill_color(color.opaque());
        self.edges.fill(EdgeSpan::EMPTY);
        if self.mode == RenderMode::Depth {
            self.depth.fill(FAR_DEPTH);
        }
    }

    fn fill_color(&mut self, color: Color) {
        let cell = Cell::from(self.palette.quantize(color.to_rgb()));
        self.pixels.fill(color);
        self.cells.fill(cell);
    }

    #[inline(always)]
    pub fn in_bounds(&self, p: IVec2) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width as i32 && p.y < self.height as i32
    }

    /// Write the true color of a cell and its quantized glyph.
    ///
    /// `row` is in primitive space (0 = bottom).
    ///
    /// # Panics
    ///
    /// Panics if `(col, row)` is outside the buffer. Callers outside the crate should
    /// go through [`Rasterizer::set_pixel`](crate::raster::Rasterizer::set_pixel),
    /// which discards out-of-range writes.
    #[inline]
    pub fn write_pixel(&mut self, col: usize, row: usize, color: Color) {
        let w = self.width as usize;
        let h = self.height as usize;
        assert!(col < w && row < h, "write_pixel({col}, {row}) outside {w}x{h}");
        self.pixels[row * w + col] = color;
        self.cells[(h - 1 - row) * w + col] = Cell::from(self.palette.quantize(color.to_rgb()));
    }

    /// Accumulated color at `(col, row)` in primitive space.
    pub fn pixel(&self, col: i32, row: i32) -> Option<Color> {
        if !self.in_bounds(IVec2::new(col, row)) {
            return None;
        }
        Some(self.pixels[row as usize * self.width as usize + col as usize])
    }

    /// Rendered cell at `(col, display_row)`; display row 0 is the top row.
    pub fn cell(&self, col: u16, display_row: u16) -> Option<Cell> {
        if col >= self.width || display_row >= self.height {
            return None;
        }
        Some(self.cells[display_row as usize * self.width as usize + col as usize])
    }

    #[inline(always)]
    pub(crate) fn pixel_at(&self, col: usize, row: usize) -> Color {
        self.pixels[row * self.width as usize + col]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Empty unless in depth mode.
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    pub fn depth_mut(&mut self) -> &mut [f32] {
        &mut self.depth
    }

    pub fn edges(&self) -> &[EdgeSpan] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [EdgeSpan] {
        &mut self.edges
    }

    /// Finished cells in display order, ready to be copied to the device.
    pub fn flush(&self) -> &[Cell] {
        &self.cells
    }
}
