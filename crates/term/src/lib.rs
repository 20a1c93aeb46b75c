//! Terminal output for the rasterizer.
//!
//! The core crate only produces a grid of glyph/attribute cells. This crate copies that
//! grid to a real terminal through crossterm, resolving each attribute nibble to a
//! true-color value from the frame buffer's palette.
//!
//! Only cells that changed since the previous frame are re-sent; a size change or an
//! explicit [`TerminalRenderer::invalidate`] forces a full redraw.

pub mod renderer;

pub use tui_raster_core as core;
pub use tui_raster_types as types;

pub use renderer::{encode_diff_into, encode_full_into, set_title, terminal_size, TerminalRenderer};
