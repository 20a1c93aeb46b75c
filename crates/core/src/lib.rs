//! Core rasterizer - pure, synchronous, and testable
//!
//! This crate turns 2D primitives into writes on a character-cell grid. It has **no
//! dependencies** on the terminal or any other I/O, which makes it:
//!
//! - **Deterministic**: the same draw calls produce the same cells
//! - **Testable**: every primitive can be checked against the accumulated colors
//! - **Portable**: the finished cells can be copied to any device
//!
//! # Module Structure
//!
//! - [`palette`]: 24-bit RGB to 16-color attribute plus shade glyph lookup table
//! - [`framebuffer`]: accumulation, rendered-cell, depth, and edge buffers
//! - [`raster`]: pixel writes with blending and the primitive algorithms
//!
//! # Coordinates
//!
//! Primitive space has `(0, 0)` in the bottom-left corner with Y growing upward. The
//! rendered-cell buffer is stored top-down, so [`FrameBuffer::flush`] hands out cells in
//! the order a terminal expects them.
//!
//! # Example
//!
//! ```
//! use tui_raster_core::types::{Color, Vec2};
//! use tui_raster_core::FrameBuffer;
//!
//! let mut fb = FrameBuffer::with_size(20, 10);
//! fb.reset();
//!
//! let mut r = fb.rasterizer();
//! r.draw_rect(Vec2::new(10.0, 5.0), Vec2::new(6.0, 4.0), 0.0, Color::RED);
//! r.draw_circle(Vec2::new(10.0, 5.0), 3.0, Color::WHITE);
//!
//! assert_eq!(fb.pixel(8, 4), Some(Color::RED));
//! assert_eq!(fb.flush().len(), 200);
//! ```

pub mod framebuffer;
pub mod palette;
pub mod raster;

pub use tui_raster_types as types;

// Re-export commonly used types for convenience
pub use framebuffer::{Cell, EdgeSpan, FrameBuffer, RenderMode, FAR_DEPTH};
pub use palette::{Palette, Quantized, Shade, CONSOLE_COLORS};
pub use raster::Rasterizer;
