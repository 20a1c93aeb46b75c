//! Core types module - shared value types and constants
//!
//! This crate defines the plain data types used throughout the rasterizer.
//! Everything here is a pure value type with no external dependencies, so it can be
//! used from the core, the terminal layer and tests alike.
//!
//! # Coordinate Space
//!
//! Primitive coordinates are *screen space*: `x` grows to the right and `y` grows
//! **upward**, with `(0, 0)` at the bottom-left cell. The rendered-cell buffer is stored
//! top-down, so the frame buffer flips rows on write.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 160 | Grid width in cells |
//! | `DEFAULT_HEIGHT` | 50 | Grid height in cells |
//! | `TITLE_MAX_LEN` | 48 | Characters of the user title kept in the window title |
//! | `FPS_WINDOW` | 10 | Frame durations averaged for the FPS readout |
//! | `PALETTE_SIZE` | 16 | Base colors of the quantizer |
//!
//! # Examples
//!
//! ```
//! use tui_raster_types::{Color, Mat2, Vec2};
//!
//! let half = Color::new(200, 0, 0, 128);
//! let mixed = half.blend(Color::rgb(0, 0, 100));
//! assert_eq!(mixed.r, 100);
//! assert_eq!(mixed.b, 100);
//!
//! let rotated = Mat2::rotation(std::f32::consts::FRAC_PI_2) * Vec2::new(1.0, 0.0);
//! assert!(rotated.x.abs() < 1e-6);
//! assert!((rotated.y - 1.0).abs() < 1e-6);
//! ```

pub mod color;
pub mod geometry;
pub mod shapes;

pub use color::{Color, Rgb};
pub use geometry::{IVec2, Mat2, Vec2};
pub use shapes::{Circle, Line, Oval, Rect, Triangle};

/// Default grid width in cells
pub const DEFAULT_WIDTH: u16 = 160;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: u16 = 50;

/// Default window title
pub const DEFAULT_TITLE: &str = "tui-raster";

/// Maximum number of title characters kept before the FPS suffix
pub const TITLE_MAX_LEN: usize = 48;

/// Separator written between the title and the FPS readout
pub const FPS_LABEL: &str = "    FPS: ";

/// Number of frame durations averaged for the reported frame time
pub const FPS_WINDOW: usize = 10;

/// How often the title reporter refreshes the window title (ms)
pub const TITLE_REFRESH_MS: u64 = 1000;

/// Number of base colors in the quantizer palette
pub const PALETTE_SIZE: usize = 16;

/// Number of distinct 24-bit RGB values (size of the quantizer table)
pub const RGB_CUBE_SIZE: usize = 1 << 24;
