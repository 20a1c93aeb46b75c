//! Frame driver.
//!
//! Owns the frame buffer and the terminal renderer and runs a [`Scene`] once per frame:
//!
//! 1. poll input (quit keys, terminal resize)
//! 2. reset the frame buffer to its background
//! 3. let the scene draw through a [`Rasterizer`](crate::core::Rasterizer)
//! 4. copy the finished cells to the terminal
//! 5. record the frame time
//!
//! A background [`TitleReporter`] puts the smoothed frame rate in the window title.
//!
//! # Module Structure
//!
//! - [`config`]: runtime configuration loaded from JSON
//! - [`engine`]: the frame loop
//! - [`input`]: key and resize event mapping
//! - [`scene`]: the trait user code implements
//! - [`timer`]: frame time smoothing
//! - [`title`]: window title reporter thread

pub mod config;
pub mod engine;
pub mod input;
pub mod scene;
pub mod timer;
pub mod title;

pub use tui_raster_core as core;
pub use tui_raster_term as term;
pub use tui_raster_types as types;

pub use config::EngineConfig;
pub use engine::{clamp_to_terminal, Engine};
pub use input::{classify, should_quit, EngineEvent};
pub use scene::{Control, Frame, Scene};
pub use timer::{FrameTimer, SharedFrameTime};
pub use title::{format_title, TitleReporter};
