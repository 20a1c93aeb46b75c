//! tui-raster (workspace facade crate).
//!
//! Re-exports the member crates as `tui_raster::{types, core, term, engine}` and hosts
//! the demo scene used by the binary.

pub mod demo;

pub use tui_raster_core as core;
pub use tui_raster_engine as engine;
pub use tui_raster_term as term;
pub use tui_raster_types as types;
