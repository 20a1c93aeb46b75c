//! The trait user code implements to draw frames.

use std::time::Duration;

use anyhow::Result;

use crate::core::{FrameBuffer, Rasterizer};

/// What the frame loop should do after a scene update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Per-frame drawing context handed to [`Scene::update`].
///
/// The frame buffer has already been reset to its background color.
pub struct Frame<'a> {
    raster: Rasterizer<'a>,
    delta_ms: f32,
    elapsed: Duration,
    index: u64,
}

impl<'a> Frame<'a> {
    pub fn new(raster: Rasterizer<'a>, delta_ms: f32, elapsed: Duration, index: u64) -> Self {
        Self {
            raster,
            delta_ms,
            elapsed,
            index,
        }
    }

    pub fn raster(&mut self) -> &mut Rasterizer<'a> {
        &mut self.raster
    }

    pub fn width(&self) -> u16 {
        self.raster.width()
    }

    pub fn height(&self) -> u16 {
        self.raster.height()
    }

    /// Smoothed duration of recent frames in milliseconds.
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    /// Time since the loop started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of frames completed before this one.
    pub fn index(&self) -> u64 {
        self.index
    }
}

pub trait Scene {
    /// Called once before the first frame, after the buffer has its final size.
    fn startup(&mut self, _fb: &mut FrameBuffer) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> Control;

    /// Called once after the last frame, before the terminal is restored.
    fn shutdown(&mut self) {}
}
