//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "title": "demo",
//!   "width": 120,
//!   "height": 40,
//!   "three_d": false,
//!   "background": [0, 0, 32],
//!   "palette": null,
//!   "target_fps": 60
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::RenderMode;
use crate::types::{Color, Rgb, DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH, PALETTE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window title prefix; the FPS counter is appended.
    pub title: String,
    /// Requested grid width in cells; clamped to the terminal.
    pub width: u16,
    /// Requested grid height in cells; clamped to the terminal.
    pub height: u16,
    /// Keep depth and edge buffers alongside the color buffers.
    pub three_d: bool,
    /// Reset color as `[r, g, b]`.
    pub background: [u8; 3],
    /// Sixteen `[r, g, b]` reference colors; `None` uses the console palette.
    pub palette: Option<Vec<[u8; 3]>>,
    /// Frame rate cap; `0` runs uncapped.
    pub target_fps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            three_d: false,
            background: [0, 0, 0],
            palette: None,
            target_fps: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).context("parse engine config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("load config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.width > 0 && self.height > 0, "grid size must be non-zero");
        if let Some(colors) = &self.palette {
            ensure!(
                colors.len() == PALETTE_SIZE,
                "palette needs {PALETTE_SIZE} colors, got {}",
                colors.len()
            );
        }
        Ok(())
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.three_d {
            RenderMode::Depth
        } else {
            RenderMode::Flat
        }
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b] = self.background;
        Color::rgb(r, g, b)
    }

    /// Reference colors, if a valid custom palette is configured.
    pub fn palette_colors(&self) -> Option<[Rgb; PALETTE_SIZE]> {
        let colors = self.palette.as_ref()?;
        if colors.len() != PALETTE_SIZE {
            return None;
        }
        let mut out = [Rgb::new(0, 0, 0); PALETTE_SIZE];
        for (dst, [r, g, b]) in out.iter_mut().zip(colors.iter().copied()) {
            *dst = Rgb::new(r, g, b);
        }
        Some(out)
    }

    /// Minimum time per frame, or `None` when uncapped.
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.target_fps > 0).then(|| Duration::from_secs(1) / self.target_fps)
    }
}
