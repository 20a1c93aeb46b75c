//! Frame time smoothing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::types::FPS_WINDOW;

/// Ring of the last [`FPS_WINDOW`] frame durations.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: [f32; FPS_WINDOW],
    next: usize,
    filled: usize,
    average: f32,
    last: Instant,
    frames: u64,
}

impl FrameTimer {
    pub fn new(now: Instant) -> Self {
        Self {
            samples: [0.0; FPS_WINDOW],
            next: 0,
            filled: 0,
            average: 0.0,
            last: now,
            frames: 0,
        }
    }

    /// Close the current frame at `now` and return its duration in milliseconds.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last).as_secs_f32() * 1000.0;
        self.last = now;
        self.record(delta);
        delta
    }

    /// Push one frame duration into the window.
    pub fn record(&mut self, delta_ms: f32) {
        self.samples[self.next] = delta_ms;
        self.next = (self.next + 1) % FPS_WINDOW;
        self.filled = (self.filled + 1).min(FPS_WINDOW);
        self.frames += 1;
        self.average = self.samples[..self.filled].iter().sum::<f32>() / self.filled as f32;
    }

    /// Smoothed frame duration in milliseconds; `0` before the first frame.
    pub fn delta_ms(&self) -> f32 {
        self.average
    }

    pub fn fps(&self) -> u32 {
        fps_from_delta(self.average)
    }

    /// Frames recorded so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// `1000 / delta`, with the delta floored at one millisecond.
pub fn fps_from_delta(delta_ms: f32) -> u32 {
    (1000.0 / delta_ms.max(1.0)) as u32
}

/// Smoothed frame duration shared with the title thread.
///
/// Written once per completed frame by the drawing thread; readers may see the previous
/// frame's value.
#[derive(Debug, Clone, Default)]
pub struct SharedFrameTime(Arc<AtomicU32>);

impl SharedFrameTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, delta_ms: f32) {
        self.0.store(delta_ms.to_bits(), Ordering::Relaxed);
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn fps(&self) -> u32 {
        fps_from_delta(self.load())
    }
}
