//! The frame loop.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::{FrameBuffer, Palette};
use crate::input::{classify, EngineEvent};
use crate::scene::{Control, Frame, Scene};
use crate::term::{set_title, terminal_size, TerminalRenderer};
use crate::timer::{FrameTimer, SharedFrameTime};
use crate::title::TitleReporter;
use crate::types::TITLE_REFRESH_MS;

/// Shrink a requested grid to what the terminal can show.
pub fn clamp_to_terminal(requested: (u16, u16), available: (u16, u16)) -> (u16, u16) {
    let clamped = (
        requested.0.min(available.0).max(1),
        requested.1.min(available.1).max(1),
    );
    if clamped != requested {
        warn!(
            "requested {}x{} grid clamped to {}x{}",
            requested.0, requested.1, clamped.0, clamped.1
        );
    }
    clamped
}

pub struct Engine {
    config: EngineConfig,
    fb: FrameBuffer,
    timer: FrameTimer,
    frame_time: SharedFrameTime,
}

impl Engine {
    /// Build the frame buffer described by `config`.
    ///
    /// A custom palette builds its own lookup table here; otherwise the shared console
    /// palette is used.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate().context("invalid engine config")?;
        let palette = match config.palette_colors() {
            Some(colors) => Arc::new(Palette::new(colors)),
            None => Palette::shared(),
        };
        let mut fb = FrameBuffer::new(config.width, config.height, config.render_mode(), palette);
        fb.set_background(config.background_color());
        fb.reset();

        Ok(Self {
            config,
            fb,
            timer: FrameTimer::new(Instant::now()),
            frame_time: SharedFrameTime::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Resize to the configured grid, clamped to `available`.
    pub fn fit(&mut self, available: (u16, u16)) {
        let (width, height) =
            clamp_to_terminal((self.config.width, self.config.height), available);
        if (width, height) != (self.fb.width(), self.fb.height()) {
            self.fb.resize(width, height);
        }
    }

    /// Reset the buffer and let `scene` draw one frame. Does not touch the terminal.
    pub fn render_frame<S: Scene + ?Sized>(&mut self, scene: &mut S, elapsed: Duration) -> Control {
        self.fb.reset();
        let delta_ms = self.timer.delta_ms();
        let index = self.timer.frames();
        let mut frame = Frame::new(self.fb.rasterizer(), delta_ms, elapsed, index);
        scene.update(&mut frame)
    }

    /// Close the current frame and publish the smoothed frame time.
    pub fn end_frame(&mut self, now: Instant) {
        self.timer.tick(now);
        self.frame_time.store(self.timer.delta_ms());
    }

    /// Run `scene` in the terminal until it quits or a quit key is pressed.
    ///
    /// The terminal is restored even when the loop fails.
    pub fn run<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<()> {
        self.fit(terminal_size()?);

        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        let result = self.run_loop(scene, &mut renderer);
        let restored = renderer.exit();
        result.and(restored)
    }

    fn run_loop<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        renderer: &mut TerminalRenderer,
    ) -> Result<()> {
        let _title = TitleReporter::spawn(
            &self.config.title,
            self.frame_time.clone(),
            Duration::from_millis(TITLE_REFRESH_MS),
            |text: &str| set_title(&mut io::stdout().lock(), text),
        )?;

        scene.startup(&mut self.fb).context("scene startup")?;
        info!(
            "frame loop started: {}x{} {:?}",
            self.fb.width(),
            self.fb.height(),
            self.fb.mode()
        );

        let interval = self.config.frame_interval();
        let started = Instant::now();
        self.timer = FrameTimer::new(started);

        loop {
            let frame_start = Instant::now();
            if self.poll_events(renderer)? == Control::Quit {
                break;
            }

            let control = self.render_frame(scene, started.elapsed());
            renderer.draw(&self.fb)?;
            if control == Control::Quit {
                break;
            }

            if let Some(interval) = interval {
                if let Some(rest) = interval.checked_sub(frame_start.elapsed()) {
                    thread::sleep(rest);
                }
            }
            self.end_frame(Instant::now());
        }

        scene.shutdown();
        info!(
            "frame loop stopped after {} frames ({} fps)",
            self.timer.frames(),
            self.timer.fps()
        );
        Ok(())
    }

    /// Drain pending terminal events without blocking.
    fn poll_events(&mut self, renderer: &mut TerminalRenderer) -> Result<Control> {
        while event::poll(Duration::ZERO).context("poll terminal events")? {
            match classify(event::read().context("read terminal event")?) {
                Some(EngineEvent::Quit) => {
                    debug!("quit requested");
                    return Ok(Control::Quit);
                }
                Some(EngineEvent::Resize { width, height }) => {
                    self.fit((width, height));
                    renderer.invalidate();
                }
                None => {}
            }
        }
        Ok(Control::Continue)
    }
}
