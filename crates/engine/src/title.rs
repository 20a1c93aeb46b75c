//! Window title reporter.
//!
//! A background thread that periodically writes `"<title>    FPS: <n>"` through a
//! caller-supplied sink. It only reads [`SharedFrameTime`] and never touches the frame
//! buffer.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::timer::SharedFrameTime;
use crate::types::{FPS_LABEL, TITLE_MAX_LEN};

/// Title text for a given frame rate; `title` is cut to [`TITLE_MAX_LEN`] characters.
pub fn format_title(title: &str, fps: u32) -> String {
    let mut out: String = title.chars().take(TITLE_MAX_LEN).collect();
    out.push_str(FPS_LABEL);
    out.push_str(&fps.to_string());
    out
}

/// Handle to the reporter thread; dropping it stops the thread.
pub struct TitleReporter {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TitleReporter {
    /// Start reporting every `interval`.
    ///
    /// A sink error is logged once and ends the thread.
    pub fn spawn<F>(
        title: &str,
        frame_time: SharedFrameTime,
        interval: Duration,
        mut sink: F,
    ) -> Result<Self>
    where
        F: FnMut(&str) -> Result<()> + Send + 'static,
    {
        let title = title.to_string();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("title-reporter".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        let text = format_title(&title, frame_time.fps());
                        if let Err(e) = sink(&text) {
                            warn!("title update failed: {e:#}");
                            break;
                        }
                    }
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            })
            .context("spawn title reporter")?;

        debug!("title reporter started ({interval:?})");
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("title reporter panicked");
            }
        }
    }
}

impl Drop for TitleReporter {
    fn drop(&mut self) {
        self.stop();
    }
}
