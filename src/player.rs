//! Frame loop: capture, render, draw, repeat.
//!
//! Each iteration runs to completion before the next frame is requested.
//! Nothing is carried over between frames except the output sink.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ascii::{downsample, AsciiError, GlyphMapper, PixelBuffer, ScaleOptions};
use crate::camera::{CameraError, Webcam};
use crate::config::ConfigError;
use crate::terminal::{resolve_size, FrameWriter, TerminalSize};

/// Consecutive capture failures tolerated before the loop gives up.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 30;

/// Errors that end a playback session.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error("render failed: {0}")]
    Render(#[from] AsciiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Anything that can hand out frames one at a time.
pub trait FrameSource {
    /// Block until the next frame is available.
    fn next_frame(&mut self) -> Result<PixelBuffer, CameraError>;
}

impl FrameSource for Webcam {
    fn next_frame(&mut self) -> Result<PixelBuffer, CameraError> {
        self.read_frame()
    }
}

/// How frames are turned into text.
#[derive(Debug, Clone, Default)]
pub struct RenderSettings {
    pub mapper: GlyphMapper,
    pub scale: ScaleOptions,
    /// Size to assume when the terminal reports none
    pub fallback: Option<TerminalSize>,
}

/// Render one frame for a terminal of the given size.
///
/// # Errors
/// * `AsciiError::NoTerminal` - if the terminal has a zero dimension
/// * `AsciiError::EmptyOutput` - if the frame is too small for the scale
/// * `AsciiError::InvalidChannelCount` - if the frame is not RGB
pub fn render_frame(
    frame: &PixelBuffer,
    term: TerminalSize,
    settings: &RenderSettings,
) -> Result<Vec<String>, AsciiError> {
    let scale = settings
        .scale
        .scale_factor(frame.width(), frame.height(), term.cols, term.rows)?;
    let small = downsample(frame, scale)?;
    log::trace!(
        "{}x{} frame -> {}x{} cells (scale {}, terminal {})",
        frame.width(),
        frame.height(),
        small.width(),
        small.height(),
        scale,
        term
    );
    settings.mapper.render(&small)
}

/// Drives the capture/render/draw loop.
pub struct Player {
    settings: RenderSettings,
}

impl Player {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Run until `stop` is set or an unrecoverable error occurs.
    ///
    /// Frames that cannot be rendered because the terminal is momentarily
    /// unusable or too small are skipped. Capture failures are retried up to
    /// [`MAX_CONSECUTIVE_FAILURES`] times in a row.
    ///
    /// # Arguments
    /// * `source` - Where frames come from
    /// * `writer` - Where rendered frames go
    /// * `query_size` - Called once per frame for the current terminal size
    /// * `stop` - Checked before every frame
    ///
    /// # Returns
    /// The number of frames drawn.
    pub fn run<S, W, Q>(
        &self,
        source: &mut S,
        writer: &mut FrameWriter<W>,
        mut query_size: Q,
        stop: &AtomicBool,
    ) -> Result<u64, PlayerError>
    where
        S: FrameSource,
        W: Write,
        Q: FnMut() -> Option<TerminalSize>,
    {
        let mut drawn = 0u64;
        let mut failures = 0u32;

        while !stop.load(Ordering::SeqCst) {
            let frame = match source.next_frame() {
                Ok(frame) => {
                    failures = 0;
                    frame
                }
                Err(e) => {
                    failures += 1;
                    if failures >= MAX_CONSECUTIVE_FAILURES {
                        log::error!("giving up after {} failed captures", failures);
                        return Err(e.into());
                    }
                    log::warn!("frame capture failed ({}/{}): {}", failures, MAX_CONSECUTIVE_FAILURES, e);
                    continue;
                }
            };

            let frame = frame.into_rgb()?;
            let lines = match resolve_size(query_size(), self.settings.fallback)
                .and_then(|term| render_frame(&frame, term, &self.settings))
            {
                Ok(lines) => lines,
                Err(e @ (AsciiError::NoTerminal { .. } | AsciiError::EmptyOutput { .. })) => {
                    log::warn!("skipping frame: {}", e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            writer.write_frame(&lines)?;
            drawn += 1;
        }

        log::info!("stopped after {} frame(s)", drawn);
        Ok(drawn)
    }
}

/// Set `stop` when Ctrl+C is received.
///
/// This should be called once at program startup.
pub fn setup_ctrlc_handler(stop: Arc<AtomicBool>) -> Result<(), PlayerError> {
    ctrlc::set_handler(move || {
        stop.store(true, Ordering::SeqCst);
    })?;
    Ok(())
}
