//! Error type shared by the rendering pipeline.

use super::dimensions::ScaleFactor;

/// Errors returned by the frame-to-glyph pipeline.
///
/// Every variant is reported to the immediate caller. Nothing in the
/// pipeline clamps a bad input into a plausible-looking frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AsciiError {
    /// The buffer does not hold the expected number of channels.
    #[error("unsupported channel count {0} (expected 3 for RGB)")]
    InvalidChannelCount(usize),

    /// The requested scale reduces a dimension to zero.
    #[error("{width}x{height} source is too small for scale {scale}")]
    EmptyOutput {
        width: u32,
        height: u32,
        scale: ScaleFactor,
    },

    /// A downsampling block had no in-bounds samples.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    /// Terminal geometry is unavailable or zero.
    #[error("terminal size unavailable ({cols}x{rows})")]
    NoTerminal { cols: u16, rows: u16 },

    /// Buffer length does not match `width * height * channels`.
    #[error("buffer of {len} bytes does not match {width}x{height}x{channels}")]
    InvalidDimensions {
        len: usize,
        width: u32,
        height: u32,
        channels: usize,
    },

    /// A scale component was zero.
    #[error("scale factor must be at least 1 in both directions, got {x}x{y}")]
    InvalidScale { x: u32, y: u32 },

    /// Character aspect ratio is not a positive finite number.
    #[error("character aspect ratio must be positive, got {0}")]
    InvalidAspect(f32),

    /// A glyph ramp with no characters.
    #[error("glyph ramp must contain at least one character")]
    EmptyRamp,
}
