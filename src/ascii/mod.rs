//! ASCII renderer module for converting camera frames to ASCII art.
//!
//! This module provides the per-frame pipeline for turning an RGB frame into
//! terminal text:
//!
//! 1. **Scale derivation** - Pick a block size that fits the terminal
//! 2. **Downsampling** - Average blocks of pixels into character cells
//! 3. **Glyph mapping** - BT.709 luma to a density ramp, optionally colored
//!
//! # Character Sets
//!
//! Built-in ramps are available via [`CharSet`]; any other ordered set of
//! characters can be used through [`GlyphRamp`].

mod buffer;
mod charset;
mod dimensions;
mod downsample;
mod error;
mod mapping;

pub use buffer::{PixelBuffer, RGB_CHANNELS};
pub use charset::{CharSet, GlyphRamp, BLOCKS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET};
pub use dimensions::{
    derive_scale, derive_scale_with, ScaleFactor, ScaleOptions, DEFAULT_CHAR_ASPECT,
    DEFAULT_SCALE_MARGIN, MAX_SCALE_MARGIN,
};
pub use downsample::{cell_sample_count, downsample};
pub use error::AsciiError;
pub use mapping::{glyph_index, luminance, GlyphMapper, COLOR_RESET};
