//! Block-averaging downsampler for RGB frames.

use std::ops::Range;

use super::buffer::{PixelBuffer, RGB_CHANNELS};
use super::dimensions::ScaleFactor;
use super::error::AsciiError;

/// Source pixel range covered by output cell `index` along one axis,
/// clipped to the source extent.
fn block_span(index: u32, step: u32, extent: u32) -> Range<u32> {
    let start = index.saturating_mul(step).min(extent);
    let end = start.saturating_add(step).min(extent);
    start..end
}

/// Number of in-bounds source pixels averaged into output cell `(x, y)`.
///
/// Equals `scale.x() * scale.y()` for interior cells and is smaller for
/// cells whose block hangs over the right or bottom edge.
pub fn cell_sample_count(width: u32, height: u32, scale: ScaleFactor, x: u32, y: u32) -> usize {
    let cols = block_span(x, scale.x(), width);
    let rows = block_span(y, scale.y(), height);
    cols.len() * rows.len()
}

/// Downsample an RGB buffer by averaging non-overlapping blocks.
///
/// Each output cell is the per-channel truncated mean of the
/// `scale.x() x scale.y()` block at its position. Blocks that extend past the
/// source edge are averaged over their in-bounds pixels only.
///
/// # Arguments
/// * `buffer` - RGB source frame (not modified)
/// * `scale` - Source pixels per output cell in each direction
///
/// # Returns
/// A new `floor(width / scale.x()) x floor(height / scale.y())` RGB buffer.
///
/// # Errors
/// * `AsciiError::InvalidChannelCount` - if the buffer is not RGB
/// * `AsciiError::EmptyOutput` - if either output dimension would be zero
/// * `AsciiError::InternalInvariant` - if a block has no in-bounds samples
///
/// # Example
/// ```
/// use asciicam::ascii::{downsample, PixelBuffer, ScaleFactor};
///
/// let frame = PixelBuffer::filled(640, 480, [30, 60, 90]).unwrap();
/// let small = downsample(&frame, ScaleFactor::from_horizontal(8)).unwrap();
/// assert_eq!((small.width(), small.height()), (80, 30));
/// assert_eq!(small.pixel(0, 0), &[30, 60, 90]);
/// ```
pub fn downsample(buffer: &PixelBuffer, scale: ScaleFactor) -> Result<PixelBuffer, AsciiError> {
    if buffer.channels() != RGB_CHANNELS {
        return Err(AsciiError::InvalidChannelCount(buffer.channels()));
    }

    let width = buffer.width();
    let height = buffer.height();
    let new_width = width / scale.x();
    let new_height = height / scale.y();

    if new_width == 0 || new_height == 0 {
        return Err(AsciiError::EmptyOutput {
            width,
            height,
            scale,
        });
    }

    let src = buffer.data();
    let stride = width as usize * RGB_CHANNELS;
    let mut out = Vec::with_capacity(new_width as usize * new_height as usize * RGB_CHANNELS);

    for y in 0..new_height {
        let rows = block_span(y, scale.y(), height);

        for x in 0..new_width {
            let cols = block_span(x, scale.x(), width);

            let mut sum = [0u64; RGB_CHANNELS];
            let mut count = 0u64;

            for py in rows.clone() {
                let row = &src[py as usize * stride..(py as usize + 1) * stride];
                let block = &row[cols.start as usize * RGB_CHANNELS..cols.end as usize * RGB_CHANNELS];
                for px in block.chunks_exact(RGB_CHANNELS) {
                    sum[0] += u64::from(px[0]);
                    sum[1] += u64::from(px[1]);
                    sum[2] += u64::from(px[2]);
                    count += 1;
                }
            }

            if count == 0 {
                return Err(AsciiError::InternalInvariant(format!(
                    "cell ({}, {}) covers no source pixels",
                    x, y
                )));
            }

            // Mean of u8 samples always fits in u8.
            out.extend(sum.iter().map(|&s| (s / count) as u8));
        }
    }

    PixelBuffer::rgb(out, new_width, new_height)
}
