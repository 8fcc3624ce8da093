//! Owned pixel buffers passed between pipeline stages.

use super::error::AsciiError;

/// Number of channels in an interleaved RGB buffer.
pub const RGB_CHANNELS: usize = 3;

/// An owned, row-major grid of interleaved 8-bit samples.
///
/// The invariant `data.len() == width * height * channels` is checked on
/// construction, so every stage can index without bounds surprises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: usize,
}

impl PixelBuffer {
    /// Wrap raw samples, validating the size invariant.
    ///
    /// # Errors
    /// * `AsciiError::InvalidChannelCount` - if `channels` is zero
    /// * `AsciiError::InvalidDimensions` - if a dimension is zero or the
    ///   length does not match
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: usize) -> Result<Self, AsciiError> {
        if channels == 0 {
            return Err(AsciiError::InvalidChannelCount(channels));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels));
        if width == 0 || height == 0 || expected != Some(data.len()) {
            return Err(AsciiError::InvalidDimensions {
                len: data.len(),
                width,
                height,
                channels,
            });
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Wrap interleaved RGB samples.
    pub fn rgb(data: Vec<u8>, width: u32, height: u32) -> Result<Self, AsciiError> {
        Self::new(data, width, height, RGB_CHANNELS)
    }

    /// Build an RGB buffer where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, AsciiError> {
        let pixels = (width as usize) * (height as usize);
        let data = rgb.iter().copied().cycle().take(pixels * RGB_CHANNELS).collect();
        Self::rgb(data, width, height)
    }

    /// Normalize to three-channel RGB.
    ///
    /// Gray buffers replicate the sample into each channel and RGBA
    /// buffers drop alpha. RGB input is returned as-is without copying.
    ///
    /// # Errors
    /// * `AsciiError::InvalidChannelCount` - for any other channel count
    pub fn into_rgb(self) -> Result<Self, AsciiError> {
        let data = match self.channels {
            RGB_CHANNELS => return Ok(self),
            1 => self.data.iter().flat_map(|&v| [v, v, v]).collect(),
            4 => self
                .data
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            n => return Err(AsciiError::InvalidChannelCount(n)),
        };

        Ok(Self {
            data,
            width: self.width,
            height: self.height,
            channels: RGB_CHANNELS,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Raw samples in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Samples of the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        &self.data[start..start + self.channels]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = PixelBuffer::rgb(vec![0; 5], 1, 2).unwrap_err();
        assert_eq!(
            err,
            AsciiError::InvalidDimensions {
                len: 5,
                width: 1,
                height: 2,
                channels: 3
            }
        );
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(PixelBuffer::rgb(Vec::new(), 0, 4).is_err());
        assert!(PixelBuffer::rgb(Vec::new(), 4, 0).is_err());
    }

    #[test]
    fn test_new_rejects_zero_channels() {
        assert_eq!(
            PixelBuffer::new(Vec::new(), 1, 1, 0).unwrap_err(),
            AsciiError::InvalidChannelCount(0)
        );
    }

    #[test]
    fn test_filled() {
        let buf = PixelBuffer::filled(2, 2, [1, 2, 3]).unwrap();
        assert_eq!(buf.data(), &[1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
        assert_eq!(buf.pixel(1, 1), &[1, 2, 3]);
    }

    #[test]
    fn test_gray_to_rgb() {
        let buf = PixelBuffer::new(vec![10, 200], 2, 1, 1).unwrap();
        let rgb = buf.into_rgb().unwrap();
        assert_eq!(rgb.channels(), 3);
        assert_eq!(rgb.data(), &[10, 10, 10, 200, 200, 200]);
    }

    #[test]
    fn test_rgba_to_rgb_drops_alpha() {
        let buf = PixelBuffer::new(vec![1, 2, 3, 255, 4, 5, 6, 0], 1, 2, 4).unwrap();
        let rgb = buf.into_rgb().unwrap();
        assert_eq!(rgb.data(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(rgb.height(), 2);
    }

    #[test]
    fn test_rgb_passthrough() {
        let buf = PixelBuffer::rgb(vec![9, 8, 7], 1, 1).unwrap();
        assert_eq!(buf.clone().into_rgb().unwrap(), buf);
    }

    #[test]
    fn test_two_channels_unsupported() {
        let buf = PixelBuffer::new(vec![0; 4], 2, 1, 2).unwrap();
        assert_eq!(buf.into_rgb().unwrap_err(), AsciiError::InvalidChannelCount(2));
    }
}
