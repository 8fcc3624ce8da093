//! Frame conversion and transformation utilities.

use nokhwa::pixel_format::RgbFormat;

use super::types::CameraError;
use crate::ascii::PixelBuffer;

/// Decode a nokhwa buffer into an RGB pixel buffer.
///
/// nokhwa converts the camera's native format (MJPEG, YUYV, NV12, ...) to
/// interleaved RGB.
pub fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Result<PixelBuffer, CameraError> {
    let decoded = buffer
        .decode_image::<RgbFormat>()
        .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
    let resolution = buffer.resolution();

    let frame = PixelBuffer::rgb(decoded.into_raw(), resolution.width(), resolution.height())?;
    Ok(frame)
}

/// Mirror a frame horizontally (flip left-right) for selfie mode.
pub fn mirror_horizontal(frame: &mut PixelBuffer) {
    let bpp = frame.channels();
    let row_len = frame.width() as usize * bpp;

    for row in frame.data_mut().chunks_exact_mut(row_len) {
        let width = row.len() / bpp;
        for x in 0..width / 2 {
            let left = x * bpp;
            let right = (width - 1 - x) * bpp;
            for i in 0..bpp {
                row.swap(left + i, right + i);
            }
        }
    }
}
