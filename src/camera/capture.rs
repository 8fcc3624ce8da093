//! Synchronous webcam capture.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;

use super::device::{ensure_device_listed, list_devices};
use super::frame_utils::{convert_to_rgb, mirror_horizontal};
use super::types::{CameraError, CameraSettings, Resolution};
use crate::ascii::PixelBuffer;

/// An open webcam stream.
///
/// Frames are pulled on demand with [`Webcam::read_frame`]; there is no
/// background thread and no frame queue. The stream is stopped on drop.
pub struct Webcam {
    camera: Camera,
    settings: CameraSettings,
    resolution: Resolution,
    fps: u32,
}

impl std::fmt::Debug for Webcam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Webcam")
            .field("settings", &self.settings)
            .field("resolution", &self.resolution)
            .field("fps", &self.fps)
            .finish_non_exhaustive()
    }
}

impl Webcam {
    /// Open the camera described by `settings` and start streaming.
    ///
    /// # Errors
    /// * `CameraError::DeviceNotFound` - if no listed camera has the index
    /// * `CameraError::PermissionDenied` - if camera access is denied (macOS)
    /// * `CameraError::OpenFailed` - if no requested format could be opened
    /// * `CameraError::StreamFailed` - if the stream fails to start
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        match list_devices() {
            Ok(devices) => ensure_device_listed(settings.device_index, &devices)?,
            // Some backends cannot enumerate but still open by index.
            Err(e) => log::warn!("skipping device check: {}", e),
        }

        let index = CameraIndex::Index(settings.device_index);
        let mut camera = open_camera_with_fallback(&index, &settings)?;

        camera
            .open_stream()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;

        let res = camera.resolution();
        let resolution = Resolution {
            width: res.width(),
            height: res.height(),
        };
        let fps = camera.frame_rate();
        log::debug!("requested {}, negotiated {}", settings.resolution, resolution);

        Ok(Self {
            camera,
            settings,
            resolution,
            fps,
        })
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Resolution the camera actually negotiated.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Frame rate the camera actually negotiated.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Block until the next frame arrives and return it as RGB.
    ///
    /// # Errors
    /// * `CameraError::CaptureFailed` - if the frame could not be read or decoded
    pub fn read_frame(&mut self) -> Result<PixelBuffer, CameraError> {
        let raw = self
            .camera
            .frame()
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
        let mut frame = convert_to_rgb(&raw)?;

        if self.settings.mirror {
            mirror_horizontal(&mut frame);
        }

        Ok(frame)
    }
}

impl Drop for Webcam {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("failed to stop camera stream: {}", e);
        }
    }
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    let requested = nokhwa::utils::Resolution::new(
        settings.resolution.width,
        settings.resolution.height,
    );

    // In order of preference:
    // 1. NV12 (native on macOS)
    // 2. MJPEG (widely supported, good compression)
    // 3. YUYV (uncompressed, common on V4L2)
    // 4. Whatever gives the highest resolution
    let format_attempts = [
        NokhwaFrameFormat::NV12,
        NokhwaFrameFormat::MJPEG,
        NokhwaFrameFormat::YUYV,
    ]
    .into_iter()
    .map(|format| {
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested,
            format,
            settings.fps,
        )))
    })
    .chain(std::iter::once(RequestedFormat::new::<RgbFormat>(
        RequestedFormatType::AbsoluteHighestResolution,
    )));

    let mut last_error = String::new();

    for format in format_attempts {
        match Camera::new(index.clone(), format) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                log::debug!("camera format attempt failed: {}", e);
                last_error = e.to_string();
            }
        }
    }

    Err(classify_open_error(last_error))
}

/// Map a backend open failure onto a camera error.
fn classify_open_error(message: String) -> CameraError {
    let msg = message.to_lowercase();
    if msg.contains("permission")
        || msg.contains("denied")
        || msg.contains("authorization")
        || msg.contains("access")
    {
        CameraError::PermissionDenied
    } else {
        CameraError::OpenFailed(message)
    }
}
