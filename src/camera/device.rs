//! Camera device enumeration.

use nokhwa::query;
use nokhwa::utils::ApiBackend;

use super::types::{CameraError, CameraInfo};

/// List all available camera devices on the system.
///
/// If no cameras are found, returns an empty vector (not an error).
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let devices = query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;
    log::debug!("found {} camera device(s)", devices.len());

    Ok(devices
        .into_iter()
        .map(|d| CameraInfo {
            index: d.index().as_index().unwrap_or(0),
            name: d.human_name(),
            description: d.description().to_string(),
        })
        .collect())
}

/// Check that `index` names one of the listed cameras.
///
/// # Errors
/// * `CameraError::DeviceNotFound` - if no listed camera has that index
pub fn ensure_device_listed(index: u32, devices: &[CameraInfo]) -> Result<(), CameraError> {
    if devices.iter().any(|d| d.index == index) {
        Ok(())
    } else {
        Err(CameraError::DeviceNotFound(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(index: u32) -> CameraInfo {
        CameraInfo {
            index,
            name: format!("Camera {}", index),
            description: "USB".to_string(),
        }
    }

    #[test]
    fn test_listed_device_accepted() {
        assert!(ensure_device_listed(1, &[info(0), info(1)]).is_ok());
    }

    #[test]
    fn test_unlisted_device_rejected() {
        assert!(matches!(
            ensure_device_listed(3, &[info(0), info(1)]),
            Err(CameraError::DeviceNotFound(3))
        ));
        assert!(matches!(
            ensure_device_listed(0, &[]),
            Err(CameraError::DeviceNotFound(0))
        ));
    }
}
