use objc2_av_foundation::AVCaptureDevice;

use audio_session_core::models::camera_device::CameraDevice;

use crate::raw_names::device_type_from_raw;

/// Snapshot an `AVCaptureDevice`, recursing into the constituents of
/// virtual multi-lens devices.
pub fn camera_device_from_av(device: &AVCaptureDevice) -> CameraDevice {
    unsafe {
        let constituents = if device.isVirtualDevice() {
            device
                .constituentDevices()
                .iter()
                .map(|d| camera_device_from_av(&d))
                .collect()
        } else {
            Vec::new()
        };

        CameraDevice {
            id: device.uniqueID().to_string(),
            name: device.localizedName().to_string(),
            device_type: device_type_from_raw(&device.deviceType().to_string()),
            constituents,
        }
    }
}
