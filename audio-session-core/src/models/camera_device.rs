use serde::{Deserialize, Serialize};

/// Hardware class of a camera device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraDeviceType {
    WideAngle,
    UltraWide,
    Telephoto,
    TrueDepth,
    LiDarDepth,
    DualCamera,
    DualWideCamera,
    TripleCamera,
    External,
    Unknown,
}

impl CameraDeviceType {
    /// Multi-lens types that the OS exposes as a single logical device.
    pub fn is_multi_lens(&self) -> bool {
        matches!(
            self,
            Self::DualCamera | Self::DualWideCamera | Self::TripleCamera
        )
    }
}

/// A camera device descriptor owned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraDevice {
    pub id: String,
    pub name: String,
    pub device_type: CameraDeviceType,

    /// Physical devices backing a virtual device. Empty for physical devices.
    #[serde(default)]
    pub constituents: Vec<CameraDevice>,
}

impl CameraDevice {
    pub fn physical(id: impl Into<String>, name: impl Into<String>, device_type: CameraDeviceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            device_type,
            constituents: Vec::new(),
        }
    }

    /// Whether this device is a virtual multi-lens device.
    pub fn is_virtual_device(&self) -> bool {
        self.device_type.is_multi_lens() || !self.constituents.is_empty()
    }

    /// The physical devices behind this one: its constituents when virtual,
    /// otherwise the device itself.
    pub fn physical_devices(&self) -> Vec<&CameraDevice> {
        if self.is_virtual_device() && !self.constituents.is_empty() {
            self.constituents.iter().collect()
        } else {
            vec![self]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple() -> CameraDevice {
        CameraDevice {
            id: "back-triple".into(),
            name: "Back Triple Camera".into(),
            device_type: CameraDeviceType::TripleCamera,
            constituents: vec![
                CameraDevice::physical("back-uw", "Back Ultra Wide", CameraDeviceType::UltraWide),
                CameraDevice::physical("back-w", "Back Wide", CameraDeviceType::WideAngle),
                CameraDevice::physical("back-t", "Back Telephoto", CameraDeviceType::Telephoto),
            ],
        }
    }

    #[test]
    fn triple_camera_is_virtual() {
        let device = triple();
        assert!(device.is_virtual_device());

        let ids: Vec<&str> = device.physical_devices().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["back-uw", "back-w", "back-t"]);
    }

    #[test]
    fn physical_device_lists_itself() {
        let device = CameraDevice::physical("front", "Front Camera", CameraDeviceType::TrueDepth);
        assert!(!device.is_virtual_device());
        assert_eq!(device.physical_devices(), vec![&device]);
    }

    #[test]
    fn multi_lens_type_without_constituents_falls_back_to_self() {
        let device = CameraDevice::physical("dual", "Dual Camera", CameraDeviceType::DualCamera);
        assert!(device.is_virtual_device());
        assert_eq!(device.physical_devices().len(), 1);
    }
}
