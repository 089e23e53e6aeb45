//! Mapping of AVFoundation string constants to core model types.
//!
//! AVFoundation identifies port and device kinds with `NSString` constants;
//! these are their raw values.

use audio_session_core::{CameraDeviceType, PortType};

pub fn port_type_from_raw(raw: &str) -> PortType {
    match raw {
        "MicrophoneBuiltIn" => PortType::BuiltInMic,
        "Speaker" => PortType::BuiltInSpeaker,
        "Receiver" => PortType::BuiltInReceiver,
        "Headphones" => PortType::Headphones,
        "MicrophoneWired" => PortType::HeadsetMic,
        "BluetoothA2DPOutput" => PortType::BluetoothA2dp,
        "BluetoothHFP" => PortType::BluetoothHfp,
        "BluetoothLE" => PortType::BluetoothLe,
        "AirPlay" => PortType::AirPlay,
        "USBAudio" => PortType::Usb,
        "HDMI" => PortType::Hdmi,
        "CarAudio" => PortType::CarAudio,
        _ => PortType::Other,
    }
}

pub fn device_type_from_raw(raw: &str) -> CameraDeviceType {
    match raw {
        "AVCaptureDeviceTypeBuiltInWideAngleCamera" => CameraDeviceType::WideAngle,
        "AVCaptureDeviceTypeBuiltInUltraWideCamera" => CameraDeviceType::UltraWide,
        "AVCaptureDeviceTypeBuiltInTelephotoCamera" => CameraDeviceType::Telephoto,
        "AVCaptureDeviceTypeBuiltInTrueDepthCamera" => CameraDeviceType::TrueDepth,
        "AVCaptureDeviceTypeBuiltInLiDARDepthCamera" => CameraDeviceType::LiDarDepth,
        "AVCaptureDeviceTypeBuiltInDualCamera" => CameraDeviceType::DualCamera,
        "AVCaptureDeviceTypeBuiltInDualWideCamera" => CameraDeviceType::DualWideCamera,
        "AVCaptureDeviceTypeBuiltInTripleCamera" => CameraDeviceType::TripleCamera,
        "AVCaptureDeviceTypeExternal" | "AVCaptureDeviceTypeExternalUnknown" => CameraDeviceType::External,
        _ => CameraDeviceType::Unknown,
    }
}
