use serde::{Deserialize, Serialize};

/// Kind of audio route endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortType {
    BuiltInMic,
    BuiltInSpeaker,
    BuiltInReceiver,
    Headphones,
    HeadsetMic,
    BluetoothA2dp,
    BluetoothHfp,
    BluetoothLe,
    AirPlay,
    Usb,
    Hdmi,
    CarAudio,
    Other,
}

impl PortType {
    pub fn is_bluetooth(&self) -> bool {
        matches!(self, Self::BluetoothA2dp | Self::BluetoothHfp | Self::BluetoothLe)
    }
}

/// An input or output endpoint on the current audio route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioPort {
    pub id: String,
    pub name: String,
    pub port_type: PortType,
}
