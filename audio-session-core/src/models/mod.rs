pub mod activation;
pub mod audio_port;
pub mod camera_device;
pub mod config;
pub mod error;
pub mod interruption;
pub mod state;
