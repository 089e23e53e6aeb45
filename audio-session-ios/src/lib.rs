//! # audio-session-ios
//!
//! iOS AVFoundation backend for audio-session-kit.
//!
//! Provides:
//! - `AvAudioSessionResource`: `AudioResource` over `AVAudioSession.sharedInstance()`
//! - `AvCaptureSubSession`: `CaptureSubSession` over `AVCaptureSession`
//! - `InterruptionObserver`: `InterruptionSource` fed by `AVAudioSessionInterruptionNotification`
//! - `camera_device_from_av`: `AVCaptureDevice` → `CameraDevice`, including constituents
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use audio_session_core::{AudioSessionManager, ManagerOptions, ThreadScheduler};
//! use audio_session_ios::{AvAudioSessionResource, AvCaptureSubSession, InterruptionObserver};
//!
//! let manager = AudioSessionManager::new(
//!     AvAudioSessionResource::shared(),
//!     AvCaptureSubSession::new(capture_session),
//!     Arc::new(InterruptionObserver::register()),
//!     Arc::new(ThreadScheduler::new()),
//!     ManagerOptions::default(),
//! )?;
//! manager.activate()?;
//! ```

pub mod raw_names;

#[cfg(target_os = "ios")]
pub mod av_audio_session;
#[cfg(target_os = "ios")]
pub mod av_capture;
#[cfg(target_os = "ios")]
pub mod camera_devices;
#[cfg(target_os = "ios")]
pub mod interruption_observer;

#[cfg(target_os = "ios")]
pub use av_audio_session::AvAudioSessionResource;
#[cfg(target_os = "ios")]
pub use av_capture::AvCaptureSubSession;
#[cfg(target_os = "ios")]
pub use camera_devices::camera_device_from_av;
#[cfg(target_os = "ios")]
pub use interruption_observer::InterruptionObserver;
