//! # audio-session-core
//!
//! Platform-agnostic management of the shared OS audio session used by a
//! camera capture pipeline.
//!
//! Activates the session with a fixed recording configuration, retries while
//! another process holds it, recovers from interruptions and releases it on
//! deactivation. Platform backends (iOS AVFoundation) implement the
//! `AudioResource`, `CaptureSubSession` and `InterruptionSource` traits and
//! plug into the generic `AudioSessionManager`.
//!
//! ## Architecture
//!
//! ```text
//! audio-session-core (this crate)
//! ├── traits/    ← AudioResource, CaptureSubSession, InterruptionSource, Scheduler, SessionDelegate
//! ├── models/    ← SessionError, ActivationState, AudioSessionConfig, RetryPolicy, CameraDevice, etc.
//! ├── session/   ← AudioSessionManager (activation, bounded retry, interruption recovery)
//! └── runtime/   ← ThreadScheduler, InterruptionBroadcaster
//! ```

pub mod models;
pub mod runtime;
pub mod session;
pub mod traits;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience.
pub use models::activation::{ActivationAttempt, ActivationReport, AttemptOutcome};
pub use models::audio_port::{AudioPort, PortType};
pub use models::camera_device::{CameraDevice, CameraDeviceType};
pub use models::config::{AudioSessionConfig, CategoryOptions, RetryPolicy, SessionCategory, SessionMode};
pub use models::error::{ResourceError, SessionError, BUSY_ERROR_CODE};
pub use models::interruption::InterruptionEvent;
pub use models::state::ActivationState;
pub use runtime::broadcaster::InterruptionBroadcaster;
pub use runtime::thread_scheduler::ThreadScheduler;
pub use session::manager::{AudioSessionManager, ManagerOptions, RecordingSignal};
pub use traits::audio_resource::AudioResource;
pub use traits::capture_session::CaptureSubSession;
pub use traits::interruption_source::{InterruptionHandler, InterruptionSource, SubscriptionId};
pub use traits::scheduler::{Scheduler, Task};
pub use traits::session_delegate::SessionDelegate;
