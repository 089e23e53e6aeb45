//! `CaptureSubSession` over an `AVCaptureSession`.

use objc2::rc::Retained;
use objc2_av_foundation::AVCaptureSession;

use audio_session_core::models::error::ResourceError;
use audio_session_core::traits::capture_session::CaptureSubSession;

/// `AVErrorUnknown`.
const AV_ERROR_UNKNOWN: i64 = -11800;

/// Wraps the audio capture session of a camera pipeline.
///
/// `startRunning`/`stopRunning` block until the session has changed state,
/// so call these from a background worker, never the main thread.
pub struct AvCaptureSubSession {
    session: Retained<AVCaptureSession>,
}

// SAFETY: AVCaptureSession may be started and stopped from any serial
// context; the manager serializes all access behind its capture lock.
unsafe impl Send for AvCaptureSubSession {}

impl AvCaptureSubSession {
    pub fn new(session: Retained<AVCaptureSession>) -> Self {
        Self { session }
    }
}

impl CaptureSubSession for AvCaptureSubSession {
    fn start(&mut self) -> Result<(), ResourceError> {
        unsafe { self.session.startRunning() };
        // Start failures are only reported via AVCaptureSessionRuntimeErrorNotification.
        if self.is_running() {
            Ok(())
        } else {
            Err(ResourceError::new(AV_ERROR_UNKNOWN, "capture session did not start"))
        }
    }

    fn stop(&mut self) {
        unsafe { self.session.stopRunning() };
    }

    fn is_running(&self) -> bool {
        unsafe { self.session.isRunning() }
    }
}
