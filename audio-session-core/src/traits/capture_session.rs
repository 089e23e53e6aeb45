use crate::models::error::ResourceError;

/// Capture sub-session owned by the manager (e.g. the audio half of a
/// camera session).
pub trait CaptureSubSession: Send {
    fn start(&mut self) -> Result<(), ResourceError>;

    fn stop(&mut self);

    fn is_running(&self) -> bool;
}
