use std::time::Duration;

use crate::models::error::SessionError;

/// Unit of work handed to a background execution context.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Background execution context plus the delay used between retries.
///
/// Injected so tests can run activation sequences without real time passing.
pub trait Scheduler: Send + Sync {
    /// Run `task` off the calling thread.
    fn spawn(&self, task: Task) -> Result<(), SessionError>;

    /// Suspend the current background task for `duration`.
    fn delay(&self, duration: Duration);
}
