//! Thread-backed `Scheduler`.

use std::thread;
use std::time::Duration;

use crate::models::error::SessionError;
use crate::traits::scheduler::{Scheduler, Task};

/// Runs each task on its own named worker thread; delays are real sleeps.
#[derive(Debug, Clone)]
pub struct ThreadScheduler {
    thread_name: String,
}

impl ThreadScheduler {
    pub fn new() -> Self {
        Self::with_thread_name("audio-session-worker")
    }

    pub fn with_thread_name(name: impl Into<String>) -> Self {
        Self {
            thread_name: name.into(),
        }
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ThreadScheduler {
    fn spawn(&self, task: Task) -> Result<(), SessionError> {
        thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(task)
            .map(|_| ())
            .map_err(|e| SessionError::SchedulerUnavailable(format!("failed to spawn worker: {}", e)))
    }

    fn delay(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn runs_task_on_named_worker() {
        let scheduler = ThreadScheduler::with_thread_name("test-worker");
        let (tx, rx) = mpsc::channel();
        scheduler
            .spawn(Box::new(move || {
                let name = thread::current().name().map(str::to_string);
                tx.send(name).unwrap();
            }))
            .unwrap();

        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some("test-worker"));
    }
}
