use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::SessionError;

/// Result of a single activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Busy,
    Fatal(SessionError),
}

/// One attempt within an activation sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationAttempt {
    /// Zero-based attempt counter within the sequence.
    pub attempt: u32,
    pub outcome: AttemptOutcome,
}

impl ActivationAttempt {
    pub fn from_result(attempt: u32, result: &Result<(), SessionError>) -> Self {
        let outcome = match result {
            Ok(()) => AttemptOutcome::Success,
            Err(e) if e.is_busy() => AttemptOutcome::Busy,
            Err(e) => AttemptOutcome::Fatal(e.clone()),
        };
        Self { attempt, outcome }
    }
}

/// Terminal summary of an activation sequence, handed to the delegate.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationReport {
    pub sequence_id: Uuid,
    pub attempts: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: Result<(), SessionError>,
}

impl ActivationReport {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}
