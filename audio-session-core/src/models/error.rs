use thiserror::Error;

/// OS status code for "insufficient priority": the shared session is held by
/// another process. AVAudioSession reports it as `'!pri'`.
pub const BUSY_ERROR_CODE: i64 = 561_017_449;

/// Raw failure reported by an `AudioResource` backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("audio resource error {code}: {message}")]
pub struct ResourceError {
    pub code: i64,
    pub message: String,
}

impl ResourceError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for the transient "in use by another process" failure.
    pub fn busy() -> Self {
        Self::new(BUSY_ERROR_CODE, "session is in use by another process")
    }

    pub fn is_busy(&self) -> bool {
        self.code == BUSY_ERROR_CODE
    }
}

/// Errors surfaced by the audio session manager.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("audio session busy (code {code})")]
    ResourceBusy { code: i64 },

    #[error("activation failed: {0}")]
    ActivationFailed(String),

    #[error("deactivation failed: {0}")]
    DeactivationFailed(String),

    #[error("routing failed: {0}")]
    RoutingFailed(String),

    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("scheduler unavailable: {0}")]
    SchedulerUnavailable(String),
}

impl SessionError {
    /// Classify a backend failure raised while activating.
    pub fn from_activation(err: ResourceError) -> Self {
        if err.is_busy() {
            Self::ResourceBusy { code: err.code }
        } else {
            Self::ActivationFailed(err.to_string())
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::ResourceBusy { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_code_is_classified_as_transient() {
        let err = SessionError::from_activation(ResourceError::new(561017449, "!pri"));
        assert_eq!(err, SessionError::ResourceBusy { code: 561017449 });
        assert!(err.is_busy());
    }

    #[test]
    fn other_codes_are_activation_failures() {
        let err = SessionError::from_activation(ResourceError::new(-50, "bad param"));
        assert!(!err.is_busy());
        match err {
            SessionError::ActivationFailed(msg) => assert!(msg.contains("bad param")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
