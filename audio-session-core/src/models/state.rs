use super::error::SessionError;

/// Activation state machine.
///
/// State transitions:
/// ```text
/// idle ─activate→ attempting(0) ─ok→ active
///                  │  busy, n < max-1
///                  └→ attempting(n+1) ... ─exhausted / fatal→ failed
/// active ─interruption began→ idle
/// active with capture stopped ─activate→ attempting(0)
/// any ─deactivate→ idle
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationState {
    Idle,
    Attempting(u32),
    Active,
    Failed(SessionError),
}

impl ActivationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_attempting(&self) -> bool {
        matches!(self, Self::Attempting(_))
    }

    /// True for the outcomes a caller can observe as completion.
    pub fn is_settled(&self) -> bool {
        !self.is_attempting()
    }
}
