use crate::models::activation::ActivationReport;
use crate::models::interruption::InterruptionEvent;
use crate::models::state::ActivationState;

/// Event delegate for audio session notifications.
///
/// Methods are called from background workers and notification threads,
/// never while the manager holds its locks.
pub trait SessionDelegate: Send + Sync {
    /// Called when the activation state changes.
    fn on_state_changed(&self, state: &ActivationState);

    /// Called once per activation sequence with its terminal outcome.
    fn on_activation_finished(&self, report: &ActivationReport);

    /// Called for every interruption notification received.
    fn on_interruption(&self, _event: &InterruptionEvent) {}
}
