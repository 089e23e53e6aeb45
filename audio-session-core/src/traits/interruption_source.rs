use std::sync::Arc;

use crate::models::interruption::InterruptionEvent;

/// Callback invoked for every interruption notification.
///
/// Runs on whatever thread the source delivers on; keep it short.
pub type InterruptionHandler = Arc<dyn Fn(InterruptionEvent) + Send + Sync + 'static>;

/// Token returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Asynchronous channel of interruption notifications.
pub trait InterruptionSource: Send + Sync {
    fn subscribe(&self, handler: InterruptionHandler) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}
