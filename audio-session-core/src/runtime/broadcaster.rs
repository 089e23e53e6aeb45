//! In-process `InterruptionSource`.
//!
//! Backends that observe OS notifications forward them through `publish`;
//! hosts that bridge notifications manually can do the same.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::models::interruption::InterruptionEvent;
use crate::traits::interruption_source::{InterruptionHandler, InterruptionSource, SubscriptionId};

#[derive(Default)]
pub struct InterruptionBroadcaster {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(SubscriptionId, InterruptionHandler)>>,
}

impl InterruptionBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every current subscriber.
    ///
    /// Handlers run outside the subscriber lock, so they may unsubscribe.
    pub fn publish(&self, event: InterruptionEvent) {
        let handlers: Vec<InterruptionHandler> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        log::debug!("Publishing {:?} to {} subscriber(s)", event, handlers.len());
        for handler in handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl InterruptionSource for InterruptionBroadcaster {
    fn subscribe(&self, handler: InterruptionHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.subscribers.lock().push((id, handler));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().retain(|(sub, _)| *sub != id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn publish_reaches_subscribers_until_unsubscribed() {
        let broadcaster = InterruptionBroadcaster::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let id = broadcaster.subscribe(Arc::new(move |event: InterruptionEvent| sink.lock().push(event)));
        assert_eq!(broadcaster.subscriber_count(), 1);

        broadcaster.publish(InterruptionEvent::Began);
        broadcaster.unsubscribe(id);
        broadcaster.publish(InterruptionEvent::Ended { should_resume: true });

        assert_eq!(*seen.lock(), vec![InterruptionEvent::Began]);
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn subscription_ids_are_unique() {
        let broadcaster = InterruptionBroadcaster::new();
        let a = broadcaster.subscribe(Arc::new(|_: InterruptionEvent| {}));
        let b = broadcaster.subscribe(Arc::new(|_: InterruptionEvent| {}));
        assert_ne!(a, b);
    }
}
