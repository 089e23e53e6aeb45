//! `InterruptionSource` fed by `AVAudioSessionInterruptionNotification`.

use std::ptr::NonNull;
use std::sync::Arc;

use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::{AnyObject, NSObjectProtocol, ProtocolObject};
use objc2_avf_audio::{
    AVAudioSessionInterruptionNotification, AVAudioSessionInterruptionOptionKey,
    AVAudioSessionInterruptionOptions, AVAudioSessionInterruptionType, AVAudioSessionInterruptionTypeKey,
};
use objc2_foundation::{NSDictionary, NSNotification, NSNotificationCenter, NSNotificationName, NSNumber, NSString};

use audio_session_core::models::interruption::InterruptionEvent;
use audio_session_core::runtime::broadcaster::InterruptionBroadcaster;
use audio_session_core::traits::interruption_source::{InterruptionHandler, InterruptionSource, SubscriptionId};

/// Observes audio session interruptions through `NSNotificationCenter` and
/// fans them out to subscribers. The observer is removed on drop.
pub struct InterruptionObserver {
    broadcaster: Arc<InterruptionBroadcaster>,
    token: Option<Retained<ProtocolObject<dyn NSObjectProtocol>>>,
}

// SAFETY: the observer token is only used to unregister in `drop`, which
// NSNotificationCenter allows from any thread.
unsafe impl Send for InterruptionObserver {}
unsafe impl Sync for InterruptionObserver {}

impl InterruptionObserver {
    pub fn register() -> Self {
        let broadcaster = Arc::new(InterruptionBroadcaster::new());

        let name: Option<&'static NSNotificationName> = unsafe { AVAudioSessionInterruptionNotification }.into();
        let Some(name) = name else {
            log::error!("AVAudioSessionInterruptionNotification unavailable; interruptions will not be observed");
            return Self {
                broadcaster,
                token: None,
            };
        };

        let sink = Arc::clone(&broadcaster);
        let block = RcBlock::new(move |notification: NonNull<NSNotification>| {
            let notification = unsafe { notification.as_ref() };
            match parse_interruption(notification) {
                Some(event) => sink.publish(event),
                None => log::warn!("Ignoring malformed audio session interruption notification"),
            }
        });

        let center = NSNotificationCenter::defaultCenter();
        let token = unsafe { center.addObserverForName_object_queue_usingBlock(Some(name), None, None, &block) };

        Self {
            broadcaster,
            token: Some(token),
        }
    }
}

impl InterruptionSource for InterruptionObserver {
    fn subscribe(&self, handler: InterruptionHandler) -> SubscriptionId {
        self.broadcaster.subscribe(handler)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.broadcaster.unsubscribe(id);
    }
}

impl Drop for InterruptionObserver {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            let observer: &AnyObject = AsRef::<AnyObject>::as_ref(&*token);
            unsafe { NSNotificationCenter::defaultCenter().removeObserver(observer) };
        }
    }
}

fn parse_interruption(notification: &NSNotification) -> Option<InterruptionEvent> {
    let info = notification.userInfo()?;

    let type_key: Option<&'static NSString> = unsafe { AVAudioSessionInterruptionTypeKey }.into();
    let kind = number_for(&info, type_key?)?;

    if kind == AVAudioSessionInterruptionType::Began.0 {
        return Some(InterruptionEvent::Began);
    }
    if kind != AVAudioSessionInterruptionType::Ended.0 {
        return None;
    }

    // The option key is absent when the system gives no resume hint.
    let option_key: Option<&'static NSString> = unsafe { AVAudioSessionInterruptionOptionKey }.into();
    let options = option_key.and_then(|key| number_for(&info, key)).unwrap_or(0);
    Some(InterruptionEvent::Ended {
        should_resume: options & AVAudioSessionInterruptionOptions::ShouldResume.0 != 0,
    })
}

fn number_for(info: &NSDictionary, key: &NSString) -> Option<usize> {
    let value = unsafe { info.objectForKey(key) }?;
    let number = value.downcast::<NSNumber>().ok()?;
    Some(number.as_usize())
}
