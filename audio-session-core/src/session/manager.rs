use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::{Condvar, Mutex};
use uuid::Uuid;

use crate::models::activation::{ActivationAttempt, ActivationReport, AttemptOutcome};
use crate::models::audio_port::AudioPort;
use crate::models::config::{AudioSessionConfig, RetryPolicy};
use crate::models::error::SessionError;
use crate::models::interruption::InterruptionEvent;
use crate::models::state::ActivationState;
use crate::traits::audio_resource::AudioResource;
use crate::traits::capture_session::CaptureSubSession;
use crate::traits::interruption_source::{InterruptionSource, SubscriptionId};
use crate::traits::scheduler::Scheduler;
use crate::traits::session_delegate::SessionDelegate;

/// Reports whether the host currently intends to record. Consulted only when
/// an interruption ends with a resume hint.
pub type RecordingSignal = Arc<dyn Fn() -> bool + Send + Sync + 'static>;

/// Tunables for `AudioSessionManager`.
#[derive(Clone)]
pub struct ManagerOptions {
    pub config: AudioSessionConfig,
    pub retry_policy: RetryPolicy,

    /// Defaults to "never recording", which disables automatic resume.
    pub recording_signal: RecordingSignal,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            config: AudioSessionConfig::default(),
            retry_policy: RetryPolicy::default(),
            recording_signal: Arc::new(|| false),
        }
    }
}

/// State shared between the manager handle, scheduled sequences and the
/// interruption subscription.
struct Shared<R, C> {
    resource: R,
    // Held for the whole of an attempt and of a deactivation, so the two
    // never interleave.
    capture: Mutex<C>,
    config: AudioSessionConfig,
    policy: RetryPolicy,
    scheduler: Arc<dyn Scheduler>,
    recording_signal: RecordingSignal,
    delegate: Mutex<Option<Arc<dyn SessionDelegate>>>,
    state: Mutex<ActivationState>,
    settled: Condvar,
    // Only modified while `state` is locked.
    generation: AtomicU64,
}

/// Owns activation and deactivation of the shared OS audio session and
/// recovers from interruptions.
///
/// Generic over the session handle and the capture sub-session so it can be
/// driven by AVFoundation on device and by fakes in tests.
///
/// ```text
/// activate() ─spawn→ [worker] attempt 0 ─busy→ delay → attempt 1 ... → Active / Failed
/// OS interruption ended + resume hint ─spawn→ activate()
/// deactivate() → stop capture → release session (errors logged) → Idle
/// ```
pub struct AudioSessionManager<R, C>
where
    R: AudioResource + 'static,
    C: CaptureSubSession + 'static,
{
    shared: Arc<Shared<R, C>>,
    interruptions: Arc<dyn InterruptionSource>,
    subscription: SubscriptionId,
}

impl<R, C> AudioSessionManager<R, C>
where
    R: AudioResource + 'static,
    C: CaptureSubSession + 'static,
{
    /// Validate the options and subscribe to `interruptions`.
    ///
    /// Dropping the manager removes the subscription and deactivates.
    pub fn new(
        resource: R,
        capture: C,
        interruptions: Arc<dyn InterruptionSource>,
        scheduler: Arc<dyn Scheduler>,
        options: ManagerOptions,
    ) -> Result<Self, SessionError> {
        options.config.validate()?;
        options.retry_policy.validate()?;

        let shared = Arc::new(Shared {
            resource,
            capture: Mutex::new(capture),
            config: options.config,
            policy: options.retry_policy,
            scheduler,
            recording_signal: options.recording_signal,
            delegate: Mutex::new(None),
            state: Mutex::new(ActivationState::Idle),
            settled: Condvar::new(),
            generation: AtomicU64::new(0),
        });

        let weak: Weak<Shared<R, C>> = Arc::downgrade(&shared);
        let subscription = interruptions.subscribe(Arc::new(move |event: InterruptionEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_interruption(event);
            }
        }));

        Ok(Self {
            shared,
            interruptions,
            subscription,
        })
    }

    pub fn set_delegate(&self, delegate: Arc<dyn SessionDelegate>) {
        *self.shared.delegate.lock() = Some(delegate);
    }

    pub fn state(&self) -> ActivationState {
        self.shared.state.lock().clone()
    }

    pub fn config(&self) -> &AudioSessionConfig {
        &self.shared.config
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.shared.policy
    }

    pub fn is_capture_running(&self) -> bool {
        self.shared.capture.lock().is_running()
    }

    /// Start a bounded-retry activation sequence on the scheduler.
    ///
    /// No-op when already active with capture running, or when a sequence is
    /// in flight. Returns an
    /// error only if the sequence could not be scheduled; the terminal outcome
    /// is reported through the state, the delegate and `wait_for_outcome`.
    pub fn activate(&self) -> Result<(), SessionError> {
        self.shared.begin_activation(None)
    }

    /// Run a single activation attempt on the calling thread, without retry.
    ///
    /// Supersedes any sequence still in flight.
    pub fn try_activate_once(&self) -> Result<(), SessionError> {
        self.shared.activate_once()
    }

    /// Stop the capture sub-session and release the shared session.
    ///
    /// Never fails: a release error is logged. Pending retries and
    /// interruption-triggered re-activations are invalidated.
    pub fn deactivate(&self) {
        self.shared.deactivate();
    }

    /// Process an interruption notification. Normally invoked through the
    /// subscription; exposed for hosts that deliver events themselves.
    pub fn handle_interruption(&self, event: InterruptionEvent) {
        self.shared.handle_interruption(event);
    }

    /// Block until no activation is in flight or `timeout` elapses, then
    /// return the current state.
    pub fn wait_for_outcome(&self, timeout: Duration) -> ActivationState {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.state.lock();
        while !state.is_settled() {
            if self.shared.settled.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        state.clone()
    }

    /// Route output to the built-in speaker, or restore the default route.
    pub fn override_output_to_speaker(&self, enabled: bool) -> Result<(), SessionError> {
        self.shared
            .resource
            .override_output_to_speaker(enabled)
            .map_err(|e| SessionError::RoutingFailed(e.to_string()))
    }

    pub fn current_outputs(&self) -> Result<Vec<AudioPort>, SessionError> {
        self.shared
            .resource
            .current_outputs()
            .map_err(|e| SessionError::RoutingFailed(e.to_string()))
    }

    pub fn available_inputs(&self) -> Result<Vec<AudioPort>, SessionError> {
        self.shared
            .resource
            .available_inputs()
            .map_err(|e| SessionError::RoutingFailed(e.to_string()))
    }

    pub fn set_preferred_input(&self, port_id: Option<&str>) -> Result<(), SessionError> {
        self.shared
            .resource
            .set_preferred_input(port_id)
            .map_err(|e| SessionError::RoutingFailed(e.to_string()))
    }
}

impl<R, C> Drop for AudioSessionManager<R, C>
where
    R: AudioResource + 'static,
    C: CaptureSubSession + 'static,
{
    fn drop(&mut self) {
        self.interruptions.unsubscribe(self.subscription);
        // Also invalidates pending sequences, which keep `shared` alive.
        self.shared.deactivate();
    }
}

impl<R, C> Shared<R, C>
where
    R: AudioResource + 'static,
    C: CaptureSubSession + 'static,
{
    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.current_generation() != generation
    }

    /// Move to `Attempting(0)` under a fresh generation.
    ///
    /// Returns `None` when there is nothing to do: already active with capture
    /// running, a sequence is in flight, or `expected` no longer matches the
    /// current generation.
    fn start_sequence(&self, expected: Option<u64>, supersede: bool) -> Option<u64> {
        let generation = {
            // Same lock order as `deactivate`: capture, then state.
            let capture = self.capture.lock();
            let mut state = self.state.lock();
            if let Some(expected) = expected {
                if self.current_generation() != expected {
                    log::info!("Dropping stale re-activation request");
                    return None;
                }
            }
            match *state {
                ActivationState::Active if capture.is_running() => {
                    log::debug!("Audio session already active");
                    return None;
                }
                ActivationState::Active => {
                    log::info!("Audio session marked active but capture stopped; reactivating");
                }
                ActivationState::Attempting(_) if !supersede => {
                    log::debug!("Activation already in progress");
                    return None;
                }
                _ => {}
            }
            *state = ActivationState::Attempting(0);
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        self.notify_state(&ActivationState::Attempting(0));
        Some(generation)
    }

    fn begin_activation(self: &Arc<Self>, expected: Option<u64>) -> Result<(), SessionError> {
        let Some(generation) = self.start_sequence(expected, false) else {
            return Ok(());
        };

        let shared = Arc::clone(self);
        if let Err(e) = self
            .scheduler
            .spawn(Box::new(move || shared.run_sequence(generation)))
        {
            log::error!("Failed to schedule audio session activation: {}", e);
            self.settle(generation, ActivationState::Failed(e.clone()));
            return Err(e);
        }
        Ok(())
    }

    fn activate_once(&self) -> Result<(), SessionError> {
        let Some(generation) = self.start_sequence(None, true) else {
            return Ok(());
        };
        let sequence_id = Uuid::new_v4();
        let started_at = Utc::now();

        let result = match self.attempt_once(generation) {
            Some(result) => result,
            None => {
                return Err(SessionError::ActivationFailed(
                    "superseded by deactivation".into(),
                ))
            }
        };
        if let Err(ref e) = result {
            log::warn!("[{}] Single activation attempt failed: {}", sequence_id, e);
        }

        self.finish(generation, sequence_id, started_at, 1, result.clone());
        result
    }

    /// The bounded retry loop. Runs on the scheduler.
    fn run_sequence(&self, generation: u64) {
        let sequence_id = Uuid::new_v4();
        let started_at = Utc::now();
        let max_attempts = self.policy.max_attempts;
        let mut attempt = 0;

        log::info!("[{}] Activating audio session", sequence_id);

        let outcome = loop {
            if attempt > 0 && !self.mark_attempt(generation, attempt) {
                log::info!("[{}] Activation superseded before attempt {}", sequence_id, attempt + 1);
                return;
            }

            let Some(result) = self.attempt_once(generation) else {
                log::info!("[{}] Activation superseded before attempt {}", sequence_id, attempt + 1);
                return;
            };
            let record = ActivationAttempt::from_result(attempt, &result);
            log::debug!("[{}] {:?}", sequence_id, record);

            match result {
                Ok(()) => break Ok(()),
                Err(err) if self.policy.should_retry(&err, attempt) => {
                    log::warn!(
                        "[{}] Attempt {}/{} failed: {}; retrying in {}ms",
                        sequence_id,
                        attempt + 1,
                        max_attempts,
                        err,
                        self.policy.delay_ms
                    );
                    self.scheduler.delay(self.policy.delay());
                    attempt += 1;
                }
                Err(err) => {
                    if record.outcome == AttemptOutcome::Busy {
                        log::error!(
                            "[{}] Audio session still busy after {} attempt(s)",
                            sequence_id,
                            attempt + 1
                        );
                    }
                    break Err(err);
                }
            }
        };

        let attempts = attempt + 1;
        let outcome = outcome.map_err(|err| match err {
            SessionError::ActivationFailed(msg) => SessionError::ActivationFailed(msg),
            other => SessionError::ActivationFailed(format!("{} ({} attempt(s))", other, attempts)),
        });
        self.finish(generation, sequence_id, started_at, attempts, outcome);
    }

    /// Apply the configuration, activate the session and start capture.
    ///
    /// Returns `None` without touching anything when `generation` is stale.
    fn attempt_once(&self, generation: u64) -> Option<Result<(), SessionError>> {
        let mut capture = self.capture.lock();
        if self.is_stale(generation) {
            return None;
        }
        Some(self.apply(&mut *capture))
    }

    fn apply(&self, capture: &mut C) -> Result<(), SessionError> {
        let config = &self.config;
        self.resource
            .set_category(config.category, config.mode, config.options)
            .map_err(SessionError::from_activation)?;
        self.resource
            .set_prefers_no_interruptions_from_system_alerts(
                config.prefers_no_interruptions_from_system_alerts,
            )
            .map_err(SessionError::from_activation)?;
        self.resource
            .set_allow_system_sounds_during_recording(config.allow_system_sounds_during_recording)
            .map_err(SessionError::from_activation)?;
        self.resource
            .set_active(true)
            .map_err(SessionError::from_activation)?;

        if !capture.is_running() {
            capture.start().map_err(SessionError::from_activation)?;
        }
        Ok(())
    }

    fn mark_attempt(&self, generation: u64, attempt: u32) -> bool {
        {
            let mut state = self.state.lock();
            if self.is_stale(generation) {
                return false;
            }
            *state = ActivationState::Attempting(attempt);
        }
        self.notify_state(&ActivationState::Attempting(attempt));
        true
    }

    fn finish(
        &self,
        generation: u64,
        sequence_id: Uuid,
        started_at: chrono::DateTime<Utc>,
        attempts: u32,
        outcome: Result<(), SessionError>,
    ) {
        let next = match &outcome {
            Ok(()) => ActivationState::Active,
            Err(e) => ActivationState::Failed(e.clone()),
        };
        if !self.settle(generation, next) {
            log::info!("[{}] Activation outcome discarded: superseded", sequence_id);
            return;
        }

        match &outcome {
            Ok(()) => log::info!("[{}] Audio session active after {} attempt(s)", sequence_id, attempts),
            Err(e) => log::error!("[{}] {}", sequence_id, e),
        }

        let report = ActivationReport {
            sequence_id,
            attempts,
            started_at,
            finished_at: Utc::now(),
            outcome,
        };
        if let Some(delegate) = self.delegate() {
            delegate.on_activation_finished(&report);
        }
    }

    /// Store a settled state if `generation` is still current.
    fn settle(&self, generation: u64, next: ActivationState) -> bool {
        {
            let mut state = self.state.lock();
            if self.is_stale(generation) {
                return false;
            }
            *state = next.clone();
            self.settled.notify_all();
        }
        self.notify_state(&next);
        true
    }

    fn deactivate(&self) {
        let mut capture = self.capture.lock();
        let changed = {
            let mut state = self.state.lock();
            self.generation.fetch_add(1, Ordering::SeqCst);
            let changed = !state.is_idle();
            *state = ActivationState::Idle;
            self.settled.notify_all();
            changed
        };

        if capture.is_running() {
            capture.stop();
        }
        if let Err(e) = self.resource.set_active(false) {
            let err = SessionError::DeactivationFailed(e.to_string());
            log::warn!("Ignoring audio session release failure: {}", err);
        }
        drop(capture);

        log::info!("Audio session deactivated");
        if changed {
            self.notify_state(&ActivationState::Idle);
        }
    }

    fn handle_interruption(self: &Arc<Self>, event: InterruptionEvent) {
        if let Some(delegate) = self.delegate() {
            delegate.on_interruption(&event);
        }

        match event {
            InterruptionEvent::Began => {
                log::info!("Audio session interruption began");
                let changed = {
                    let mut state = self.state.lock();
                    if state.is_active() {
                        *state = ActivationState::Idle;
                        true
                    } else {
                        false
                    }
                };
                if changed {
                    self.notify_state(&ActivationState::Idle);
                }
            }
            InterruptionEvent::Ended { .. } if !event.suggests_resume() => {
                log::info!("Audio session interruption ended without resume hint; not resuming");
            }
            InterruptionEvent::Ended { .. } => {
                if !(self.recording_signal)() {
                    log::info!("Audio session interruption ended; no recording intended");
                    return;
                }

                log::info!("Audio session interruption ended; resuming");
                let generation = self.current_generation();
                let shared = Arc::clone(self);
                let scheduled = self.scheduler.spawn(Box::new(move || {
                    if let Err(e) = shared.begin_activation(Some(generation)) {
                        log::error!("Failed to re-activate audio session: {}", e);
                    }
                }));
                if let Err(e) = scheduled {
                    log::error!("Failed to schedule audio session re-activation: {}", e);
                }
            }
        }
    }

    fn delegate(&self) -> Option<Arc<dyn SessionDelegate>> {
        self.delegate.lock().clone()
    }

    fn notify_state(&self, state: &ActivationState) {
        if let Some(delegate) = self.delegate() {
            delegate.on_state_changed(state);
        }
    }
}
