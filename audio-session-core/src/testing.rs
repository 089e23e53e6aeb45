//! In-memory fakes for the trait seams. Compiled for tests only.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::models::activation::ActivationReport;
use crate::models::audio_port::{AudioPort, PortType};
use crate::models::config::{CategoryOptions, SessionCategory, SessionMode};
use crate::models::error::{ResourceError, SessionError};
use crate::models::interruption::InterruptionEvent;
use crate::models::state::ActivationState;
use crate::traits::audio_resource::AudioResource;
use crate::traits::capture_session::CaptureSubSession;
use crate::traits::scheduler::{Scheduler, Task};
use crate::traits::session_delegate::SessionDelegate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceCall {
    SetCategory(SessionCategory, SessionMode, CategoryOptions),
    PrefersNoInterruptions(bool),
    AllowSystemSounds(bool),
    SetActive(bool),
    OverrideSpeaker(bool),
    SetPreferredInput(Option<String>),
}

/// Scripted audio session: each `set_active(true)` pops the next result.
pub struct FakeResource {
    activation_results: Mutex<VecDeque<Result<(), ResourceError>>>,
    release_error: Mutex<Option<ResourceError>>,
    calls: Mutex<Vec<ResourceCall>>,
    outputs: Mutex<Vec<AudioPort>>,
    inputs: Mutex<Vec<AudioPort>>,
}

impl FakeResource {
    pub fn new() -> Self {
        Self::with_activation_results(Vec::new())
    }

    /// Results for successive activations; once exhausted, activation succeeds.
    pub fn with_activation_results(results: Vec<Result<(), ResourceError>>) -> Self {
        Self {
            activation_results: Mutex::new(results.into()),
            release_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            outputs: Mutex::new(vec![AudioPort {
                id: "speaker".into(),
                name: "Speaker".into(),
                port_type: PortType::BuiltInSpeaker,
            }]),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_release(&self, error: ResourceError) {
        *self.release_error.lock() = Some(error);
    }

    pub fn set_inputs(&self, inputs: Vec<AudioPort>) {
        *self.inputs.lock() = inputs;
    }

    pub fn calls(&self) -> Vec<ResourceCall> {
        self.calls.lock().clone()
    }

    pub fn activation_attempts(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| **c == ResourceCall::SetActive(true))
            .count()
    }

    fn record(&self, call: ResourceCall) {
        self.calls.lock().push(call);
    }
}

impl AudioResource for FakeResource {
    fn set_category(
        &self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), ResourceError> {
        self.record(ResourceCall::SetCategory(category, mode, options));
        Ok(())
    }

    fn set_prefers_no_interruptions_from_system_alerts(&self, enabled: bool) -> Result<(), ResourceError> {
        self.record(ResourceCall::PrefersNoInterruptions(enabled));
        Ok(())
    }

    fn set_allow_system_sounds_during_recording(&self, enabled: bool) -> Result<(), ResourceError> {
        self.record(ResourceCall::AllowSystemSounds(enabled));
        Ok(())
    }

    fn set_active(&self, active: bool) -> Result<(), ResourceError> {
        self.record(ResourceCall::SetActive(active));
        if active {
            self.activation_results.lock().pop_front().unwrap_or(Ok(()))
        } else {
            match self.release_error.lock().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    fn override_output_to_speaker(&self, enabled: bool) -> Result<(), ResourceError> {
        self.record(ResourceCall::OverrideSpeaker(enabled));
        Ok(())
    }

    fn current_outputs(&self) -> Result<Vec<AudioPort>, ResourceError> {
        Ok(self.outputs.lock().clone())
    }

    fn available_inputs(&self) -> Result<Vec<AudioPort>, ResourceError> {
        Ok(self.inputs.lock().clone())
    }

    fn set_preferred_input(&self, port_id: Option<&str>) -> Result<(), ResourceError> {
        if let Some(id) = port_id {
            if !self.inputs.lock().iter().any(|p| p.id == id) {
                return Err(ResourceError::new(-50, format!("unknown port {}", id)));
            }
        }
        self.record(ResourceCall::SetPreferredInput(port_id.map(str::to_string)));
        Ok(())
    }
}

/// Capture sub-session whose state is shared between clones, so a test can
/// keep a handle after moving one into the manager.
#[derive(Clone, Default)]
pub struct FakeCapture {
    running: Arc<AtomicBool>,
    starts: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
    start_error: Arc<Mutex<Option<ResourceError>>>,
}

impl FakeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_start(&self, error: ResourceError) {
        *self.start_error.lock() = Some(error);
    }

    /// The OS stopped the session behind our back.
    pub fn simulate_interrupted(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl CaptureSubSession for FakeCapture {
    fn start(&mut self) -> Result<(), ResourceError> {
        if let Some(err) = self.start_error.lock().take() {
            return Err(err);
        }
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

type DelayHook = Arc<dyn Fn(usize) + Send + Sync>;

/// Deterministic scheduler. Inline mode runs tasks on the caller's thread;
/// queued mode holds them until `run_pending`. Delays are recorded, not slept.
pub struct ManualScheduler {
    inline: bool,
    queue: Mutex<VecDeque<Task>>,
    delays: Mutex<Vec<Duration>>,
    delay_hook: Mutex<Option<DelayHook>>,
    spawned: AtomicUsize,
}

impl ManualScheduler {
    pub fn inline() -> Self {
        Self::build(true)
    }

    pub fn queued() -> Self {
        Self::build(false)
    }

    fn build(inline: bool) -> Self {
        Self {
            inline,
            queue: Mutex::new(VecDeque::new()),
            delays: Mutex::new(Vec::new()),
            delay_hook: Mutex::new(None),
            spawned: AtomicUsize::new(0),
        }
    }

    /// Called with the 1-based delay count every time a task delays.
    pub fn on_delay(&self, hook: impl Fn(usize) + Send + Sync + 'static) {
        *self.delay_hook.lock() = Some(Arc::new(hook));
    }

    /// Run queued tasks, including ones they enqueue, until the queue is empty.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let Some(task) = self.queue.lock().pop_front() else {
                return ran;
            };
            task();
            ran += 1;
        }
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.load(Ordering::SeqCst)
    }
}

impl Scheduler for ManualScheduler {
    fn spawn(&self, task: Task) -> Result<(), SessionError> {
        self.spawned.fetch_add(1, Ordering::SeqCst);
        if self.inline {
            task();
        } else {
            self.queue.lock().push_back(task);
        }
        Ok(())
    }

    fn delay(&self, duration: Duration) {
        let count = {
            let mut delays = self.delays.lock();
            delays.push(duration);
            delays.len()
        };
        let hook = self.delay_hook.lock().clone();
        if let Some(hook) = hook {
            hook(count);
        }
    }
}

#[derive(Default)]
pub struct RecordingDelegate {
    states: Mutex<Vec<ActivationState>>,
    reports: Mutex<Vec<ActivationReport>>,
    interruptions: Mutex<Vec<InterruptionEvent>>,
}

impl RecordingDelegate {
    pub fn states(&self) -> Vec<ActivationState> {
        self.states.lock().clone()
    }

    pub fn reports(&self) -> Vec<ActivationReport> {
        self.reports.lock().clone()
    }

    pub fn interruptions(&self) -> Vec<InterruptionEvent> {
        self.interruptions.lock().clone()
    }
}

impl SessionDelegate for RecordingDelegate {
    fn on_state_changed(&self, state: &ActivationState) {
        self.states.lock().push(state.clone());
    }

    fn on_activation_finished(&self, report: &ActivationReport) {
        self.reports.lock().push(report.clone());
    }

    fn on_interruption(&self, event: &InterruptionEvent) {
        self.interruptions.lock().push(*event);
    }
}
