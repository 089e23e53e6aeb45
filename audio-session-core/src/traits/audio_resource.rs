use crate::models::audio_port::AudioPort;
use crate::models::config::{CategoryOptions, SessionCategory, SessionMode};
use crate::models::error::ResourceError;

/// Handle to the process-wide OS audio session.
///
/// The OS owns the singleton; implementations only forward calls to it.
/// Implemented by:
/// - `AvAudioSessionResource` (iOS)
/// - `FakeResource` (tests)
pub trait AudioResource: Send + Sync {
    /// Set category, mode and option flags in one call.
    fn set_category(
        &self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), ResourceError>;

    fn set_prefers_no_interruptions_from_system_alerts(&self, enabled: bool) -> Result<(), ResourceError>;

    fn set_allow_system_sounds_during_recording(&self, enabled: bool) -> Result<(), ResourceError>;

    /// Activate or release the session.
    fn set_active(&self, active: bool) -> Result<(), ResourceError>;

    /// Force output to the built-in speaker, or restore the default route.
    fn override_output_to_speaker(&self, enabled: bool) -> Result<(), ResourceError>;

    /// Output ports of the current route.
    fn current_outputs(&self) -> Result<Vec<AudioPort>, ResourceError>;

    fn available_inputs(&self) -> Result<Vec<AudioPort>, ResourceError>;

    /// Select a preferred port by id, or clear the preference with `None`.
    fn set_preferred_input(&self, port_id: Option<&str>) -> Result<(), ResourceError>;
}

impl<T: AudioResource + ?Sized> AudioResource for std::sync::Arc<T> {
    fn set_category(
        &self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), ResourceError> {
        (**self).set_category(category, mode, options)
    }

    fn set_prefers_no_interruptions_from_system_alerts(&self, enabled: bool) -> Result<(), ResourceError> {
        (**self).set_prefers_no_interruptions_from_system_alerts(enabled)
    }

    fn set_allow_system_sounds_during_recording(&self, enabled: bool) -> Result<(), ResourceError> {
        (**self).set_allow_system_sounds_during_recording(enabled)
    }

    fn set_active(&self, active: bool) -> Result<(), ResourceError> {
        (**self).set_active(active)
    }

    fn override_output_to_speaker(&self, enabled: bool) -> Result<(), ResourceError> {
        (**self).override_output_to_speaker(enabled)
    }

    fn current_outputs(&self) -> Result<Vec<AudioPort>, ResourceError> {
        (**self).current_outputs()
    }

    fn available_inputs(&self) -> Result<Vec<AudioPort>, ResourceError> {
        (**self).available_inputs()
    }

    fn set_preferred_input(&self, port_id: Option<&str>) -> Result<(), ResourceError> {
        (**self).set_preferred_input(port_id)
    }
}
