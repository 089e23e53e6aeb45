//! `AudioResource` backed by the process-wide `AVAudioSession`.

use objc2::rc::Retained;
use objc2_avf_audio::{
    AVAudioSession, AVAudioSessionCategory, AVAudioSessionCategoryAmbient,
    AVAudioSessionCategoryMultiRoute, AVAudioSessionCategoryOptions, AVAudioSessionCategoryPlayAndRecord,
    AVAudioSessionCategoryPlayback, AVAudioSessionCategoryRecord, AVAudioSessionCategorySoloAmbient,
    AVAudioSessionMode, AVAudioSessionModeDefault, AVAudioSessionModeMeasurement,
    AVAudioSessionModeMoviePlayback, AVAudioSessionModeVideoChat, AVAudioSessionModeVideoRecording,
    AVAudioSessionModeVoiceChat, AVAudioSessionPortDescription, AVAudioSessionPortOverride,
    AVAudioSessionSetActiveOptions,
};
use objc2_foundation::{NSArray, NSError};

use audio_session_core::models::audio_port::AudioPort;
use audio_session_core::models::config::{CategoryOptions, SessionCategory, SessionMode};
use audio_session_core::models::error::ResourceError;
use audio_session_core::traits::audio_resource::AudioResource;

use crate::raw_names::port_type_from_raw;

/// Status used when a constant is missing on the running OS version.
const UNAVAILABLE: i64 = -1;

/// Handle to `AVAudioSession.sharedInstance()`.
pub struct AvAudioSessionResource {
    session: Retained<AVAudioSession>,
}

// SAFETY: AVAudioSession is documented as safe to use from any thread, and
// this type only forwards calls to it.
unsafe impl Send for AvAudioSessionResource {}
unsafe impl Sync for AvAudioSessionResource {}

impl AvAudioSessionResource {
    pub fn shared() -> Self {
        Self {
            session: unsafe { AVAudioSession::sharedInstance() },
        }
    }

    fn find_input(&self, port_id: &str) -> Result<Retained<AVAudioSessionPortDescription>, ResourceError> {
        let inputs = unsafe { self.session.availableInputs() };
        inputs
            .into_iter()
            .flat_map(|ports| ports.iter().collect::<Vec<_>>())
            .find(|port| unsafe { port.UID() }.to_string() == port_id)
            .ok_or_else(|| ResourceError::new(UNAVAILABLE, format!("no input port with id {}", port_id)))
    }
}

impl AudioResource for AvAudioSessionResource {
    fn set_category(
        &self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), ResourceError> {
        let category = category_name(category)?;
        let mode = mode_name(mode)?;
        unsafe {
            self.session
                .setCategory_mode_options_error(category, mode, category_options(options))
        }
        .map_err(ns_error)
    }

    fn set_prefers_no_interruptions_from_system_alerts(&self, enabled: bool) -> Result<(), ResourceError> {
        unsafe { self.session.setPrefersNoInterruptionsFromSystemAlerts_error(enabled) }.map_err(ns_error)
    }

    fn set_allow_system_sounds_during_recording(&self, enabled: bool) -> Result<(), ResourceError> {
        unsafe { self.session.setAllowHapticsAndSystemSoundsDuringRecording_error(enabled) }
            .map_err(ns_error)
    }

    fn set_active(&self, active: bool) -> Result<(), ResourceError> {
        if active {
            unsafe { self.session.setActive_error(true) }.map_err(ns_error)
        } else {
            // Let other apps (music players) resume once we let go.
            unsafe {
                self.session.setActive_withOptions_error(
                    false,
                    AVAudioSessionSetActiveOptions::NotifyOthersOnDeactivation,
                )
            }
            .map_err(ns_error)
        }
    }

    fn override_output_to_speaker(&self, enabled: bool) -> Result<(), ResourceError> {
        let port = if enabled {
            AVAudioSessionPortOverride::Speaker
        } else {
            AVAudioSessionPortOverride::None
        };
        unsafe { self.session.overrideOutputAudioPort_error(port) }.map_err(ns_error)
    }

    fn current_outputs(&self) -> Result<Vec<AudioPort>, ResourceError> {
        let route = unsafe { self.session.currentRoute() };
        Ok(ports(&unsafe { route.outputs() }))
    }

    fn available_inputs(&self) -> Result<Vec<AudioPort>, ResourceError> {
        Ok(unsafe { self.session.availableInputs() }
            .map(|inputs| ports(&inputs))
            .unwrap_or_default())
    }

    fn set_preferred_input(&self, port_id: Option<&str>) -> Result<(), ResourceError> {
        let port = port_id.map(|id| self.find_input(id)).transpose()?;
        unsafe { self.session.setPreferredInput_error(port.as_deref()) }.map_err(ns_error)
    }
}

fn ns_error(err: Retained<NSError>) -> ResourceError {
    ResourceError::new(err.code() as i64, err.localizedDescription().to_string())
}

fn ports(list: &NSArray<AVAudioSessionPortDescription>) -> Vec<AudioPort> {
    list.iter()
        .map(|port| unsafe {
            AudioPort {
                id: port.UID().to_string(),
                name: port.portName().to_string(),
                port_type: port_type_from_raw(&port.portType().to_string()),
            }
        })
        .collect()
}

/// AVFAudio string constants are weakly linked on older OS versions;
/// normalise them to `Option` so a missing one becomes an error.
fn constant<T: ?Sized + 'static>(value: impl Into<Option<&'static T>>, what: &str) -> Result<&'static T, ResourceError> {
    value
        .into()
        .ok_or_else(|| ResourceError::new(UNAVAILABLE, format!("{} is unavailable on this OS", what)))
}

fn category_name(category: SessionCategory) -> Result<&'static AVAudioSessionCategory, ResourceError> {
    unsafe {
        match category {
            SessionCategory::Ambient => constant(AVAudioSessionCategoryAmbient, "ambient category"),
            SessionCategory::SoloAmbient => constant(AVAudioSessionCategorySoloAmbient, "solo ambient category"),
            SessionCategory::Playback => constant(AVAudioSessionCategoryPlayback, "playback category"),
            SessionCategory::Record => constant(AVAudioSessionCategoryRecord, "record category"),
            SessionCategory::PlayAndRecord => {
                constant(AVAudioSessionCategoryPlayAndRecord, "play and record category")
            }
            SessionCategory::MultiRoute => constant(AVAudioSessionCategoryMultiRoute, "multi route category"),
        }
    }
}

fn mode_name(mode: SessionMode) -> Result<&'static AVAudioSessionMode, ResourceError> {
    unsafe {
        match mode {
            SessionMode::Default => constant(AVAudioSessionModeDefault, "default mode"),
            SessionMode::VideoRecording => constant(AVAudioSessionModeVideoRecording, "video recording mode"),
            SessionMode::VideoChat => constant(AVAudioSessionModeVideoChat, "video chat mode"),
            SessionMode::VoiceChat => constant(AVAudioSessionModeVoiceChat, "voice chat mode"),
            SessionMode::Measurement => constant(AVAudioSessionModeMeasurement, "measurement mode"),
            SessionMode::MoviePlayback => constant(AVAudioSessionModeMoviePlayback, "movie playback mode"),
        }
    }
}

fn category_options(options: CategoryOptions) -> AVAudioSessionCategoryOptions {
    let mut bits = 0;
    if options.mix_with_others {
        bits |= AVAudioSessionCategoryOptions::MixWithOthers.0;
    }
    if options.allow_bluetooth_a2dp {
        bits |= AVAudioSessionCategoryOptions::AllowBluetoothA2DP.0;
    }
    if options.default_to_speaker {
        bits |= AVAudioSessionCategoryOptions::DefaultToSpeaker.0;
    }
    if options.allow_air_play {
        bits |= AVAudioSessionCategoryOptions::AllowAirPlay.0;
    }
    AVAudioSessionCategoryOptions(bits)
}
