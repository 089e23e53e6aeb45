use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::SessionError;

/// Intended audio use, negotiated with the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCategory {
    Ambient,
    SoloAmbient,
    Playback,
    Record,
    PlayAndRecord,
    MultiRoute,
}

/// Refinement of the category that tunes routing and signal processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Default,
    VideoRecording,
    VideoChat,
    VoiceChat,
    Measurement,
    MoviePlayback,
}

/// Category option flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryOptions {
    pub mix_with_others: bool,
    pub allow_bluetooth_a2dp: bool,
    pub default_to_speaker: bool,
    pub allow_air_play: bool,
}

impl CategoryOptions {
    pub const NONE: Self = Self {
        mix_with_others: false,
        allow_bluetooth_a2dp: false,
        default_to_speaker: false,
        allow_air_play: false,
    };
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self {
            mix_with_others: true,
            allow_bluetooth_a2dp: true,
            default_to_speaker: true,
            allow_air_play: true,
        }
    }
}

/// Static configuration applied to the shared audio session on every
/// activation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSessionConfig {
    pub category: SessionCategory,
    pub mode: SessionMode,
    pub options: CategoryOptions,

    /// Ask the OS not to interrupt recording for system alerts (ringtones etc).
    pub prefers_no_interruptions_from_system_alerts: bool,

    /// Keep haptics and system sounds audible while recording.
    pub allow_system_sounds_during_recording: bool,
}

impl AudioSessionConfig {
    pub fn validate(&self) -> Result<(), SessionError> {
        let routing_options = self.options.default_to_speaker
            || self.options.allow_bluetooth_a2dp
            || self.options.allow_air_play;
        if routing_options && self.category != SessionCategory::PlayAndRecord {
            return Err(SessionError::ConfigurationInvalid(format!(
                "routing options require the play_and_record category, got {:?}",
                self.category
            )));
        }
        Ok(())
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            SessionError::ConfigurationInvalid(format!("failed to parse session config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SessionError::ConfigurationInvalid(format!("failed to serialize session config: {}", e))
        })
    }
}

impl Default for AudioSessionConfig {
    fn default() -> Self {
        Self {
            category: SessionCategory::PlayAndRecord,
            mode: SessionMode::VideoRecording,
            options: CategoryOptions::default(),
            prefers_no_interruptions_from_system_alerts: true,
            allow_system_sounds_during_recording: true,
        }
    }
}

/// Bounded retry policy for activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first one (default: 5).
    pub max_attempts: u32,

    /// Fixed delay between attempts in milliseconds (default: 100).
    pub delay_ms: u64,

    /// Retry failures other than "busy" as well (default: false).
    pub retry_non_busy_errors: bool,
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.max_attempts == 0 {
            return Err(SessionError::ConfigurationInvalid(
                "max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Whether a failed attempt with this error should be followed by another.
    pub fn should_retry(&self, error: &SessionError, attempt: u32) -> bool {
        if attempt + 1 >= self.max_attempts {
            return false;
        }
        error.is_busy() || self.retry_non_busy_errors
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 100,
            retry_non_busy_errors: false,
        }
    }
}
