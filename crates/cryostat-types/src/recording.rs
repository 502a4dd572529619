//! Flight Recorder recordings and the options used to start them.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Flight Recorder recording on a single target.
///
/// The `name` is only unique within the target that owns the recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recording {
    /// Server-assigned identifier.
    pub id: i64,
    /// Caller-chosen name, unique per target.
    pub name: String,
    /// Raw state string as reported by the service.
    pub state: String,
    /// Start time in milliseconds since the Unix epoch.
    pub start_time: i64,
    /// Fixed duration in milliseconds, `0` when continuous.
    pub duration: i64,
    /// Whether the recording runs until explicitly stopped.
    pub continuous: bool,
    /// Whether recorded data is flushed to disk.
    pub to_disk: bool,
    /// Maximum size in bytes, `0` for unlimited.
    pub max_size: i64,
    /// Maximum age in milliseconds, `0` for unlimited.
    pub max_age: i64,
    /// URL the recording can be downloaded from.
    pub download_url: String,
    /// URL of the automated analysis report, empty until available.
    pub report_url: String,
    /// Labels attached to the recording.
    pub metadata: RecordingMetadata,
}

/// Metadata attached to a recording or archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingMetadata {
    /// Free-form labels.
    pub labels: BTreeMap<String, String>,
}

impl Recording {
    /// Parsed recording state.
    #[must_use]
    pub fn state(&self) -> RecordingState {
        RecordingState::from_api(&self.state)
    }

    /// When the recording started, if the service reported a start time.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        if self.start_time <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.start_time)
    }

    /// The fixed duration, or `None` for continuous recordings.
    #[must_use]
    pub fn fixed_duration(&self) -> Option<Duration> {
        u64::try_from(self.duration)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Whether the service has a report available for this recording.
    #[must_use]
    pub fn has_report(&self) -> bool {
        !self.report_url.is_empty()
    }
}

/// State of a recording as reported by the Flight Recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordingState {
    /// Created but not yet started.
    New,
    /// Scheduled to start after a delay.
    Delayed,
    /// Capturing events.
    Running,
    /// No longer capturing; data is still available.
    Stopped,
    /// Closed and released by the JVM.
    Closed,
    /// Any state string this client does not know about.
    #[default]
    Unknown,
}

impl RecordingState {
    /// Parse a state from the string the service sends.
    #[must_use]
    pub fn from_api(state: &str) -> Self {
        match state.to_ascii_uppercase().as_str() {
            "NEW" => Self::New,
            "DELAYED" => Self::Delayed,
            "RUNNING" => Self::Running,
            "STOPPED" => Self::Stopped,
            "CLOSED" => Self::Closed,
            _ => Self::Unknown,
        }
    }

    /// Check if the recording is still capturing or about to.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::New | Self::Delayed | Self::Running)
    }

    /// Check if the recording has finished capturing.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped | Self::Closed)
    }
}

/// Parameters for starting a recording.
///
/// Sent form-encoded; unset fields are left to the service's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingCreateOptions {
    /// Name of the new recording.
    pub recording_name: String,
    /// Event specifier, e.g. `template=Profiling`.
    pub events: String,
    /// Duration in seconds; omitted for a continuous recording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// Whether to flush data to disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_disk: Option<bool>,
    /// Maximum size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    /// Maximum age in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
}

impl RecordingCreateOptions {
    /// Options for a continuous recording with the given name and events.
    #[must_use]
    pub fn new(recording_name: impl Into<String>, events: impl Into<String>) -> Self {
        Self {
            recording_name: recording_name.into(),
            events: events.into(),
            duration: None,
            to_disk: None,
            max_size: None,
            max_age: None,
        }
    }

    /// Stop the recording after `seconds`. Zero keeps it continuous.
    #[must_use]
    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration = (seconds > 0).then_some(seconds);
        self
    }

    /// Set whether data is flushed to disk.
    #[must_use]
    pub fn with_to_disk(mut self, to_disk: bool) -> Self {
        self.to_disk = Some(to_disk);
        self
    }

    /// Cap the recording size in bytes.
    #[must_use]
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Cap the age of retained data in seconds.
    #[must_use]
    pub fn with_max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Whether these options describe a continuous recording.
    #[must_use]
    pub const fn is_continuous(&self) -> bool {
        self.duration.is_none()
    }
}
