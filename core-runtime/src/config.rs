//! # Player Configuration
//!
//! Settings decided once when the player is constructed: which media to play,
//! which lifecycle phases own the engine, what to tell the user on each engine
//! state, and how preview frames are fetched.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::config::{PlayerConfig, ReleasePolicy};
//!
//! let config = PlayerConfig::builder()
//!     .media_uri("https://cdn.example.com/video.mp4")
//!     .platform_version(23)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.release_policy, ReleasePolicy::PreStopRelease);
//! ```
//!
//! Hosts that ship their settings as JSON can use
//! [`PlayerConfig::from_json_str`]; every field except `media_uri` has a
//! default.

use crate::error::{Error, Result};
use bridge_traits::engine::{EngineState, MediaSource};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// First platform version whose "visible" lifecycle boundary is START/STOP.
///
/// Below it, a host may stay started while hidden behind another window, so
/// the engine has to follow RESUME/PAUSE instead.
pub const MULTI_WINDOW_PLATFORM_VERSION: u32 = 24;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Which pair of lifecycle phases creates and releases the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// Engine created on RESUME and released on PAUSE, before STOP.
    PreStopRelease,
    /// Engine created on START and released on STOP.
    #[default]
    PostStopRelease,
}

impl ReleasePolicy {
    /// Pick the policy for a platform capability value.
    ///
    /// `version >= threshold` selects [`ReleasePolicy::PostStopRelease`].
    pub fn for_platform_version(version: u32, threshold: u32) -> Self {
        if version >= threshold {
            ReleasePolicy::PostStopRelease
        } else {
            ReleasePolicy::PreStopRelease
        }
    }
}

/// User-facing message for every engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessages {
    #[serde(default = "default_idle_message")]
    pub idle: String,
    #[serde(default = "default_buffering_message")]
    pub buffering: String,
    #[serde(default = "default_ready_message")]
    pub ready: String,
    #[serde(default = "default_ended_message")]
    pub ended: String,
    #[serde(default = "default_unknown_message")]
    pub unknown: String,
}

impl Default for NotificationMessages {
    fn default() -> Self {
        Self {
            idle: default_idle_message(),
            buffering: default_buffering_message(),
            ready: default_ready_message(),
            ended: default_ended_message(),
            unknown: default_unknown_message(),
        }
    }
}

impl NotificationMessages {
    /// Message to show when the engine enters `state`.
    pub fn message_for(&self, state: EngineState) -> &str {
        match state {
            EngineState::Idle => &self.idle,
            EngineState::Buffering => &self.buffering,
            EngineState::Ready => &self.ready,
            EngineState::Ended => &self.ended,
            EngineState::Unknown => &self.unknown,
        }
    }
}

/// Preview thumbnail settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Maximum time to wait for the image pipeline to decode one frame.
    ///
    /// Default: 10 seconds.
    #[serde(default = "default_frame_timeout")]
    pub frame_timeout: Duration,

    /// Placeholder shown on the preview target until the frame resolves.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            frame_timeout: default_frame_timeout(),
            placeholder: default_placeholder(),
        }
    }
}

/// Player configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Locator of the media to play. Required.
    pub media_uri: String,

    /// Lifecycle phases that own the engine.
    #[serde(default)]
    pub release_policy: ReleasePolicy,

    /// Messages shown on engine state changes.
    #[serde(default)]
    pub notifications: NotificationMessages,

    /// Preview thumbnail settings.
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Capacity of the event bus channel.
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
}

impl PlayerConfig {
    /// Creates a new builder for constructing a `PlayerConfig`.
    pub fn builder() -> PlayerConfigBuilder {
        PlayerConfigBuilder::default()
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PlayerConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid player configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configured media URI into a [`MediaSource`].
    pub fn media_source(&self) -> Result<MediaSource> {
        MediaSource::parse(self.media_uri.as_str())
            .map_err(|e| Error::Config(format!("Invalid media URI: {}", e)))
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - The media URI is not blank
    /// - The event buffer can hold at least one event
    /// - The preview frame timeout is non-zero
    /// - The preview placeholder is named
    pub fn validate(&self) -> Result<()> {
        self.media_source()?;

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "event_buffer_size must be greater than 0".to_string(),
            ));
        }

        if self.preview.frame_timeout.is_zero() {
            return Err(Error::Config(
                "preview.frame_timeout must be greater than 0".to_string(),
            ));
        }

        if self.preview.placeholder.trim().is_empty() {
            return Err(Error::Config(
                "preview.placeholder cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`PlayerConfig`] instances.
#[derive(Debug, Default)]
pub struct PlayerConfigBuilder {
    media_uri: Option<String>,
    release_policy: Option<ReleasePolicy>,
    notifications: Option<NotificationMessages>,
    preview: Option<PreviewConfig>,
    event_buffer_size: Option<usize>,
}

impl PlayerConfigBuilder {
    /// Sets the media locator (required).
    pub fn media_uri(mut self, uri: impl Into<String>) -> Self {
        self.media_uri = Some(uri.into());
        self
    }

    /// Sets the release policy explicitly.
    pub fn release_policy(mut self, policy: ReleasePolicy) -> Self {
        self.release_policy = Some(policy);
        self
    }

    /// Derives the release policy from the host platform version using
    /// [`MULTI_WINDOW_PLATFORM_VERSION`] as the threshold.
    pub fn platform_version(self, version: u32) -> Self {
        self.platform_version_with_threshold(version, MULTI_WINDOW_PLATFORM_VERSION)
    }

    /// Derives the release policy from the host platform version and a custom
    /// threshold.
    pub fn platform_version_with_threshold(mut self, version: u32, threshold: u32) -> Self {
        self.release_policy = Some(ReleasePolicy::for_platform_version(version, threshold));
        self
    }

    /// Overrides the engine state messages.
    pub fn notifications(mut self, messages: NotificationMessages) -> Self {
        self.notifications = Some(messages);
        self
    }

    /// Overrides the preview settings.
    pub fn preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Sets the event bus capacity.
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Builds the final `PlayerConfig`, validating it.
    pub fn build(self) -> Result<PlayerConfig> {
        let media_uri = self.media_uri.ok_or_else(|| {
            Error::Config("Media URI is required. Use .media_uri() to set it.".to_string())
        })?;

        let config = PlayerConfig {
            media_uri,
            release_policy: self.release_policy.unwrap_or_default(),
            notifications: self.notifications.unwrap_or_default(),
            preview: self.preview.unwrap_or_default(),
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;

        Ok(config)
    }
}

// ============================================================================
// Default Functions (for serde)
// ============================================================================

fn default_idle_message() -> String {
    "Unable to load the video. Please check your network connection.".to_string()
}

fn default_buffering_message() -> String {
    "Loading video...".to_string()
}

fn default_ready_message() -> String {
    "Video is ready".to_string()
}

fn default_ended_message() -> String {
    "Video finished".to_string()
}

fn default_unknown_message() -> String {
    "Unknown playback state".to_string()
}

fn default_frame_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_placeholder() -> String {
    "video_frame_alternative".to_string()
}

fn default_event_buffer_size() -> usize {
    DEFAULT_EVENT_BUFFER_SIZE
}
