//! Playback engine bridge traits and supporting types.
//!
//! A [`PlaybackEngine`] is the host's stateful media unit (ExoPlayer,
//! AVPlayer, a GStreamer pipeline...). The core never shares an engine: it
//! asks an [`EngineFactory`] for a fresh one, drives it from the control
//! thread, and releases it when the host UI stops being visible.
//!
//! Engine calls are synchronous. Hosts whose native engine is asynchronous
//! are expected to queue the command and return immediately; progress is
//! reported back through [`EngineListener`].

use crate::{
    error::{BridgeError, Result},
    platform::{PlatformSend, PlatformSendSync},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// Opaque locator for the media an engine plays.
///
/// Resolved once when an engine is created and never changed afterwards.
/// Locators that parse as absolute URLs keep the parsed form; anything else
/// (bare paths, content ids) stays an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaSource {
    uri: String,
    url: Option<Url>,
}

impl MediaSource {
    /// Build a source from a URI string.
    ///
    /// Only empty or whitespace-only values are rejected.
    pub fn parse(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        let trimmed = uri.trim();
        if trimmed.is_empty() {
            return Err(BridgeError::InvalidArgument(
                "media source URI cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            uri: trimmed.to_string(),
            url: Url::parse(trimmed).ok(),
        })
    }

    /// Borrow the locator exactly as supplied (trimmed).
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The parsed URL, when the locator is an absolute URL.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// URI scheme (`https`, `file`, ...), lowercased, if the locator has one.
    pub fn scheme(&self) -> Option<&str> {
        self.url.as_ref().map(Url::scheme)
    }

    /// Returns `true` if the source requires network access.
    pub fn is_remote(&self) -> bool {
        matches!(self.scheme(), Some("http" | "https" | "rtsp" | "rtmp"))
    }
}

impl TryFrom<String> for MediaSource {
    type Error = BridgeError;

    fn try_from(uri: String) -> Result<Self> {
        Self::parse(uri)
    }
}

impl From<MediaSource> for String {
    fn from(source: MediaSource) -> Self {
        source.uri
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Engine playback state as reported through [`EngineListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    /// No media prepared, or preparation failed (e.g. unreachable source).
    Idle,
    /// Waiting for enough data to start or continue playback.
    Buffering,
    /// Able to play immediately.
    Ready,
    /// Reached the end of the media.
    Ended,
    /// Engine reported a state the core does not recognise.
    Unknown,
}

impl EngineState {
    /// Map a raw engine state code (`1..=4`) onto a state.
    ///
    /// Codes follow the common media-framework numbering: 1 idle,
    /// 2 buffering, 3 ready, 4 ended. Anything else is [`EngineState::Unknown`].
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => EngineState::Idle,
            2 => EngineState::Buffering,
            3 => EngineState::Ready,
            4 => EngineState::Ended,
            _ => EngineState::Unknown,
        }
    }

    /// Returns `true` for the states that mean "nothing is playing because
    /// something went wrong".
    pub fn is_failure(&self) -> bool {
        matches!(self, EngineState::Idle | EngineState::Unknown)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Idle => "idle",
            EngineState::Buffering => "buffering",
            EngineState::Ready => "ready",
            EngineState::Ended => "ended",
            EngineState::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Handle returned by [`PlaybackEngine::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Generate a new listener identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer for engine state transitions.
pub trait EngineListener: PlatformSendSync {
    /// Called by the engine whenever its playback state changes.
    fn on_state_changed(&self, state: EngineState);
}

/// Host media engine driven by the playback controller.
///
/// Implementations own native decoder/renderer resources. After
/// [`release`](PlaybackEngine::release) the engine is never used again.
pub trait PlaybackEngine: PlatformSend {
    /// Bind the media the engine should play.
    fn set_media_source(&mut self, source: &MediaSource);

    /// Set the "play as soon as buffering permits" intent flag.
    fn set_play_when_ready(&mut self, play_when_ready: bool);

    /// Current value of the play-when-ready intent flag.
    fn play_when_ready(&self) -> bool;

    /// Returns `true` while frames are actually being rendered.
    fn is_playing(&self) -> bool;

    /// Seek to `position` within the media item at `item_index`.
    fn seek_to(&mut self, item_index: usize, position: Duration);

    /// Start loading the bound media.
    fn prepare(&mut self);

    /// Current playback position within the current item.
    fn current_position(&self) -> Duration;

    /// Index of the media item currently playing.
    fn current_item_index(&self) -> usize;

    /// Register a state observer.
    fn add_listener(&mut self, listener: Arc<dyn EngineListener>) -> ListenerId;

    /// Detach a previously registered observer. Unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);

    /// Free every native resource held by the engine.
    fn release(&mut self);
}

/// Constructs fresh [`PlaybackEngine`] instances.
pub trait EngineFactory: PlatformSendSync {
    /// Build a new, unprepared engine.
    fn create_engine(&self) -> Result<Box<dyn PlaybackEngine>>;
}
