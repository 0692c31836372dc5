//! Preview thumbnail bridge traits.
//!
//! While the user scrubs the timeline the core asks the host image pipeline
//! for one decoded frame near the scrub position. Frame times are expressed
//! in microseconds, the unit image pipelines use for video frame extraction.

use crate::{engine::MediaSource, error::Result, platform::PlatformSendSync};
use bytes::Bytes;
use std::time::Duration;

/// Request for a single decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    /// Media to extract the frame from.
    pub source: MediaSource,
    /// Frame time in microseconds.
    pub frame_time_us: u64,
}

impl ThumbnailRequest {
    /// Create a request for the frame nearest to `position`.
    pub fn new(source: MediaSource, position: Duration) -> Self {
        Self {
            source,
            frame_time_us: duration_to_micros(position),
        }
    }

    /// Requested frame time as a [`Duration`].
    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(self.frame_time_us)
    }
}

/// Convert a duration into whole microseconds, saturating at `u64::MAX`.
pub fn duration_to_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// A decoded preview frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFrame {
    /// Time of the frame that was actually decoded, in microseconds.
    pub frame_time_us: u64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Encoded or raw image bytes, in whatever format the target expects.
    pub data: Bytes,
}

impl PreviewFrame {
    pub fn new(frame_time_us: u64, width: u32, height: u32, data: Bytes) -> Self {
        Self {
            frame_time_us,
            width,
            height,
            data,
        }
    }
}

/// Host image pipeline able to extract a frame from a media source.
///
/// Decoding happens off the control thread; the core awaits the future from a
/// spawned task and hands the result back to the control thread itself.
#[async_trait::async_trait]
pub trait ThumbnailLoader: PlatformSendSync {
    /// Decode the frame nearest to `request.frame_time_us`.
    async fn load_frame(&self, request: ThumbnailRequest) -> Result<PreviewFrame>;
}

/// The view that displays the preview thumbnail.
///
/// Only ever called from the control thread.
pub trait PreviewTarget: PlatformSendSync {
    /// Show the placeholder while a frame is being fetched.
    fn show_placeholder(&self, placeholder: &str);

    /// Replace the placeholder with a decoded frame.
    fn show_frame(&self, frame: &PreviewFrame);
}
