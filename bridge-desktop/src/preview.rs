//! Preview thumbnail adapters for hosts without an image pipeline.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    PreviewFrame, PreviewTarget, ThumbnailLoader, ThumbnailRequest,
};
use bytes::Bytes;
use parking_lot::Mutex;
use tracing::debug;

const BYTES_PER_PIXEL: usize = 4;

/// [`ThumbnailLoader`] returning a solid RGBA frame of a fixed size.
#[derive(Debug, Clone)]
pub struct BlankFrameLoader {
    width: u32,
    height: u32,
    fill: [u8; 4],
}

impl BlankFrameLoader {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fill: [0, 0, 0, 0xff],
        }
    }

    /// Uses `rgba` for every pixel.
    pub fn with_fill(mut self, rgba: [u8; 4]) -> Self {
        self.fill = rgba;
        self
    }
}

impl Default for BlankFrameLoader {
    fn default() -> Self {
        Self::new(160, 90)
    }
}

#[async_trait]
impl ThumbnailLoader for BlankFrameLoader {
    async fn load_frame(&self, request: ThumbnailRequest) -> Result<PreviewFrame> {
        if self.width == 0 || self.height == 0 {
            return Err(BridgeError::InvalidArgument(
                "preview frame dimensions must be non-zero".to_string(),
            ));
        }

        let pixels = self.width as usize * self.height as usize;
        let data: Vec<u8> = self
            .fill
            .iter()
            .copied()
            .cycle()
            .take(pixels * BYTES_PER_PIXEL)
            .collect();
        debug!(
            frame_time_us = request.frame_time_us,
            width = self.width,
            height = self.height,
            "Generated blank preview frame"
        );

        Ok(PreviewFrame::new(
            request.frame_time_us,
            self.width,
            self.height,
            Bytes::from(data),
        ))
    }
}

/// What a [`TracingPreviewTarget`] currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    Placeholder(String),
    Frame { frame_time_us: u64 },
}

/// [`PreviewTarget`] that logs and remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct TracingPreviewTarget {
    current: Mutex<Option<PreviewContent>>,
}

impl TracingPreviewTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<PreviewContent> {
        self.current.lock().clone()
    }
}

impl PreviewTarget for TracingPreviewTarget {
    fn show_placeholder(&self, placeholder: &str) {
        debug!(placeholder, "Showing preview placeholder");
        *self.current.lock() = Some(PreviewContent::Placeholder(placeholder.to_string()));
    }

    fn show_frame(&self, frame: &PreviewFrame) {
        debug!(frame_time_us = frame.frame_time_us, "Showing preview frame");
        *self.current.lock() = Some(PreviewContent::Frame {
            frame_time_us: frame.frame_time_us,
        });
    }
}
