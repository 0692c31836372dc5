//! Restorable playback state.
//!
//! The controller keeps one [`PlaybackState`] for the lifetime of the
//! player. It is captured from the engine on release and applied to every
//! new engine on creation, so playback resumes where it left off across
//! visibility changes.

use bridge_traits::PlaybackEngine;
use core_runtime::events::PlaybackSnapshot;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Position, item and intent captured from the last released engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Offset within the current item.
    pub position: Duration,
    /// Index of the current item in the engine's playlist.
    pub item_index: usize,
    /// Whether playback should proceed once the engine is ready.
    pub play_when_ready: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            position: Duration::ZERO,
            item_index: 0,
            play_when_ready: true,
        }
    }
}

impl PlaybackState {
    /// Reads the restorable state from a live engine.
    pub fn capture(engine: &dyn PlaybackEngine) -> Self {
        Self {
            position: engine.current_position(),
            item_index: engine.current_item_index(),
            play_when_ready: engine.play_when_ready(),
        }
    }

    /// Applies play-when-ready, then seeks to the stored item and position.
    pub fn apply_to(&self, engine: &mut dyn PlaybackEngine) {
        engine.set_play_when_ready(self.play_when_ready);
        engine.seek_to(self.item_index, self.position);
    }

    /// Event payload view of this state.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            item_index: self.item_index,
            position_ms: u64::try_from(self.position.as_millis()).unwrap_or(u64::MAX),
            play_when_ready: self.play_when_ready,
        }
    }
}
