//! Headless playback engine.
//!
//! Keeps transport state in memory and advances the position with the wall
//! clock while playing. Nothing is decoded or rendered, which makes it useful
//! for desktop shells without a media stack and for end-to-end tests.

use bridge_traits::{
    error::Result, EngineFactory, EngineListener, EngineState, ListenerId, MediaSource,
    PlaybackEngine,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// In-memory [`PlaybackEngine`].
pub struct HeadlessEngine {
    source: Option<MediaSource>,
    state: EngineState,
    play_when_ready: bool,
    item_index: usize,
    /// Position at `since`, or the frozen position when not advancing.
    anchor: Duration,
    since: Option<Instant>,
    item_duration: Option<Duration>,
    listeners: Vec<(ListenerId, Arc<dyn EngineListener>)>,
    released: bool,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            source: None,
            state: EngineState::Idle,
            play_when_ready: false,
            item_index: 0,
            anchor: Duration::ZERO,
            since: None,
            item_duration: None,
            listeners: Vec::new(),
            released: false,
        }
    }

    /// Caps the position of every item at `duration`.
    pub fn with_item_duration(mut self, duration: Duration) -> Self {
        self.item_duration = Some(duration);
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn media_source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    fn set_state(&mut self, state: EngineState) {
        if self.state == state {
            return;
        }
        self.state = state;
        debug!(%state, "Headless engine state changed");

        let listeners: Vec<_> = self
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener.on_state_changed(state);
        }
    }

    fn freeze_clock(&mut self) {
        self.anchor = self.current_position();
        self.since = None;
    }

    fn resume_clock(&mut self) {
        self.since = self.is_playing().then(Instant::now);
    }

    fn clamp(&self, position: Duration) -> Duration {
        match self.item_duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackEngine for HeadlessEngine {
    fn set_media_source(&mut self, source: &MediaSource) {
        if self.released {
            warn!("Ignoring media source on released engine");
            return;
        }
        self.source = Some(source.clone());
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        if self.released {
            return;
        }
        self.freeze_clock();
        self.play_when_ready = play_when_ready;
        self.resume_clock();
    }

    fn play_when_ready(&self) -> bool {
        self.play_when_ready
    }

    fn is_playing(&self) -> bool {
        !self.released && self.play_when_ready && self.state == EngineState::Ready
    }

    fn seek_to(&mut self, item_index: usize, position: Duration) {
        if self.released {
            return;
        }
        self.item_index = item_index;
        self.anchor = self.clamp(position);
        self.since = None;
        self.resume_clock();
    }

    fn prepare(&mut self) {
        if self.released {
            warn!("Ignoring prepare on released engine");
            return;
        }
        if self.source.is_none() {
            warn!("Prepare called without a media source");
            self.set_state(EngineState::Idle);
            return;
        }
        self.freeze_clock();
        self.set_state(EngineState::Buffering);
        self.set_state(EngineState::Ready);
        self.resume_clock();
    }

    fn current_position(&self) -> Duration {
        let position = match self.since {
            Some(since) => self.anchor.saturating_add(since.elapsed()),
            None => self.anchor,
        };
        self.clamp(position)
    }

    fn current_item_index(&self) -> usize {
        self.item_index
    }

    fn add_listener(&mut self, listener: Arc<dyn EngineListener>) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.push((id, listener));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.freeze_clock();
        self.listeners.clear();
        self.state = EngineState::Idle;
        self.released = true;
        debug!("Headless engine released");
    }
}

/// Builds [`HeadlessEngine`]s and counts them.
#[derive(Default)]
pub struct HeadlessEngineFactory {
    created: AtomicUsize,
    item_duration: Option<Duration>,
}

impl HeadlessEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item_duration(mut self, duration: Duration) -> Self {
        self.item_duration = Some(duration);
        self
    }

    /// Number of engines built so far.
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl EngineFactory for HeadlessEngineFactory {
    fn create_engine(&self) -> Result<Box<dyn PlaybackEngine>> {
        let mut engine = HeadlessEngine::new();
        if let Some(duration) = self.item_duration {
            engine = engine.with_item_duration(duration);
        }
        let count = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(count, "Created headless engine");
        Ok(Box::new(engine))
    }
}
