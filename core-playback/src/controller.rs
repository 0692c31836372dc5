//! # Playback Controller
//!
//! Owns at most one playback engine at a time and the [`PlaybackState`] that
//! outlives it.
//!
//! ## Overview
//!
//! Hosts tear engines down whenever the player stops being visible (and on
//! rotation, low memory...). The controller makes that invisible to the user:
//!
//! - On release it captures position, item and play-when-ready from the
//!   engine before freeing it
//! - On creation it binds the media source, restores the captured state and
//!   prepares the new engine
//! - Engine state changes are turned into short user notifications
//!
//! Every mutator degrades to a no-op while no engine is live. Nothing here
//! returns an error: an engine that cannot be built is reported to the user
//! as the `idle` classification and the controller stays without an engine.
//!
//! ## Usage
//!
//! ```no_run
//! use core_playback::PlaybackController;
//! # use bridge_traits::{EngineFactory, MediaSource, UserNotifier};
//! # use std::sync::Arc;
//! # fn deps() -> (Arc<dyn EngineFactory>, Arc<dyn UserNotifier>) { todo!() }
//! let (factory, notifier) = deps();
//! let source = MediaSource::parse("https://cdn.example.com/clip.mp4").unwrap();
//!
//! let mut controller = PlaybackController::new(factory, source, notifier);
//! controller.create_engine();
//! controller.pause();
//! controller.release_engine();
//! ```

use crate::state::PlaybackState;
use bridge_traits::{
    EngineFactory, EngineListener, EngineState, ListenerId, MediaSource, Notification,
    PlaybackEngine, UserNotifier,
};
use core_runtime::config::NotificationMessages;
use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent};
use core_runtime::logging::redact_uri;
use parking_lot::Mutex;
use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, trace, warn};

/// The live engine reference, modelled explicitly so absence is a checked case.
enum EngineSlot {
    NoEngine,
    Live(LiveEngine),
}

struct LiveEngine {
    engine: Box<dyn PlaybackEngine>,
    listener_id: ListenerId,
    observer: Arc<StateObserver>,
}

/// Engine listener that maps state changes onto user notifications.
///
/// Detached observers ignore late callbacks from an engine that is being
/// released.
struct StateObserver {
    attached: AtomicBool,
    last_state: Mutex<Option<EngineState>>,
    notifier: Arc<dyn UserNotifier>,
    messages: NotificationMessages,
    events: Option<EventBus>,
}

impl StateObserver {
    fn new(
        notifier: Arc<dyn UserNotifier>,
        messages: NotificationMessages,
        events: Option<EventBus>,
    ) -> Self {
        Self {
            attached: AtomicBool::new(true),
            last_state: Mutex::new(None),
            notifier,
            messages,
            events,
        }
    }

    fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }
}

impl EngineListener for StateObserver {
    fn on_state_changed(&self, state: EngineState) {
        if !self.attached.load(Ordering::SeqCst) {
            trace!(%state, "Ignoring state change from detached engine");
            return;
        }

        {
            let mut last = self.last_state.lock();
            if *last == Some(state) {
                trace!(%state, "Engine repeated its current state");
                return;
            }
            *last = Some(state);
        }

        debug!(%state, "Engine state changed");
        self.notifier
            .notify(Notification::short(self.messages.message_for(state)));

        if let Some(events) = &self.events {
            let _ = events.emit(CoreEvent::Playback(PlaybackEvent::StateChanged { state }));
        }
    }
}

/// Single owner of the playback engine and its restorable state.
pub struct PlaybackController {
    factory: Arc<dyn EngineFactory>,
    source: MediaSource,
    bound_source: Option<MediaSource>,
    state: PlaybackState,
    slot: EngineSlot,
    notifier: Arc<dyn UserNotifier>,
    messages: NotificationMessages,
    events: Option<EventBus>,
}

impl PlaybackController {
    /// Creates a controller with default state and no engine.
    ///
    /// # Arguments
    ///
    /// * `factory` - Builds a fresh engine on every [`create_engine`](Self::create_engine)
    /// * `source` - Media locator bound to every engine this controller creates
    /// * `notifier` - Receives one notification per engine state transition
    pub fn new(
        factory: Arc<dyn EngineFactory>,
        source: MediaSource,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        Self {
            factory,
            source,
            bound_source: None,
            state: PlaybackState::default(),
            slot: EngineSlot::NoEngine,
            notifier,
            messages: NotificationMessages::default(),
            events: None,
        }
    }

    /// Replaces the per-state notification texts.
    pub fn with_messages(mut self, messages: NotificationMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Publishes playback events on the given bus.
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Builds a new engine, binds the source and restores the stored state.
    ///
    /// A live engine is captured and released first, so creation never
    /// overlaps with another engine. If the factory fails the user sees the
    /// `idle` notification and the controller stays without an engine.
    #[instrument(skip(self), fields(source = %redact_uri(self.source.uri())))]
    pub fn create_engine(&mut self) {
        self.release_engine();

        let mut engine = match self.factory.create_engine() {
            Ok(engine) => engine,
            Err(e) => {
                warn!(error = %e, "Failed to build playback engine");
                self.notifier.notify(Notification::short(
                    self.messages.message_for(EngineState::Idle),
                ));
                self.emit(PlaybackEvent::EngineUnavailable {
                    message: e.to_string(),
                });
                return;
            }
        };

        engine.set_media_source(&self.source);
        self.state.apply_to(engine.as_mut());

        let observer = Arc::new(StateObserver::new(
            Arc::clone(&self.notifier),
            self.messages.clone(),
            self.events.clone(),
        ));
        let listener_id = engine.add_listener(observer.clone() as Arc<dyn EngineListener>);
        engine.prepare();

        self.bound_source = Some(self.source.clone());
        self.slot = EngineSlot::Live(LiveEngine {
            engine,
            listener_id,
            observer,
        });

        info!(
            item_index = self.state.item_index,
            position_ms = self.state.snapshot().position_ms,
            play_when_ready = self.state.play_when_ready,
            "Playback engine created"
        );
        self.emit(PlaybackEvent::EngineCreated {
            restored: self.state.snapshot(),
        });
    }

    /// Captures the live engine's state and releases it.
    ///
    /// No-op without a live engine, so repeated calls are safe.
    #[instrument(skip(self))]
    pub fn release_engine(&mut self) {
        let live = match mem::replace(&mut self.slot, EngineSlot::NoEngine) {
            EngineSlot::NoEngine => {
                trace!("No live engine to release");
                return;
            }
            EngineSlot::Live(live) => live,
        };

        let LiveEngine {
            mut engine,
            listener_id,
            observer,
        } = live;

        self.state = PlaybackState::capture(engine.as_ref());
        observer.detach();
        engine.remove_listener(listener_id);
        engine.release();

        info!(
            item_index = self.state.item_index,
            position_ms = self.state.snapshot().position_ms,
            play_when_ready = self.state.play_when_ready,
            "Playback engine released"
        );
        self.emit(PlaybackEvent::EngineReleased {
            saved: self.state.snapshot(),
        });
    }

    /// Resets the stored state to the start and applies it to a live engine.
    pub fn restart(&mut self) {
        self.state = PlaybackState::default();
        if let EngineSlot::Live(live) = &mut self.slot {
            live.engine.set_play_when_ready(true);
            live.engine.seek_to(0, Duration::ZERO);
        }
        debug!("Playback restarted");
        self.emit(PlaybackEvent::Restarted);
    }

    /// Clears play-when-ready on the live engine. The stored state is left
    /// alone until the next release captures it.
    pub fn pause(&mut self) {
        if let EngineSlot::Live(live) = &mut self.slot {
            live.engine.set_play_when_ready(false);
            debug!("Playback paused");
            self.emit(PlaybackEvent::Paused);
        }
    }

    /// Passes play-when-ready straight to the live engine, if any.
    pub fn set_play_when_ready(&mut self, play_when_ready: bool) {
        if let EngineSlot::Live(live) = &mut self.slot {
            live.engine.set_play_when_ready(play_when_ready);
        }
    }

    /// The stored state: captured at the last release, or reset by restart.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        matches!(self.slot, EngineSlot::Live(_))
    }

    /// Whether the live engine is actually rendering.
    pub fn is_playing(&self) -> bool {
        match &self.slot {
            EngineSlot::Live(live) => live.engine.is_playing(),
            EngineSlot::NoEngine => false,
        }
    }

    /// Current position, item and intent of the live engine.
    pub fn live_state(&self) -> Option<PlaybackState> {
        match &self.slot {
            EngineSlot::Live(live) => Some(PlaybackState::capture(live.engine.as_ref())),
            EngineSlot::NoEngine => None,
        }
    }

    pub fn engine_play_when_ready(&self) -> Option<bool> {
        match &self.slot {
            EngineSlot::Live(live) => Some(live.engine.play_when_ready()),
            EngineSlot::NoEngine => None,
        }
    }

    pub fn media_source(&self) -> &MediaSource {
        &self.source
    }

    /// The source bound to an engine. `None` until the first successful
    /// creation; kept after release.
    pub fn bound_source(&self) -> Option<&MediaSource> {
        self.bound_source.as_ref()
    }

    fn emit(&self, event: PlaybackEvent) {
        if let Some(events) = &self.events {
            let _ = events.emit(CoreEvent::Playback(event));
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.release_engine();
    }
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("source", &redact_uri(self.source.uri()))
            .field("state", &self.state)
            .field("live", &self.is_live())
            .finish()
    }
}
