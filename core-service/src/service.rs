//! # Player Service
//!
//! Thread-safe façade over the playback core.
//!
//! The controller, binder and scrub coordinator are single-threaded state
//! machines. The service owns all three behind one mutex so every mutation is
//! serialized, whichever thread the host UI or a collaborator calls from.
//!
//! External triggers arrive as [`ControlEvent`]s on the event bus:
//! `Restart` (a foreground location update) resets playback, `Pause` (a
//! device shake) clears play-when-ready.

use crate::error::{CoreError, Result};
use crate::PlayerDependencies;
use bridge_traits::{LifecyclePhase, ThumbnailRequest};
use core_async::sync::Notify;
use core_async::task::JoinHandle;
use core_playback::{
    LifecycleBinder, LifecycleStage, PlaybackController, PlaybackState, PreviewResolution,
    ScrubCoordinator,
};
use core_runtime::config::PlayerConfig;
use core_runtime::events::{
    ControlEvent, CoreEvent, EngineTransition, EventBus, EventStream, RecvError,
};
use core_runtime::logging::redact_uri;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

struct PlayerCore {
    controller: PlaybackController,
    binder: LifecycleBinder,
    scrub: ScrubCoordinator,
}

impl PlayerCore {
    fn handle_control(&mut self, control: ControlEvent) {
        debug!(?control, "Handling control trigger");
        match control {
            ControlEvent::Restart => self.controller.restart(),
            ControlEvent::Pause => self.controller.pause(),
        }
    }
}

/// Primary façade exposed to host applications.
///
/// Cloning yields another handle onto the same player.
#[derive(Clone)]
pub struct PlayerService {
    core: Arc<Mutex<PlayerCore>>,
    events: EventBus,
    config: Arc<PlayerConfig>,
    preview_ready: Arc<Notify>,
}

impl PlayerService {
    /// Validates `config` and wires the core around `deps`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Runtime`] if the configuration is invalid.
    pub fn new(config: PlayerConfig, deps: PlayerDependencies) -> Result<Self> {
        config.validate()?;
        let source = config.media_source()?;
        let events = EventBus::new(config.event_buffer_size);

        let controller = PlaybackController::new(deps.engine_factory, source, deps.notifier)
            .with_messages(config.notifications.clone())
            .with_event_bus(events.clone());
        let binder = LifecycleBinder::new(config.release_policy).with_event_bus(events.clone());
        let scrub = ScrubCoordinator::new(
            deps.thumbnail_loader,
            deps.preview_target,
            config.preview.clone(),
        )
        .with_event_bus(events.clone());
        let preview_ready = scrub.ready_signal();

        info!(
            media = %redact_uri(&config.media_uri),
            policy = ?config.release_policy,
            "Player service initialized"
        );

        Ok(Self {
            core: Arc::new(Mutex::new(PlayerCore {
                controller,
                binder,
                scrub,
            })),
            events,
            config: Arc::new(config),
            preview_ready,
        })
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to every event the player publishes.
    pub fn subscribe(&self) -> EventStream {
        EventStream::new(self.events.subscribe())
    }

    // ========================================================================
    // Host lifecycle
    // ========================================================================

    /// Forwards a host visibility phase to the lifecycle binder.
    ///
    /// Releasing the engine also cancels any pending preview.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Playback`] when the phase breaks the host order.
    pub fn on_phase(&self, phase: LifecyclePhase) -> Result<EngineTransition> {
        let mut guard = self.core.lock();
        let core = &mut *guard;
        let transition = core.binder.on_phase(phase, &mut core.controller)?;
        if transition == EngineTransition::Release {
            core.scrub.cancel_pending();
        }
        Ok(transition)
    }

    pub fn stage(&self) -> LifecycleStage {
        self.core.lock().binder.stage()
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn restart(&self) {
        self.core.lock().controller.restart();
    }

    pub fn pause(&self) {
        self.core.lock().controller.pause();
    }

    pub fn is_live(&self) -> bool {
        self.core.lock().controller.is_live()
    }

    pub fn is_playing(&self) -> bool {
        self.core.lock().controller.is_playing()
    }

    /// The stored state, captured at the last release.
    pub fn playback_state(&self) -> PlaybackState {
        self.core.lock().controller.state()
    }

    /// The live engine's current state, if an engine exists.
    pub fn live_state(&self) -> Option<PlaybackState> {
        self.core.lock().controller.live_state()
    }

    // ========================================================================
    // Scrubbing
    // ========================================================================

    pub fn on_scrub_start(&self) {
        let mut guard = self.core.lock();
        let core = &mut *guard;
        core.scrub.on_scrub_start(&mut core.controller);
    }

    pub fn on_scrub_move(&self, position: Duration) {
        self.core.lock().scrub.on_scrub_move(position);
    }

    pub fn on_scrub_stop(&self) {
        let mut guard = self.core.lock();
        let core = &mut *guard;
        core.scrub.on_scrub_stop(&mut core.controller);
    }

    /// Requests a preview frame. See [`ScrubCoordinator::load_preview`].
    ///
    /// Returns `None` without touching playback when called outside a Tokio
    /// runtime.
    pub fn load_preview(&self, position: Duration, max: Duration) -> Option<ThumbnailRequest> {
        let mut guard = self.core.lock();
        let core = &mut *guard;
        core.scrub.load_preview(&mut core.controller, position, max)
    }

    /// Waits for the next preview fetch to finish and applies it.
    ///
    /// The player stays unlocked while waiting. Returns `None` when nothing
    /// is pending.
    pub async fn next_preview(&self) -> Option<PreviewResolution> {
        loop {
            {
                let mut core = self.core.lock();
                if let Some(resolution) = core.scrub.try_resolve() {
                    return Some(resolution);
                }
                if core.scrub.pending_count() == 0 {
                    return None;
                }
            }
            self.preview_ready.notified().await;
        }
    }

    /// Applies every preview fetch that has already finished.
    pub fn drain_previews(&self) -> Vec<PreviewResolution> {
        self.core.lock().scrub.drain_ready()
    }

    // ========================================================================
    // Control triggers
    // ========================================================================

    /// Applies an external trigger: `Restart` resets playback, `Pause`
    /// clears play-when-ready.
    pub fn handle_control(&self, control: ControlEvent) {
        self.core.lock().handle_control(control);
    }

    /// Spawns a task applying every `Control` event published on the bus.
    ///
    /// The task holds only a weak reference to the player and ends once the
    /// last service handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InitializationFailed`] outside a Tokio runtime.
    pub fn spawn_control_listener(&self) -> Result<JoinHandle<()>> {
        if !core_async::runtime::in_runtime() {
            return Err(CoreError::InitializationFailed(
                "control listener requires a running Tokio runtime".to_string(),
            ));
        }

        let core: Weak<Mutex<PlayerCore>> = Arc::downgrade(&self.core);
        let mut controls = EventStream::new(self.events.subscribe())
            .filter(|event| matches!(event, CoreEvent::Control(_)));

        Ok(core_async::spawn(async move {
            loop {
                match controls.recv().await {
                    Ok(CoreEvent::Control(control)) => {
                        let Some(core) = core.upgrade() else {
                            break;
                        };
                        core.lock().handle_control(control);
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Control listener lagged behind the event bus");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("Control listener stopped");
        }))
    }

    /// Cancels pending previews and releases the engine.
    pub fn shutdown(&self) {
        let mut core = self.core.lock();
        core.scrub.cancel_pending();
        core.controller.release_engine();
        info!("Player service shut down");
    }
}

impl std::fmt::Debug for PlayerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerService")
            .field("media", &redact_uri(&self.config.media_uri))
            .field("policy", &self.config.release_policy)
            .finish()
    }
}
