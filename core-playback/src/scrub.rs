//! # Scrub Coordinator
//!
//! Couples the scrub bar to playback and to the preview thumbnail.
//!
//! ## Overview
//!
//! - Scrub start clears play-when-ready, scrub stop sets it again. Moving the
//!   thumb changes nothing.
//! - A preview request pauses active playback, shows the placeholder and
//!   fetches one frame at the requested offset in the background.
//!
//! ## Stale previews
//!
//! Every request gets a new generation and cancels the one before it. Frame
//! fetches report back over a channel and the control thread applies them
//! with [`ScrubCoordinator::resolve_next`] or
//! [`ScrubCoordinator::drain_ready`]. Only the latest generation reaches the
//! preview target; anything older is discarded, so the last request wins.
//! Resolving a preview never touches the engine.

use crate::controller::PlaybackController;
use crate::error::PlaybackError;
use bridge_traits::{PreviewFrame, PreviewTarget, ThumbnailLoader, ThumbnailRequest};
use core_async::sync::{mpsc, CancellationToken, Notify};
use core_runtime::config::PreviewConfig;
use core_runtime::events::{CoreEvent, EventBus, PreviewEvent};
use futures::future::{self, Either};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// How a preview request ended, as seen from the control thread.
#[derive(Debug)]
pub enum PreviewResolution {
    /// The frame for the latest request is on the preview target.
    Displayed { position: Duration },
    /// A newer request superseded this one, or it was cancelled.
    Discarded { position: Duration },
    /// Extraction failed or timed out; the placeholder stays up.
    Failed {
        position: Duration,
        error: PlaybackError,
    },
}

impl PreviewResolution {
    pub fn position(&self) -> Duration {
        match self {
            PreviewResolution::Displayed { position }
            | PreviewResolution::Discarded { position }
            | PreviewResolution::Failed { position, .. } => *position,
        }
    }
}

struct InFlight {
    generation: u64,
    cancel: CancellationToken,
}

struct PreviewOutcome {
    generation: u64,
    position: Duration,
    result: Result<PreviewFrame, PlaybackError>,
}

/// Scrub gesture and preview thumbnail handling for one player.
pub struct ScrubCoordinator {
    loader: Arc<dyn ThumbnailLoader>,
    target: Arc<dyn PreviewTarget>,
    config: PreviewConfig,
    events: Option<EventBus>,
    generation: u64,
    in_flight: Option<InFlight>,
    pending: usize,
    outcome_tx: mpsc::UnboundedSender<PreviewOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<PreviewOutcome>,
    ready: Arc<Notify>,
    scrubbing: bool,
}

impl ScrubCoordinator {
    pub fn new(
        loader: Arc<dyn ThumbnailLoader>,
        target: Arc<dyn PreviewTarget>,
        config: PreviewConfig,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            loader,
            target,
            config,
            events: None,
            generation: 0,
            in_flight: None,
            pending: 0,
            outcome_tx,
            outcome_rx,
            ready: Arc::new(Notify::new()),
            scrubbing: false,
        }
    }

    /// Publishes preview events on the given bus.
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    /// Number of fetches whose outcome has not been applied yet.
    pub fn pending_count(&self) -> usize {
        self.pending
    }

    /// Suspends playback for the duration of the gesture.
    pub fn on_scrub_start(&mut self, controller: &mut PlaybackController) {
        self.scrubbing = true;
        controller.set_play_when_ready(false);
        debug!("Scrub started");
    }

    pub fn on_scrub_move(&self, position: Duration) {
        trace!(position_ms = millis(position), "Scrub moved");
    }

    /// Resumes playback intent once the gesture ends.
    pub fn on_scrub_stop(&mut self, controller: &mut PlaybackController) {
        self.scrubbing = false;
        controller.set_play_when_ready(true);
        debug!("Scrub stopped");
    }

    /// Requests a preview frame at `position`, clamped to `max`.
    ///
    /// Pauses the engine if it is playing, shows the placeholder, cancels the
    /// previous request and starts the fetch. Returns the issued request, or
    /// `None` when no media has been bound to an engine yet.
    ///
    /// The fetch is spawned onto the current Tokio runtime. Outside one the
    /// request is refused with `None` before anything changes.
    pub fn load_preview(
        &mut self,
        controller: &mut PlaybackController,
        position: Duration,
        max: Duration,
    ) -> Option<ThumbnailRequest> {
        if !core_async::runtime::in_runtime() {
            warn!(
                position_ms = millis(position),
                "Preview requested outside a Tokio runtime, ignoring"
            );
            return None;
        }

        if controller.is_playing() {
            controller.pause();
        }

        let Some(source) = controller.bound_source().cloned() else {
            debug!("No media bound yet, skipping preview");
            return None;
        };

        let position = position.min(max);
        let request = ThumbnailRequest::new(source, position);

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        if let Some(previous) = self.in_flight.take() {
            trace!(generation = previous.generation, "Cancelling superseded preview");
            previous.cancel.cancel();
        }

        self.target.show_placeholder(&self.config.placeholder);
        self.emit(PreviewEvent::Requested {
            position_ms: millis(position),
        });
        debug!(
            generation,
            frame_time_us = request.frame_time_us,
            "Requesting preview frame"
        );

        let cancel = CancellationToken::new();
        self.in_flight = Some(InFlight {
            generation,
            cancel: cancel.clone(),
        });
        self.pending += 1;

        let loader = Arc::clone(&self.loader);
        let frame_timeout = self.config.frame_timeout;
        let outcome_tx = self.outcome_tx.clone();
        let ready = Arc::clone(&self.ready);
        let task_request = request.clone();
        core_async::spawn(async move {
            let result = fetch_frame(loader, task_request, frame_timeout, cancel).await;
            let _ = outcome_tx.send(PreviewOutcome {
                generation,
                position,
                result,
            });
            ready.notify_one();
        });

        Some(request)
    }

    /// Waits for the next fetch to finish and applies it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn resolve_next(&mut self) -> Option<PreviewResolution> {
        if self.pending == 0 {
            return None;
        }
        let outcome = self.outcome_rx.recv().await?;
        Some(self.apply(outcome))
    }

    /// Applies one finished fetch, without waiting.
    pub fn try_resolve(&mut self) -> Option<PreviewResolution> {
        let outcome = self.outcome_rx.try_recv().ok()?;
        Some(self.apply(outcome))
    }

    /// Signalled after every finished fetch. Lets callers that cannot hold
    /// `&mut self` across an await wait for [`try_resolve`](Self::try_resolve).
    pub fn ready_signal(&self) -> Arc<Notify> {
        Arc::clone(&self.ready)
    }

    /// Applies every fetch that has already finished, without waiting.
    pub fn drain_ready(&mut self) -> Vec<PreviewResolution> {
        let mut resolved = Vec::new();
        while let Some(resolution) = self.try_resolve() {
            resolved.push(resolution);
        }
        resolved
    }

    /// Cancels the in-flight request. Its outcome will be discarded.
    pub fn cancel_pending(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(generation = in_flight.generation, "Cancelling pending preview");
            in_flight.cancel.cancel();
        }
    }

    fn apply(&mut self, outcome: PreviewOutcome) -> PreviewResolution {
        self.pending = self.pending.saturating_sub(1);
        let position = outcome.position;
        let position_ms = millis(position);

        let latest = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.generation == outcome.generation);
        if !latest {
            debug!(generation = outcome.generation, position_ms, "Discarding stale preview");
            self.emit(PreviewEvent::Discarded { position_ms });
            return PreviewResolution::Discarded { position };
        }
        self.in_flight = None;

        match outcome.result {
            Ok(frame) => {
                self.target.show_frame(&frame);
                self.emit(PreviewEvent::Displayed { position_ms });
                PreviewResolution::Displayed { position }
            }
            Err(error) if error.is_stale() => {
                self.emit(PreviewEvent::Discarded { position_ms });
                PreviewResolution::Discarded { position }
            }
            Err(error) => {
                warn!(position_ms, error = %error, "Preview frame failed");
                self.emit(PreviewEvent::Failed {
                    position_ms,
                    message: error.to_string(),
                });
                PreviewResolution::Failed { position, error }
            }
        }
    }

    fn emit(&self, event: PreviewEvent) {
        if let Some(events) = &self.events {
            let _ = events.emit(CoreEvent::Preview(event));
        }
    }
}

impl fmt::Debug for ScrubCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrubCoordinator")
            .field("generation", &self.generation)
            .field("pending", &self.pending)
            .field("scrubbing", &self.scrubbing)
            .finish()
    }
}

async fn fetch_frame(
    loader: Arc<dyn ThumbnailLoader>,
    request: ThumbnailRequest,
    frame_timeout: Duration,
    cancel: CancellationToken,
) -> Result<PreviewFrame, PlaybackError> {
    let fetch = core_async::time::timeout(frame_timeout, loader.load_frame(request));
    let cancelled = cancel.cancelled();
    futures::pin_mut!(fetch, cancelled);

    match future::select(cancelled, fetch).await {
        Either::Left(((), _)) => Err(PlaybackError::PreviewCancelled),
        Either::Right((Ok(Ok(frame)), _)) => Ok(frame),
        Either::Right((Ok(Err(e)), _)) => Err(PlaybackError::ThumbnailFailed(e.to_string())),
        Either::Right((Err(_), _)) => Err(PlaybackError::ThumbnailTimedOut(frame_timeout)),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
