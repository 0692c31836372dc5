//! # Event Bus System
//!
//! Typed events published by the player core over `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The event bus consists of:
//! - **Event Types**: one enum per domain (playback, lifecycle, preview,
//!   control), wrapped by [`CoreEvent`]
//! - **EventBus**: central broadcast channel for publishing events
//! - **EventStream**: receiver wrapper with optional filtering
//!
//! ```text
//! ┌──────────────────┐  emit   ┌──────────┐  subscribe  ┌────────────┐
//! │PlaybackController├────────>│          ├────────────>│ Host UI    │
//! └──────────────────┘         │ EventBus │             └────────────┘
//! ┌──────────────────┐  emit   │          │  subscribe  ┌────────────┐
//! │ Location / shake ├────────>│          ├────────────>│PlayerService│
//! └──────────────────┘         └──────────┘             └────────────┘
//! ```
//!
//! Control events flow the other way: collaborators outside the core (the
//! foreground location service, the shake detector) publish
//! [`ControlEvent`]s and the player service reacts to them.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{ControlEvent, CoreEvent, EventBus};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(16);
//! let mut rx = bus.subscribe();
//!
//! bus.emit(CoreEvent::Control(ControlEvent::Restart)).ok();
//! assert_eq!(rx.recv().await.unwrap(), CoreEvent::Control(ControlEvent::Restart));
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: subscriber fell behind by `n` events; it can
//!   keep receiving.
//! - **`RecvError::Closed`**: every sender was dropped; treat as shutdown.
//!
//! Emitting with no subscribers returns an error. Publishers inside the core
//! ignore it: events are informational.

use bridge_traits::{EngineState, LifecyclePhase};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

pub use crate::config::DEFAULT_EVENT_BUFFER_SIZE;
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Engine and transport events
    Playback(PlaybackEvent),
    /// Host lifecycle phase handling
    Lifecycle(LifecycleEvent),
    /// Scrub preview thumbnails
    Preview(PreviewEvent),
    /// External triggers asking the core to act
    Control(ControlEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Playback(e) => e.description(),
            CoreEvent::Lifecycle(e) => e.description(),
            CoreEvent::Preview(e) => e.description(),
            CoreEvent::Control(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Playback(PlaybackEvent::EngineUnavailable { .. }) => EventSeverity::Error,
            CoreEvent::Playback(PlaybackEvent::StateChanged { state }) if state.is_failure() => {
                EventSeverity::Warning
            }
            CoreEvent::Lifecycle(LifecycleEvent::PhaseRejected { .. }) => EventSeverity::Warning,
            CoreEvent::Preview(PreviewEvent::Failed { .. }) => EventSeverity::Warning,
            CoreEvent::Playback(PlaybackEvent::EngineCreated { .. })
            | CoreEvent::Playback(PlaybackEvent::EngineReleased { .. })
            | CoreEvent::Control(_) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Snapshot of the restorable playback state carried by engine events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub item_index: usize,
    pub position_ms: u64,
    pub play_when_ready: bool,
}

// ============================================================================
// Playback Events
// ============================================================================

/// Events related to the playback engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum PlaybackEvent {
    /// A new engine was created and the stored state applied to it.
    EngineCreated { restored: PlaybackSnapshot },
    /// The live engine was released after its state was captured.
    EngineReleased { saved: PlaybackSnapshot },
    /// The engine factory could not build an engine.
    EngineUnavailable { message: String },
    /// The engine reported a playback state transition.
    StateChanged { state: EngineState },
    /// Playback was reset to the first item at position zero.
    Restarted,
    /// Play-when-ready was cleared on the live engine.
    Paused,
}

impl PlaybackEvent {
    fn description(&self) -> &str {
        match self {
            PlaybackEvent::EngineCreated { .. } => "Playback engine created",
            PlaybackEvent::EngineReleased { .. } => "Playback engine released",
            PlaybackEvent::EngineUnavailable { .. } => "Playback engine unavailable",
            PlaybackEvent::StateChanged { .. } => "Playback state changed",
            PlaybackEvent::Restarted => "Playback restarted",
            PlaybackEvent::Paused => "Playback paused",
        }
    }
}

// ============================================================================
// Lifecycle Events
// ============================================================================

/// What a lifecycle phase did to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineTransition {
    Create,
    Release,
    None,
}

/// Events related to host lifecycle handling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum LifecycleEvent {
    /// A phase was accepted and mapped onto an engine transition.
    PhaseEntered {
        phase: LifecyclePhase,
        transition: EngineTransition,
    },
    /// A phase arrived out of order and was ignored.
    PhaseRejected {
        phase: LifecyclePhase,
        message: String,
    },
}

impl LifecycleEvent {
    fn description(&self) -> &str {
        match self {
            LifecycleEvent::PhaseEntered { .. } => "Lifecycle phase entered",
            LifecycleEvent::PhaseRejected { .. } => "Lifecycle phase rejected",
        }
    }
}

// ============================================================================
// Preview Events
// ============================================================================

/// Events related to scrub preview thumbnails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum PreviewEvent {
    /// A frame was requested; the placeholder is showing.
    Requested { position_ms: u64 },
    /// The frame for the latest request is on screen.
    Displayed { position_ms: u64 },
    /// A frame arrived for a superseded request and was dropped.
    Discarded { position_ms: u64 },
    /// Frame extraction failed or timed out.
    Failed { position_ms: u64, message: String },
}

impl PreviewEvent {
    fn description(&self) -> &str {
        match self {
            PreviewEvent::Requested { .. } => "Preview frame requested",
            PreviewEvent::Displayed { .. } => "Preview frame displayed",
            PreviewEvent::Discarded { .. } => "Stale preview frame discarded",
            PreviewEvent::Failed { .. } => "Preview frame failed",
        }
    }
}

// ============================================================================
// Control Events
// ============================================================================

/// External triggers delivered by collaborators outside the core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "event")]
pub enum ControlEvent {
    /// Reset playback to the start (a foreground location update arrived).
    Restart,
    /// Pause playback (the device was shaken).
    Pause,
}

impl ControlEvent {
    fn description(&self) -> &str {
        match self {
            ControlEvent::Restart => "Restart requested",
            ControlEvent::Pause => "Pause requested",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to events.
///
/// Cloning the bus yields another sender onto the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// Subscribers that fall more than `capacity` events behind receive
    /// `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are none.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with optional filtering.
///
/// ```rust
/// use core_runtime::events::{CoreEvent, EventBus, EventStream};
///
/// let bus = EventBus::new(16);
/// let controls = EventStream::new(bus.subscribe())
///     .filter(|event| matches!(event, CoreEvent::Control(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only events matching `predicate` will be returned by `recv()`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &CoreEvent) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    /// Receives the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n` events.
    /// Returns `RecvError::Closed` if all senders have been dropped.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Attempts to receive a matching event without waiting.
    ///
    /// Returns `None` if no matching events are currently queued.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
