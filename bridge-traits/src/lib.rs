//! # Host Bridge Traits
//!
//! Capability contracts between the preview player core and the host
//! platform.
//!
//! ## Overview
//!
//! The core owns the playback lifecycle rules (when an engine exists, what
//! state survives teardown, how scrubbing interacts with playback). Everything
//! that touches a real media framework, image pipeline or UI toolkit is
//! supplied by the host through the traits below.
//!
//! ## Traits
//!
//! ### Media
//! - [`PlaybackEngine`](engine::PlaybackEngine) - Stateful media unit with transport controls
//! - [`EngineFactory`](engine::EngineFactory) - Builds fresh engines on demand
//! - [`EngineListener`](engine::EngineListener) - Engine state-change observer
//!
//! ### Preview
//! - [`ThumbnailLoader`](thumbnail::ThumbnailLoader) - Decodes one frame at a time offset
//! - [`PreviewTarget`](thumbnail::PreviewTarget) - View showing the placeholder or frame
//!
//! ### Host Lifecycle
//! - [`LifecyclePhase`](lifecycle::LifecyclePhase) - Visibility phases delivered by the host
//!
//! ### UI & Diagnostics
//! - [`UserNotifier`](notify::UserNotifier) - Transient user notifications
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Headless engine + tracing notifier |
//! | Android  | TBD                 | 📋 Planned |
//! | iOS      | TBD                 | 📋 Planned |
//!
//! ## Error Handling
//!
//! Fallible bridge calls return [`BridgeError`](error::BridgeError). Platform
//! implementations should convert native errors into it with enough context
//! (source URI, frame time) to act on.
//!
//! ## Thread Safety
//!
//! Shared capabilities require `Send + Sync`. Engines only require `Send`:
//! they are owned by exactly one controller on the control thread.

pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod log;
pub mod notify;
pub mod platform;
pub mod thumbnail;

pub use error::BridgeError;

// Re-export commonly used types
pub use engine::{EngineFactory, EngineListener, EngineState, ListenerId, MediaSource, PlaybackEngine};
pub use lifecycle::LifecyclePhase;
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use notify::{Notification, NotificationDuration, UserNotifier};
pub use thumbnail::{PreviewFrame, PreviewTarget, ThumbnailLoader, ThumbnailRequest};
