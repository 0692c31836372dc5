//! # Desktop Bridge Implementations
//!
//! Reference implementations of the player bridge traits for desktop hosts
//! (macOS, Windows, Linux) and for exercising the core without a real media
//! framework.
//!
//! ## Overview
//!
//! - `PlaybackEngine` / `EngineFactory` as an in-memory [`HeadlessEngine`]
//!   with a wall-clock position and no decoding
//! - `ThumbnailLoader` as [`BlankFrameLoader`] producing solid RGBA frames
//! - `PreviewTarget` as [`TracingPreviewTarget`], logging what would be shown
//! - `UserNotifier` as [`TracingNotifier`], routing notifications to `tracing`
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{HeadlessEngineFactory, TracingNotifier};
//! use std::sync::Arc;
//!
//! let factory = Arc::new(HeadlessEngineFactory::new());
//! let notifier = Arc::new(TracingNotifier::new());
//!
//! // Hand both to the player service
//! ```

mod engine;
mod notifier;
mod preview;

pub use engine::{HeadlessEngine, HeadlessEngineFactory};
pub use notifier::TracingNotifier;
pub use preview::{BlankFrameLoader, PreviewContent, TracingPreviewTarget};
