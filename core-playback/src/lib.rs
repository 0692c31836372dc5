//! # Playback Lifecycle Core
//!
//! Keeps a video player consistent while the host creates and destroys its
//! playback engine.
//!
//! ## Overview
//!
//! This crate handles:
//! - Engine ownership and restorable state ([`PlaybackController`], [`PlaybackState`])
//! - Mapping host visibility phases onto engine create/release ([`LifecycleBinder`])
//! - Scrub gestures and preview thumbnails ([`ScrubCoordinator`])
//!
//! All three are plain `&mut self` state machines meant to be driven from a
//! single control thread. Callers that share them across threads must
//! serialize access (see `core-service`).

pub mod controller;
pub mod error;
pub mod lifecycle;
pub mod scrub;
pub mod state;

pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use lifecycle::{transition_for, LifecycleBinder, LifecycleStage};
pub use scrub::{PreviewResolution, ScrubCoordinator};
pub use state::PlaybackState;
