//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the preview player core:
//! - Logging and tracing infrastructure
//! - Player configuration and validation
//! - Event bus system
//!
//! ## Overview
//!
//! Every other core crate depends on this one for its configuration types,
//! its logging conventions, and the broadcast channel used to publish
//! playback, lifecycle and preview events to the host.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
