use bridge_traits::{error::BridgeError, LifecyclePhase};
use std::time::Duration;
use thiserror::Error;

use crate::lifecycle::LifecycleStage;

/// Errors raised by the playback lifecycle core.
///
/// Engine failures are not errors here: the controller reports them to the
/// user through the notifier and keeps running without an engine.
#[derive(Error, Debug)]
pub enum PlaybackError {
    // ========================================================================
    // Lifecycle Errors
    // ========================================================================
    /// A host phase arrived that is not valid from the current stage.
    #[error("Invalid lifecycle transition: {to} while {from}")]
    InvalidPhaseTransition {
        from: LifecycleStage,
        to: LifecyclePhase,
    },

    // ========================================================================
    // Preview Errors
    // ========================================================================
    /// The thumbnail loader could not produce a frame.
    #[error("Preview frame failed: {0}")]
    ThumbnailFailed(String),

    /// Frame extraction did not finish within the configured timeout.
    #[error("Preview frame timed out after {0:?}")]
    ThumbnailTimedOut(Duration),

    /// The preview request was superseded or cancelled.
    #[error("Preview request cancelled")]
    PreviewCancelled,

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Host capability failed.
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Internal error (should not occur in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlaybackError {
    /// Returns `true` if the operation may succeed when retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PlaybackError::ThumbnailTimedOut(_)
                | PlaybackError::ThumbnailFailed(_)
                | PlaybackError::Bridge(BridgeError::NotAvailable(_))
        )
    }

    /// Returns `true` if the error only reports a superseded request.
    pub fn is_stale(&self) -> bool {
        matches!(self, PlaybackError::PreviewCancelled)
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
