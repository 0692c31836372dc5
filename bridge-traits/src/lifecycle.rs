//! Host visibility lifecycle.
//!
//! The host UI container (an Android activity, a desktop window, a browser
//! tab) reports four visibility phases to the core. For every visibility cycle
//! they arrive in the order START → RESUME → ... → PAUSE → STOP; RESUME/PAUSE
//! may repeat while the host stays started.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four visibility phases a host delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    /// Host became visible.
    Start,
    /// Host gained focus and is interactive.
    Resume,
    /// Host lost focus but may still be visible.
    Pause,
    /// Host is no longer visible.
    Stop,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecyclePhase::Start => "start",
            LifecyclePhase::Resume => "resume",
            LifecyclePhase::Pause => "pause",
            LifecyclePhase::Stop => "stop",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_display_matches_serde_name() {
        for phase in [
            LifecyclePhase::Start,
            LifecyclePhase::Resume,
            LifecyclePhase::Pause,
            LifecyclePhase::Stop,
        ] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase));
        }
    }
}
