//! # Lifecycle Binder
//!
//! Maps host visibility phases onto engine creation and release.
//!
//! The host delivers START, RESUME, PAUSE and STOP in a fixed order per
//! visibility cycle. Which pair of phases creates and releases the engine is
//! decided once at construction by a [`ReleasePolicy`]:
//!
//! | Policy            | Create on | Release on |
//! |-------------------|-----------|------------|
//! | `PostStopRelease` | START     | STOP       |
//! | `PreStopRelease`  | RESUME    | PAUSE      |
//!
//! Phases that break the host order are rejected without touching the engine.

use crate::controller::PlaybackController;
use crate::error::{PlaybackError, Result};
use bridge_traits::LifecyclePhase;
use core_runtime::config::ReleasePolicy;
use core_runtime::events::{CoreEvent, EngineTransition, EventBus, LifecycleEvent};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Where the host currently is in its visibility cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    /// Constructed, no phase delivered yet.
    Initialized,
    Started,
    Resumed,
    Paused,
    Stopped,
}

impl LifecycleStage {
    /// Stage reached by delivering `phase` from `self`, if the host order allows it.
    pub fn advance(self, phase: LifecyclePhase) -> Option<LifecycleStage> {
        use LifecyclePhase::*;
        use LifecycleStage::*;

        match (self, phase) {
            (Initialized | Stopped, Start) => Some(Started),
            (Started | Paused, Resume) => Some(Resumed),
            (Resumed, Pause) => Some(Paused),
            (Started | Paused, Stop) => Some(Stopped),
            _ => None,
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleStage::Initialized => "initialized",
            LifecycleStage::Started => "started",
            LifecycleStage::Resumed => "resumed",
            LifecycleStage::Paused => "paused",
            LifecycleStage::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Engine action the policy assigns to a phase.
pub fn transition_for(policy: ReleasePolicy, phase: LifecyclePhase) -> EngineTransition {
    match (policy, phase) {
        (ReleasePolicy::PostStopRelease, LifecyclePhase::Start)
        | (ReleasePolicy::PreStopRelease, LifecyclePhase::Resume) => EngineTransition::Create,
        (ReleasePolicy::PostStopRelease, LifecyclePhase::Stop)
        | (ReleasePolicy::PreStopRelease, LifecyclePhase::Pause) => EngineTransition::Release,
        _ => EngineTransition::None,
    }
}

/// Finite-state machine driving a [`PlaybackController`] from host phases.
#[derive(Debug)]
pub struct LifecycleBinder {
    policy: ReleasePolicy,
    stage: LifecycleStage,
    events: Option<EventBus>,
}

impl LifecycleBinder {
    pub fn new(policy: ReleasePolicy) -> Self {
        Self {
            policy,
            stage: LifecycleStage::Initialized,
            events: None,
        }
    }

    /// Publishes lifecycle events on the given bus.
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    pub fn stage(&self) -> LifecycleStage {
        self.stage
    }

    /// Applies one host phase.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::InvalidPhaseTransition`] when the phase is not
    /// valid from the current stage. The stage and the engine are unchanged.
    pub fn on_phase(
        &mut self,
        phase: LifecyclePhase,
        controller: &mut PlaybackController,
    ) -> Result<EngineTransition> {
        let Some(next) = self.stage.advance(phase) else {
            warn!(stage = %self.stage, %phase, "Rejecting out-of-order lifecycle phase");
            let err = PlaybackError::InvalidPhaseTransition {
                from: self.stage,
                to: phase,
            };
            self.emit(LifecycleEvent::PhaseRejected {
                phase,
                message: err.to_string(),
            });
            return Err(err);
        };

        let transition = transition_for(self.policy, phase);
        match transition {
            EngineTransition::Create => controller.create_engine(),
            EngineTransition::Release => controller.release_engine(),
            EngineTransition::None => {}
        }

        debug!(from = %self.stage, to = %next, ?transition, "Lifecycle phase applied");
        self.stage = next;
        self.emit(LifecycleEvent::PhaseEntered { phase, transition });
        Ok(transition)
    }

    pub fn on_start(&mut self, controller: &mut PlaybackController) -> Result<EngineTransition> {
        self.on_phase(LifecyclePhase::Start, controller)
    }

    pub fn on_resume(&mut self, controller: &mut PlaybackController) -> Result<EngineTransition> {
        self.on_phase(LifecyclePhase::Resume, controller)
    }

    pub fn on_pause(&mut self, controller: &mut PlaybackController) -> Result<EngineTransition> {
        self.on_phase(LifecyclePhase::Pause, controller)
    }

    pub fn on_stop(&mut self, controller: &mut PlaybackController) -> Result<EngineTransition> {
        self.on_phase(LifecyclePhase::Stop, controller)
    }

    fn emit(&self, event: LifecycleEvent) {
        if let Some(events) = &self.events {
            let _ = events.emit(CoreEvent::Lifecycle(event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_order_is_accepted() {
        let stage = LifecycleStage::Initialized;
        let stage = stage.advance(LifecyclePhase::Start).unwrap();
        let stage = stage.advance(LifecyclePhase::Resume).unwrap();
        let stage = stage.advance(LifecyclePhase::Pause).unwrap();
        let stage = stage.advance(LifecyclePhase::Resume).unwrap();
        let stage = stage.advance(LifecyclePhase::Pause).unwrap();
        let stage = stage.advance(LifecyclePhase::Stop).unwrap();
        assert_eq!(stage, LifecycleStage::Stopped);
        assert_eq!(
            stage.advance(LifecyclePhase::Start),
            Some(LifecycleStage::Started)
        );
    }

    #[test]
    fn out_of_order_phases_are_rejected() {
        assert_eq!(LifecycleStage::Initialized.advance(LifecyclePhase::Resume), None);
        assert_eq!(LifecycleStage::Initialized.advance(LifecyclePhase::Stop), None);
        assert_eq!(LifecycleStage::Started.advance(LifecyclePhase::Start), None);
        assert_eq!(LifecycleStage::Started.advance(LifecyclePhase::Pause), None);
        assert_eq!(LifecycleStage::Resumed.advance(LifecyclePhase::Stop), None);
        assert_eq!(LifecycleStage::Stopped.advance(LifecyclePhase::Resume), None);
    }

    #[test]
    fn post_stop_policy_pairs_start_with_stop() {
        let policy = ReleasePolicy::PostStopRelease;
        assert_eq!(transition_for(policy, LifecyclePhase::Start), EngineTransition::Create);
        assert_eq!(transition_for(policy, LifecyclePhase::Resume), EngineTransition::None);
        assert_eq!(transition_for(policy, LifecyclePhase::Pause), EngineTransition::None);
        assert_eq!(transition_for(policy, LifecyclePhase::Stop), EngineTransition::Release);
    }

    #[test]
    fn pre_stop_policy_pairs_resume_with_pause() {
        let policy = ReleasePolicy::PreStopRelease;
        assert_eq!(transition_for(policy, LifecyclePhase::Start), EngineTransition::None);
        assert_eq!(transition_for(policy, LifecyclePhase::Resume), EngineTransition::Create);
        assert_eq!(transition_for(policy, LifecyclePhase::Pause), EngineTransition::Release);
        assert_eq!(transition_for(policy, LifecyclePhase::Stop), EngineTransition::None);
    }
}
