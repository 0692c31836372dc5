//! LifecycleBinder driving a controller through host visibility cycles.

mod common;

use bridge_traits::LifecyclePhase;
use common::{media_source, RecordingFactory, RecordingNotifier};
use core_playback::{LifecycleBinder, LifecycleStage, PlaybackController, PlaybackError};
use core_runtime::config::{ReleasePolicy, MULTI_WINDOW_PLATFORM_VERSION};
use core_runtime::events::{CoreEvent, EngineTransition, EventBus, LifecycleEvent};
use std::sync::Arc;
use std::time::Duration;

fn setup(policy: ReleasePolicy) -> (Arc<RecordingFactory>, PlaybackController, LifecycleBinder) {
    let factory = RecordingFactory::new();
    let controller =
        PlaybackController::new(factory.clone(), media_source(), RecordingNotifier::new());
    (factory, controller, LifecycleBinder::new(policy))
}

#[test]
fn post_stop_cycle_creates_on_start_and_releases_on_stop() {
    let (factory, mut controller, mut binder) = setup(ReleasePolicy::PostStopRelease);

    assert_eq!(binder.on_start(&mut controller).unwrap(), EngineTransition::Create);
    assert_eq!(factory.created(), 1);
    assert!(controller.is_live());

    assert_eq!(binder.on_resume(&mut controller).unwrap(), EngineTransition::None);
    assert_eq!(binder.on_pause(&mut controller).unwrap(), EngineTransition::None);
    assert!(controller.is_live());

    assert_eq!(binder.on_stop(&mut controller).unwrap(), EngineTransition::Release);
    assert_eq!(factory.created(), 1);
    assert_eq!(factory.released(), 1);
    assert!(!controller.is_live());
    assert_eq!(binder.stage(), LifecycleStage::Stopped);
}

#[test]
fn pre_stop_cycle_creates_on_resume_and_releases_on_pause() {
    let (factory, mut controller, mut binder) = setup(ReleasePolicy::PreStopRelease);

    assert_eq!(binder.on_start(&mut controller).unwrap(), EngineTransition::None);
    assert_eq!(factory.created(), 0);

    assert_eq!(binder.on_resume(&mut controller).unwrap(), EngineTransition::Create);
    assert_eq!(factory.created(), 1);

    assert_eq!(binder.on_pause(&mut controller).unwrap(), EngineTransition::Release);
    assert_eq!(factory.released(), 1);
    assert!(!controller.is_live());

    assert_eq!(binder.on_stop(&mut controller).unwrap(), EngineTransition::None);
    assert_eq!(factory.created(), 1);
    assert_eq!(factory.released(), 1);
}

#[test]
fn platform_version_selects_policy() {
    let threshold = MULTI_WINDOW_PLATFORM_VERSION;
    assert_eq!(
        ReleasePolicy::for_platform_version(threshold, threshold),
        ReleasePolicy::PostStopRelease
    );
    assert_eq!(
        ReleasePolicy::for_platform_version(threshold - 1, threshold),
        ReleasePolicy::PreStopRelease
    );
}

#[test]
fn position_survives_visibility_cycles() {
    let (factory, mut controller, mut binder) = setup(ReleasePolicy::PreStopRelease);

    binder.on_start(&mut controller).unwrap();
    binder.on_resume(&mut controller).unwrap();
    factory.latest().advance_to(0, Duration::from_secs(30));
    binder.on_pause(&mut controller).unwrap();

    binder.on_resume(&mut controller).unwrap();
    assert_eq!(factory.created(), 2);
    assert_eq!(factory.latest().position(), Duration::from_secs(30));

    binder.on_pause(&mut controller).unwrap();
    binder.on_stop(&mut controller).unwrap();
    binder.on_start(&mut controller).unwrap();
    binder.on_resume(&mut controller).unwrap();
    assert_eq!(factory.created(), 3);
    assert_eq!(factory.latest().position(), Duration::from_secs(30));
}

#[test]
fn out_of_order_phase_is_rejected_without_engine_action() {
    let bus = EventBus::new(16);
    let mut events = bus.subscribe();
    let (factory, mut controller, binder) = setup(ReleasePolicy::PostStopRelease);
    let mut binder = LifecycleBinder::new(binder.policy()).with_event_bus(bus);

    let err = binder.on_stop(&mut controller).unwrap_err();
    assert!(matches!(
        err,
        PlaybackError::InvalidPhaseTransition {
            from: LifecycleStage::Initialized,
            to: LifecyclePhase::Stop,
        }
    ));
    assert_eq!(binder.stage(), LifecycleStage::Initialized);
    assert_eq!(factory.created(), 0);
    assert!(matches!(
        events.try_recv().unwrap(),
        CoreEvent::Lifecycle(LifecycleEvent::PhaseRejected {
            phase: LifecyclePhase::Stop,
            ..
        })
    ));

    binder.on_start(&mut controller).unwrap();
    assert!(binder.on_start(&mut controller).is_err());
    assert_eq!(factory.created(), 1, "duplicate start must not duplicate the engine");
}

#[test]
fn accepted_phases_are_published() {
    let bus = EventBus::new(16);
    let mut events = bus.subscribe();
    let (_factory, mut controller, _) = setup(ReleasePolicy::PostStopRelease);
    let mut binder = LifecycleBinder::new(ReleasePolicy::PostStopRelease).with_event_bus(bus);

    binder.on_phase(LifecyclePhase::Start, &mut controller).unwrap();

    assert_eq!(
        events.try_recv().unwrap(),
        CoreEvent::Lifecycle(LifecycleEvent::PhaseEntered {
            phase: LifecyclePhase::Start,
            transition: EngineTransition::Create,
        })
    );
}
