//! PlaybackController behaviour against a recording engine.

mod common;

use bridge_traits::EngineState;
use common::{media_source, EngineCall, RecordingFactory, RecordingNotifier, MEDIA_URI};
use core_playback::{PlaybackController, PlaybackState};
use core_runtime::config::NotificationMessages;
use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent};
use std::sync::Arc;
use std::time::Duration;

fn controller(
    factory: &Arc<RecordingFactory>,
    notifier: &Arc<RecordingNotifier>,
) -> PlaybackController {
    PlaybackController::new(factory.clone(), media_source(), notifier.clone())
}

#[test]
fn create_binds_source_restores_state_and_prepares() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    assert!(!controller.is_live());
    assert!(controller.bound_source().is_none());

    controller.create_engine();

    assert!(controller.is_live());
    assert_eq!(factory.created(), 1);
    assert_eq!(
        factory.latest().calls(),
        vec![
            EngineCall::SetSource(MEDIA_URI.to_string()),
            EngineCall::SetPlayWhenReady(true),
            EngineCall::Seek(0, Duration::ZERO),
            EngineCall::AddListener,
            EngineCall::Prepare,
        ]
    );
    assert_eq!(controller.bound_source(), Some(&media_source()));
}

#[test]
fn release_captures_live_engine_state() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.create_engine();
    let engine = factory.latest();
    engine.advance_to(2, Duration::from_millis(42_000));
    controller.set_play_when_ready(false);
    let live = controller.live_state().unwrap();

    controller.release_engine();

    assert!(!controller.is_live());
    assert!(engine.is_released());
    assert_eq!(engine.listener_count(), 0);
    assert_eq!(controller.state(), live);
    assert_eq!(
        controller.state(),
        PlaybackState {
            position: Duration::from_millis(42_000),
            item_index: 2,
            play_when_ready: false,
        }
    );
}

#[test]
fn state_survives_engine_recreation() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    for (cycle, position_ms) in [(0usize, 1_500u64), (1, 9_000), (2, 61_250)] {
        controller.create_engine();
        factory.latest().advance_to(cycle, Duration::from_millis(position_ms));
        controller.release_engine();

        assert_eq!(controller.state().item_index, cycle);
        assert_eq!(controller.state().position, Duration::from_millis(position_ms));
    }

    controller.create_engine();
    let engine = factory.latest();
    assert_eq!(engine.item_index(), 2);
    assert_eq!(engine.position(), Duration::from_millis(61_250));
    assert!(engine.play_when_ready());
}

#[test]
fn create_while_live_releases_previous_engine_first() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.create_engine();
    let first = factory.latest();
    first.advance_to(0, Duration::from_secs(7));

    controller.create_engine();

    assert_eq!(factory.created(), 2);
    assert!(first.is_released());
    assert_eq!(first.calls().last(), Some(&EngineCall::Release));
    assert_eq!(factory.latest().position(), Duration::from_secs(7));
    assert!(!factory.latest().is_released());
}

#[test]
fn release_is_idempotent() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.create_engine();
    factory.latest().advance_to(1, Duration::from_secs(3));
    controller.release_engine();
    let once = controller.state();
    let calls_once = factory.latest().calls();

    controller.release_engine();

    assert_eq!(controller.state(), once);
    assert_eq!(factory.latest().calls(), calls_once);
    assert_eq!(factory.released(), 1);
    assert!(!controller.is_live());
}

#[test]
fn release_without_engine_is_noop() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.release_engine();
    controller.release_engine();

    assert_eq!(controller.state(), PlaybackState::default());
    assert_eq!(factory.created(), 0);
}

#[test]
fn restart_resets_state_and_live_engine() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.create_engine();
    factory.latest().advance_to(3, Duration::from_secs(95));
    controller.pause();
    controller.release_engine();
    controller.create_engine();
    let engine = factory.latest();
    assert!(!engine.play_when_ready());

    controller.restart();

    assert_eq!(controller.state(), PlaybackState::default());
    assert!(engine.play_when_ready());
    assert_eq!(engine.item_index(), 0);
    assert_eq!(engine.position(), Duration::ZERO);
    assert_eq!(factory.created(), 2, "restart must not recreate the engine");
}

#[test]
fn restart_without_engine_resets_stored_state() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.create_engine();
    factory.latest().advance_to(1, Duration::from_secs(12));
    controller.set_play_when_ready(false);
    controller.release_engine();

    controller.restart();

    assert_eq!(controller.state(), PlaybackState::default());
    assert!(!controller.is_live());
}

#[test]
fn pause_clears_engine_intent_but_keeps_stored_state() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.create_engine();
    let engine = factory.latest();
    engine.advance_to(0, Duration::from_millis(42));
    let before = controller.state();

    controller.pause();

    assert!(!engine.play_when_ready());
    assert_eq!(controller.engine_play_when_ready(), Some(false));
    assert_eq!(controller.state(), before);
}

#[test]
fn mutators_without_engine_are_noops() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.pause();
    controller.set_play_when_ready(false);

    assert_eq!(controller.state(), PlaybackState::default());
    assert_eq!(controller.engine_play_when_ready(), None);
    assert!(!controller.is_playing());
    assert!(notifier.messages().is_empty());
}

#[test]
fn state_changes_notify_once_per_transition() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let messages = NotificationMessages::default();
    let mut controller = controller(&factory, &notifier).with_messages(messages.clone());

    controller.create_engine();
    let engine = factory.latest();
    engine.report(EngineState::Buffering);
    engine.report(EngineState::Buffering);
    engine.report(EngineState::Ready);
    engine.report(EngineState::Ended);
    engine.report(EngineState::from_code(7));

    assert_eq!(
        notifier.messages(),
        vec![
            messages.buffering.clone(),
            messages.ready.clone(),
            messages.ended.clone(),
            messages.unknown.clone(),
        ]
    );
}

#[test]
fn detached_observer_ignores_late_callbacks() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.create_engine();
    let listener = factory.latest().first_listener().unwrap();
    controller.release_engine();

    listener.on_state_changed(EngineState::Ready);

    assert!(notifier.messages().is_empty());
}

#[test]
fn factory_failure_notifies_idle_and_stays_without_engine() {
    let factory = RecordingFactory::new();
    factory.set_failing(true);
    let notifier = RecordingNotifier::new();
    let bus = EventBus::new(16);
    let mut events = bus.subscribe();
    let mut controller = controller(&factory, &notifier).with_event_bus(bus);

    controller.create_engine();

    assert!(!controller.is_live());
    assert!(controller.bound_source().is_none());
    assert_eq!(
        notifier.messages(),
        vec![NotificationMessages::default().idle]
    );
    match events.try_recv().unwrap() {
        CoreEvent::Playback(PlaybackEvent::EngineUnavailable { message }) => {
            assert!(message.contains("decoder unavailable"));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    factory.set_failing(false);
    controller.create_engine();
    assert!(controller.is_live());
}

#[test]
fn engine_events_carry_snapshots() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let bus = EventBus::new(16);
    let mut events = bus.subscribe();
    let mut controller = controller(&factory, &notifier).with_event_bus(bus);

    controller.create_engine();
    factory.latest().advance_to(1, Duration::from_millis(2_500));
    controller.release_engine();

    match events.try_recv().unwrap() {
        CoreEvent::Playback(PlaybackEvent::EngineCreated { restored }) => {
            assert_eq!(restored.position_ms, 0);
            assert!(restored.play_when_ready);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match events.try_recv().unwrap() {
        CoreEvent::Playback(PlaybackEvent::EngineReleased { saved }) => {
            assert_eq!(saved.item_index, 1);
            assert_eq!(saved.position_ms, 2_500);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn dropping_controller_releases_engine() {
    let factory = RecordingFactory::new();
    let notifier = RecordingNotifier::new();
    let mut controller = controller(&factory, &notifier);

    controller.create_engine();
    let engine = factory.latest();
    drop(controller);

    assert!(engine.is_released());
}
