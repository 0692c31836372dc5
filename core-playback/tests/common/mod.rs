//! Recording test doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::{
    EngineFactory, EngineListener, EngineState, ListenerId, MediaSource, Notification,
    PlaybackEngine, PreviewFrame, ThumbnailLoader, ThumbnailRequest, UserNotifier,
};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub const MEDIA_URI: &str = "https://cdn.example.com/videos/clip.mp4";

pub fn media_source() -> MediaSource {
    MediaSource::parse(MEDIA_URI).unwrap()
}

// ============================================================================
// Engine
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SetSource(String),
    SetPlayWhenReady(bool),
    Seek(usize, Duration),
    Prepare,
    AddListener,
    RemoveListener,
    Release,
}

#[derive(Default)]
pub struct EngineRecord {
    pub source: Option<MediaSource>,
    pub play_when_ready: bool,
    pub position: Duration,
    pub item_index: usize,
    pub prepared: bool,
    pub released: bool,
    pub listeners: Vec<(ListenerId, Arc<dyn EngineListener>)>,
    pub calls: Vec<EngineCall>,
}

/// Handle the test keeps to inspect and drive an engine the controller owns.
#[derive(Clone)]
pub struct EngineHandle(Arc<Mutex<EngineRecord>>);

impl EngineHandle {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.0.lock().unwrap().calls.clone()
    }

    pub fn play_when_ready(&self) -> bool {
        self.0.lock().unwrap().play_when_ready
    }

    pub fn position(&self) -> Duration {
        self.0.lock().unwrap().position
    }

    pub fn item_index(&self) -> usize {
        self.0.lock().unwrap().item_index
    }

    pub fn is_released(&self) -> bool {
        self.0.lock().unwrap().released
    }

    pub fn listener_count(&self) -> usize {
        self.0.lock().unwrap().listeners.len()
    }

    /// Simulates playback progress.
    pub fn advance_to(&self, item_index: usize, position: Duration) {
        let mut record = self.0.lock().unwrap();
        record.item_index = item_index;
        record.position = position;
    }

    /// Reports a state change to every registered listener.
    pub fn report(&self, state: EngineState) {
        let listeners: Vec<_> = self
            .0
            .lock()
            .unwrap()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener.on_state_changed(state);
        }
    }

    /// Keep a listener alive past its removal to simulate late callbacks.
    pub fn first_listener(&self) -> Option<Arc<dyn EngineListener>> {
        self.0
            .lock()
            .unwrap()
            .listeners
            .first()
            .map(|(_, listener)| Arc::clone(listener))
    }
}

pub struct RecordingEngine {
    record: Arc<Mutex<EngineRecord>>,
}

impl PlaybackEngine for RecordingEngine {
    fn set_media_source(&mut self, source: &MediaSource) {
        let mut record = self.record.lock().unwrap();
        record.source = Some(source.clone());
        record.calls.push(EngineCall::SetSource(source.uri().to_string()));
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        let mut record = self.record.lock().unwrap();
        record.play_when_ready = play_when_ready;
        record.calls.push(EngineCall::SetPlayWhenReady(play_when_ready));
    }

    fn play_when_ready(&self) -> bool {
        self.record.lock().unwrap().play_when_ready
    }

    fn is_playing(&self) -> bool {
        let record = self.record.lock().unwrap();
        record.prepared && record.play_when_ready && !record.released
    }

    fn seek_to(&mut self, item_index: usize, position: Duration) {
        let mut record = self.record.lock().unwrap();
        record.item_index = item_index;
        record.position = position;
        record.calls.push(EngineCall::Seek(item_index, position));
    }

    fn prepare(&mut self) {
        let mut record = self.record.lock().unwrap();
        record.prepared = true;
        record.calls.push(EngineCall::Prepare);
    }

    fn current_position(&self) -> Duration {
        self.record.lock().unwrap().position
    }

    fn current_item_index(&self) -> usize {
        self.record.lock().unwrap().item_index
    }

    fn add_listener(&mut self, listener: Arc<dyn EngineListener>) -> ListenerId {
        let id = ListenerId::new();
        let mut record = self.record.lock().unwrap();
        record.listeners.push((id, listener));
        record.calls.push(EngineCall::AddListener);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        let mut record = self.record.lock().unwrap();
        record.listeners.retain(|(existing, _)| *existing != id);
        record.calls.push(EngineCall::RemoveListener);
    }

    fn release(&mut self) {
        let mut record = self.record.lock().unwrap();
        record.released = true;
        record.calls.push(EngineCall::Release);
    }
}

#[derive(Default)]
pub struct RecordingFactory {
    engines: Mutex<Vec<EngineHandle>>,
    fail: AtomicBool,
}

impl RecordingFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn created(&self) -> usize {
        self.engines.lock().unwrap().len()
    }

    pub fn engine(&self, index: usize) -> EngineHandle {
        self.engines.lock().unwrap()[index].clone()
    }

    pub fn latest(&self) -> EngineHandle {
        self.engines
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no engine created")
    }

    pub fn released(&self) -> usize {
        self.engines
            .lock()
            .unwrap()
            .iter()
            .filter(|engine| engine.is_released())
            .count()
    }
}

impl EngineFactory for RecordingFactory {
    fn create_engine(&self) -> BridgeResult<Box<dyn PlaybackEngine>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BridgeError::OperationFailed(
                "decoder unavailable".to_string(),
            ));
        }
        let record = Arc::new(Mutex::new(EngineRecord::default()));
        self.engines
            .lock()
            .unwrap()
            .push(EngineHandle(Arc::clone(&record)));
        Ok(Box::new(RecordingEngine { record }))
    }
}

// ============================================================================
// Notifier
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl UserNotifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

// ============================================================================
// Thumbnail loader
// ============================================================================

/// Loader whose requests can be held until the test opens their gate.
#[derive(Default)]
pub struct GatedLoader {
    gates: Mutex<HashMap<u64, Arc<Notify>>>,
    requests: Mutex<Vec<ThumbnailRequest>>,
}

impl GatedLoader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Holds requests for `frame_time_us` until the returned gate is notified.
    pub fn hold(&self, frame_time_us: u64) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(frame_time_us, Arc::clone(&gate));
        gate
    }

    pub fn requests(&self) -> Vec<ThumbnailRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ThumbnailLoader for GatedLoader {
    async fn load_frame(&self, request: ThumbnailRequest) -> BridgeResult<PreviewFrame> {
        self.requests.lock().unwrap().push(request.clone());
        let gate = self
            .gates
            .lock()
            .unwrap()
            .get(&request.frame_time_us)
            .cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(PreviewFrame::new(
            request.frame_time_us,
            160,
            90,
            Bytes::from_static(b"frame"),
        ))
    }
}
