//! Mock playback provider for tests.
//!
//! Counts script loads, creations, and destructions so lifecycle tests can
//! assert idempotency and resource release. Instances share one playback
//! position, settable from the test.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::core::{CoreError, CoreResult, TimeSec, VideoId};

use super::{PlaybackProvider, PlayerInstance};

#[derive(Default)]
struct MockShared {
    position: Mutex<f64>,
    last_seek: Mutex<Option<(TimeSec, bool)>>,
    playing: AtomicBool,
    destroyed_videos: Mutex<Vec<VideoId>>,
}

/// Scriptable playback provider double.
pub(crate) struct MockProvider {
    shared: Arc<MockShared>,
    script_loads: AtomicUsize,
    creates: AtomicUsize,
    fail_next_create: AtomicBool,
    create_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self {
            shared: Arc::new(MockShared::default()),
            script_loads: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            fail_next_create: AtomicBool::new(false),
            create_gate: Mutex::new(None),
        }
    }

    pub(crate) fn script_loads(&self) -> usize {
        self.script_loads.load(Ordering::SeqCst)
    }

    pub(crate) fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub(crate) fn destroyed_videos(&self) -> Vec<VideoId> {
        self.shared.destroyed_videos.lock().unwrap().clone()
    }

    pub(crate) fn set_position(&self, time: TimeSec) {
        *self.shared.position.lock().unwrap() = time;
    }

    pub(crate) fn last_seek(&self) -> Option<(TimeSec, bool)> {
        *self.shared.last_seek.lock().unwrap()
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.shared.playing.load(Ordering::SeqCst)
    }

    /// Makes the next `create_player` call fail.
    pub(crate) fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    /// Blocks the next `create_player` call until the returned handle is
    /// notified, simulating a slow external ready callback.
    pub(crate) fn gate_next_create(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.create_gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl PlaybackProvider for MockProvider {
    async fn ensure_script(&self) -> CoreResult<()> {
        self.script_loads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn create_player(&self, video_id: &VideoId) -> CoreResult<Box<dyn PlayerInstance>> {
        self.creates.fetch_add(1, Ordering::SeqCst);

        let gate = self.create_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            return Err(CoreError::Playback("Simulated creation failure".to_string()));
        }

        Ok(Box::new(MockInstance {
            video_id: video_id.clone(),
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct MockInstance {
    video_id: VideoId,
    shared: Arc<MockShared>,
}

#[async_trait]
impl PlayerInstance for MockInstance {
    async fn seek_to(&self, time: TimeSec, allow_seek_ahead: bool) -> CoreResult<()> {
        *self.shared.position.lock().unwrap() = time;
        *self.shared.last_seek.lock().unwrap() = Some((time, allow_seek_ahead));
        Ok(())
    }

    async fn play(&self) -> CoreResult<()> {
        self.shared.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn current_time(&self) -> CoreResult<TimeSec> {
        Ok(*self.shared.position.lock().unwrap())
    }

    async fn destroy(&self) -> CoreResult<()> {
        self.shared
            .destroyed_videos
            .lock()
            .unwrap()
            .push(self.video_id.clone());
        Ok(())
    }
}
