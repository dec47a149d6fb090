//! Session lifecycle around one prepared engine instance.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;

use super::engine::{EngineFactory, PlaybackEngine};
use crate::error::Result;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// One playback engine bound to one resource.
///
/// Sessions are owned by the transport and shared read-only with the progress
/// synchronizer. They are never reused: `stop()` retires the current session
/// and installs a fresh one. The id distinguishes live sessions from retired
/// ones so late position updates can be discarded.
pub struct PlaybackSession {
    id: u64,
    duration_ms: u64,
    engine: Box<dyn PlaybackEngine>,
    retired: AtomicBool,
}

impl PlaybackSession {
    /// Create and prepare an engine for `resource`.
    pub fn open(factory: &EngineFactory, resource: &Path) -> Result<Arc<Self>> {
        let mut engine = factory(resource)?;
        let duration_ms = engine.prepare()?;
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::SeqCst);
        debug!("session {} prepared ({} ms)", id, duration_ms);
        Ok(Arc::new(Self {
            id,
            duration_ms,
            engine,
            retired: AtomicBool::new(false),
        }))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn position_ms(&self) -> u64 {
        self.engine.position_ms().min(self.duration_ms)
    }

    pub fn is_playing(&self) -> bool {
        !self.retired.load(Ordering::SeqCst) && self.engine.is_playing()
    }

    pub fn start(&self) {
        if self.retired.load(Ordering::SeqCst) {
            return;
        }
        self.engine.start();
    }

    pub fn pause(&self) {
        if self.retired.load(Ordering::SeqCst) {
            return;
        }
        self.engine.pause();
    }

    pub fn seek_to(&self, position_ms: u64) {
        if self.retired.load(Ordering::SeqCst) {
            return;
        }
        self.engine.seek_to(position_ms.min(self.duration_ms));
    }

    pub fn set_volume(&self, volume: f32) {
        self.engine.set_volume(volume);
    }

    pub fn volume(&self) -> f32 {
        self.engine.volume()
    }

    /// Halt output and release the engine. Exactly one caller wins; later
    /// calls (including `Drop`) are no-ops.
    pub fn retire(&self) {
        if self.retired.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!("retiring session {}", self.id);
        self.engine.stop();
        self.engine.release();
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.retire();
    }
}
