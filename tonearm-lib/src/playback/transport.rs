//! Transport controller: translates user commands into engine operations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use super::engine::EngineFactory;
use super::progress::ProgressSync;
use super::session::PlaybackSession;
use crate::model::{ProgressTick, SharedModel};

/// Default progress refresh interval.
pub const DEFAULT_TICK: Duration = Duration::from_millis(1000);

/// Owns the playback session and the progress synchronizer, and is the only
/// writer of session lifecycle state.
pub struct Transport {
    resource: PathBuf,
    factory: EngineFactory,
    session: Option<Arc<PlaybackSession>>,
    progress: ProgressSync,
    model: SharedModel,
    volume: f32,
}

impl Transport {
    /// Build a transport for `resource` and eagerly prepare the first session.
    ///
    /// A prepare failure surfaces on the model and leaves the transport with
    /// every operation disabled; it never panics the host process.
    pub fn open(
        resource: impl Into<PathBuf>,
        factory: EngineFactory,
        model: SharedModel,
        tick: Duration,
    ) -> Self {
        let mut transport = Self {
            resource: resource.into(),
            factory,
            session: None,
            progress: ProgressSync::new(tick),
            model,
            volume: 1.0,
        };
        transport.install_session();
        transport
    }

    fn install_session(&mut self) {
        match PlaybackSession::open(&self.factory, &self.resource) {
            Ok(session) => {
                session.set_volume(self.volume);
                self.on_ready(&session);
                self.session = Some(session);
            }
            Err(err) => {
                error!("failed to prepare {}: {}", self.resource.display(), err);
                self.model.set_error(err.to_string());
                self.session = None;
            }
        }
    }

    /// Readiness callback: publish the duration and seek range for a freshly
    /// prepared session.
    fn on_ready(&self, session: &PlaybackSession) {
        debug!(
            "session {} ready ({} ms)",
            session.id(),
            session.duration_ms()
        );
        self.model.set_ready(session.id(), session.duration_ms());
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Start output and the progress synchronizer.
    pub fn play(&mut self) {
        let Some(session) = self.session.as_ref() else {
            debug!("play ignored: no prepared session");
            return;
        };
        info!("playing audio");
        session.start();
        self.progress.start(session.clone(), self.model.clone());
    }

    /// Suspend output, keeping the position.
    pub fn pause(&mut self) {
        let Some(session) = self.session.as_ref() else {
            debug!("pause ignored: no prepared session");
            return;
        };
        info!("pausing audio");
        session.pause();
        self.progress.cancel();
    }

    /// Halt playback, retire the session, and eagerly prepare a fresh one
    /// bound to the same resource.
    pub fn stop(&mut self) {
        let Some(old) = self.session.take() else {
            debug!("stop ignored: no prepared session");
            return;
        };
        info!("stopping audio");
        self.progress.cancel();
        old.retire();
        self.model.clear_position();
        self.install_session();
    }

    /// Reposition playback and update the displayed time immediately, without
    /// waiting for the next synchronizer tick.
    pub fn seek(&mut self, target_ms: u64) {
        let Some(session) = self.session.as_ref() else {
            debug!("seek ignored: no prepared session");
            return;
        };
        let target_ms = target_ms.min(session.duration_ms());
        session.seek_to(target_ms);
        self.model
            .publish_tick(session.id(), ProgressTick::at(target_ms));
    }

    pub fn position_ms(&self) -> u64 {
        self.session
            .as_ref()
            .map(|session| session.position_ms())
            .unwrap_or(0)
    }

    pub fn duration_ms(&self) -> u64 {
        self.session
            .as_ref()
            .map(|session| session.duration_ms())
            .unwrap_or(0)
    }

    pub fn is_playing(&self) -> bool {
        self.session
            .as_ref()
            .map(|session| session.is_playing())
            .unwrap_or(false)
    }

    /// Set the sink gain. Reapplied to every session this transport installs.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(session) = self.session.as_ref() {
            session.set_volume(volume);
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Teardown: cancel the synchronizer and release the engine. Safe to call
    /// more than once; also runs on drop so no exit path leaks the engine.
    pub fn shutdown(&mut self) {
        self.progress.cancel();
        if let Some(session) = self.session.take() {
            session.retire();
        }
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.shutdown();
    }
}
