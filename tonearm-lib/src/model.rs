//! Shared playback state published to the UI.

use std::sync::{Arc, Mutex};

use log::debug;

use crate::clock::format_time;

/// One progress update, produced once per synchronizer interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTick {
    pub position_ms: u64,
    pub formatted: String,
}

impl ProgressTick {
    pub fn at(position_ms: u64) -> Self {
        Self {
            position_ms,
            formatted: format_time(position_ms),
        }
    }
}

/// Snapshot of everything the player screen renders.
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    /// Identity of the session the position fields belong to; `0` before the
    /// first session reports readiness.
    pub session_id: u64,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub current_label: String,
    pub total_label: String,
    pub error: Option<String>,
}

impl Default for ModelSnapshot {
    fn default() -> Self {
        Self {
            session_id: 0,
            position_ms: 0,
            duration_ms: 0,
            current_label: format_time(0),
            total_label: format_time(0),
            error: None,
        }
    }
}

/// Thread-shared UI model. Written by the transport and the progress
/// synchronizer, read by the draw loop.
#[derive(Clone, Default)]
pub struct SharedModel {
    inner: Arc<Mutex<ModelSnapshot>>,
}

impl SharedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        self.inner.lock().unwrap().clone()
    }

    /// Publish a freshly prepared session: total duration, seek range, and a
    /// position reset to `0:00`.
    pub fn set_ready(&self, session_id: u64, duration_ms: u64) {
        let mut state = self.inner.lock().unwrap();
        state.session_id = session_id;
        state.duration_ms = duration_ms;
        state.total_label = format_time(duration_ms);
        state.position_ms = 0;
        state.current_label = format_time(0);
        state.error = None;
    }

    /// Publish a position update for `session_id`. Updates from a retired
    /// session are dropped.
    pub fn publish_tick(&self, session_id: u64, tick: ProgressTick) {
        let mut state = self.inner.lock().unwrap();
        if state.session_id != session_id {
            debug!("dropping progress tick from retired session {}", session_id);
            return;
        }
        state.position_ms = tick.position_ms;
        state.current_label = tick.formatted;
    }

    /// Reset the displayed position to `0:00` without touching the duration.
    pub fn clear_position(&self) {
        let mut state = self.inner.lock().unwrap();
        state.position_ms = 0;
        state.current_label = format_time(0);
    }

    pub fn set_error(&self, message: impl Into<String>) {
        self.inner.lock().unwrap().error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_zeroed_labels() {
        let snapshot = SharedModel::new().snapshot();
        assert_eq!(snapshot.current_label, "0:00");
        assert_eq!(snapshot.total_label, "0:00");
        assert_eq!(snapshot.session_id, 0);
    }

    #[test]
    fn ready_publishes_duration_and_resets_position() {
        let model = SharedModel::new();
        model.publish_tick(0, ProgressTick::at(5_000));
        model.set_ready(7, 125_000);

        let snapshot = model.snapshot();
        assert_eq!(snapshot.session_id, 7);
        assert_eq!(snapshot.duration_ms, 125_000);
        assert_eq!(snapshot.total_label, "2:05");
        assert_eq!(snapshot.position_ms, 0);
        assert_eq!(snapshot.current_label, "0:00");
    }

    #[test]
    fn tick_for_live_session_updates_labels() {
        let model = SharedModel::new();
        model.set_ready(1, 120_000);
        model.publish_tick(1, ProgressTick::at(65_000));

        let snapshot = model.snapshot();
        assert_eq!(snapshot.position_ms, 65_000);
        assert_eq!(snapshot.current_label, "1:05");
    }

    #[test]
    fn tick_for_retired_session_is_dropped() {
        let model = SharedModel::new();
        model.set_ready(2, 120_000);
        model.publish_tick(1, ProgressTick::at(65_000));

        assert_eq!(model.snapshot().position_ms, 0);
    }

    #[test]
    fn error_is_visible_in_snapshot() {
        let model = SharedModel::new();
        model.set_error("resource missing");
        assert_eq!(model.snapshot().error.as_deref(), Some("resource missing"));
    }
}
