//! Progress synchronizer: mirrors engine position into the UI model.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::warn;

use super::session::PlaybackSession;
use crate::model::{ProgressTick, SharedModel};

/// Granularity of the cancellation check inside one interval.
const CANCEL_POLL: Duration = Duration::from_millis(25);

/// Repeating task that publishes a [`ProgressTick`] once per interval while
/// the session is playing.
///
/// The task ends two ways: it self-terminates when it observes that the
/// session is no longer playing, and it is cancelled deterministically (flag
/// plus join) on pause, stop, and teardown, so no tick can land after the
/// owner has moved on.
pub struct ProgressSync {
    interval: Duration,
    finish: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressSync {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            finish: Arc::new(AtomicBool::new(true)),
            handle: None,
        }
    }

    /// Start ticking against `session`. Any previous run is cancelled first.
    pub fn start(&mut self, session: Arc<PlaybackSession>, model: SharedModel) {
        self.cancel();

        let finish = Arc::new(AtomicBool::new(false));
        self.finish = finish.clone();
        let interval = self.interval;

        self.handle = Some(thread::spawn(move || loop {
            if finish.load(Ordering::Relaxed) {
                break;
            }
            if !session.is_playing() {
                break;
            }
            model.publish_tick(session.id(), ProgressTick::at(session.position_ms()));

            let mut waited = Duration::ZERO;
            while waited < interval {
                if finish.load(Ordering::Relaxed) {
                    return;
                }
                let step = CANCEL_POLL.min(interval - waited);
                thread::sleep(step);
                waited += step;
            }
        }));
    }

    /// Stop the task and wait for it to exit.
    pub fn cancel(&mut self) {
        self.finish.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.thread().id() == thread::current().id() {
                warn!("progress cancel called from progress thread; skipping join");
            } else if handle.join().is_err() {
                warn!("progress thread panicked during join");
            }
        }
    }

    /// True when no tick task is running.
    pub fn is_idle(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(true)
    }
}

impl Drop for ProgressSync {
    fn drop(&mut self) {
        self.cancel();
    }
}
