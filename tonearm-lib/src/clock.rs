//! Time formatting and the pause-aware playback position clock.

use std::time::{Duration, Instant};

/// Format a millisecond position as `M:SS`.
///
/// Minutes are unbounded; seconds are zero-padded to two digits.
pub fn format_time(position_ms: u64) -> String {
    let total_seconds = position_ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Wall-clock position tracker for a playback run.
///
/// Accumulates elapsed time while running and holds still while paused, so the
/// reported position follows what the sink is actually outputting.
#[derive(Debug, Clone, Default)]
pub struct PositionClock {
    elapsed: Duration,
    running_since: Option<Instant>,
}

impl PositionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn un_pause(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn pause(&mut self) {
        if let Some(started) = self.running_since.take() {
            self.elapsed += started.elapsed();
        }
    }

    /// Jump to a new position, keeping the current running/paused state.
    pub fn set(&mut self, position: Duration) {
        self.elapsed = position;
        if let Some(started) = self.running_since.as_mut() {
            *started = Instant::now();
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running_since = None;
    }

    pub fn position(&self) -> Duration {
        match self.running_since {
            Some(started) => self.elapsed + started.elapsed(),
            None => self.elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(999), "0:00");
        assert_eq!(format_time(1_000), "0:01");
        assert_eq!(format_time(59_000), "0:59");
        assert_eq!(format_time(60_000), "1:00");
        assert_eq!(format_time(65_000), "1:05");
        assert_eq!(format_time(61 * 60_000), "61:00");
    }

    #[test]
    fn new_clock_reports_zero() {
        assert_eq!(PositionClock::new().position(), Duration::ZERO);
    }

    #[test]
    fn clock_advances_only_while_running() {
        let mut clock = PositionClock::new();
        clock.un_pause();
        sleep(Duration::from_millis(20));
        clock.pause();
        let frozen = clock.position();
        assert!(frozen >= Duration::from_millis(20));
        sleep(Duration::from_millis(20));
        assert_eq!(clock.position(), frozen);
    }

    #[test]
    fn set_repositions_without_changing_state() {
        let mut clock = PositionClock::new();
        clock.set(Duration::from_secs(65));
        assert_eq!(clock.position(), Duration::from_secs(65));

        clock.un_pause();
        clock.set(Duration::from_secs(10));
        sleep(Duration::from_millis(15));
        assert!(clock.position() > Duration::from_secs(10));
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut clock = PositionClock::new();
        clock.un_pause();
        sleep(Duration::from_millis(10));
        clock.reset();
        assert_eq!(clock.position(), Duration::ZERO);
    }
}
