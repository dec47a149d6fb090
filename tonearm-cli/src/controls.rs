//! Key handling and playback status text.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tonearm_lib::playback::transport::Transport;

const SEEK_STEP_MS: u64 = 5_000;
const VOLUME_STEP: f32 = 0.05;

pub struct StatusSnapshot {
    pub text: String,
    pub ratio: f64,
    pub error: Option<String>,
}

pub struct StatusArgs {
    pub position_ms: u64,
    pub duration_ms: u64,
    pub current: String,
    pub total: String,
    pub playing: bool,
    pub volume: f32,
    pub error: Option<String>,
}

pub fn status_text(args: StatusArgs) -> StatusSnapshot {
    let state = if args.playing { "▶ Playing" } else { "⏸ Paused" };
    let percent = if args.duration_ms > 0 {
        (args.position_ms as f64 / args.duration_ms as f64 * 100.0).min(100.0)
    } else {
        0.0
    };
    let text = format!(
        "{}   {} / {}   ({:>5.1}%)\nVolume: {:.0}%",
        state,
        args.current,
        args.total,
        percent,
        args.volume * 100.0
    );

    StatusSnapshot {
        text,
        ratio: (percent / 100.0).clamp(0.0, 1.0),
        error: args.error,
    }
}

/// Translate one key event into a transport operation. Returns `false` when
/// the user quits.
///
/// Seeks only ever originate here; the synchronizer moves the gauge but never
/// issues seek commands.
pub fn handle_key_event(transport: &mut Transport) -> bool {
    if event::poll(Duration::from_millis(100)).unwrap_or(false) {
        if let Ok(Event::Key(key)) = event::read() {
            if key.kind != KeyEventKind::Press {
                return true;
            }
            match key.code {
                KeyCode::Char('q') => {
                    return false;
                }
                KeyCode::Char(' ') => {
                    transport.play();
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    transport.pause();
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    transport.stop();
                }
                KeyCode::Left => {
                    let target = transport.position_ms().saturating_sub(SEEK_STEP_MS);
                    transport.seek(target);
                }
                KeyCode::Right => {
                    let target =
                        (transport.position_ms() + SEEK_STEP_MS).min(transport.duration_ms());
                    transport.seek(target);
                }
                KeyCode::Char('-') => {
                    let next = (transport.volume() - VOLUME_STEP).max(0.0);
                    transport.set_volume(next);
                }
                KeyCode::Char('=') | KeyCode::Char('+') => {
                    let next = (transport.volume() + VOLUME_STEP).min(1.0);
                    transport.set_volume(next);
                }
                _ => {}
            }
        }
    }

    true
}
