use std::{
    collections::VecDeque,
    io,
    path::Path,
    sync::{Arc, Mutex},
    thread::sleep,
    time::Duration,
};

use clap::ArgMatches;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use tonearm_lib::{
    clock::format_time,
    error::Result,
    model::SharedModel,
    playback::{engine::rodio_engine_factory, probe, transport::Transport},
};

use crate::{controls, logging, ui};

pub fn run(args: &ArgMatches, log_buffer: Arc<Mutex<VecDeque<String>>>) -> Result<i32> {
    if let Some(("probe", sub)) = args.subcommand() {
        let path = sub.get_one::<String>("INPUT").unwrap();
        let duration_ms = probe::duration_ms(Path::new(path))?;
        println!("duration: {} ({} ms)", format_time(duration_ms), duration_ms);
        return Ok(0);
    }

    info!("starting tonearm");
    let Some(file_path) = args.get_one::<String>("INPUT") else {
        error!("no input file provided");
        return Ok(-1);
    };
    let gain = args.get_one::<String>("GAIN").unwrap().parse::<f32>().unwrap();
    let tick_ms = args
        .get_one::<String>("tick-ms")
        .unwrap()
        .parse::<u64>()
        .unwrap();
    let quiet = args.get_flag("quiet");

    let model = SharedModel::new();
    let mut transport = Transport::open(
        file_path.as_str(),
        rodio_engine_factory(),
        model.clone(),
        Duration::from_millis(tick_ms),
    );
    transport.set_volume(gain / 100.0);

    if quiet {
        if !transport.is_ready() {
            return Ok(-1);
        }
        transport.play();
        while transport.is_playing() {
            sleep(Duration::from_millis(100));
        }
        transport.shutdown();
        return Ok(0);
    }

    let _raw_mode = RawModeGuard::enable().ok();
    let mut terminal = {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, EnterAlternateScreen, cursor::Hide);
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).ok()
    };

    // UI / input loop.
    loop {
        if let Some(term) = terminal.as_mut() {
            let snapshot = model.snapshot();
            let playing = transport.is_playing();
            let volume = transport.volume();
            let log_lines = logging::snapshot(&log_buffer);
            let status = controls::status_text(controls::StatusArgs {
                position_ms: snapshot.position_ms,
                duration_ms: snapshot.duration_ms,
                current: snapshot.current_label,
                total: snapshot.total_label,
                playing,
                volume,
                error: snapshot.error,
            });
            ui::draw_status(term, &status, &log_lines);
        }

        if !controls::handle_key_event(&mut transport) {
            break;
        }

        sleep(Duration::from_millis(50));
    }

    transport.shutdown();

    // Restore the terminal state before exiting.
    if let Some(mut term) = terminal {
        let _ = term.show_cursor();
        let stdout = term.backend_mut();
        let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
    }

    Ok(0)
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
