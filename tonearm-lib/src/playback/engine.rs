//! Playback engine boundary and the rodio-backed implementation.
//!
//! `RodioEngine` keeps the output stream alive on a dedicated thread and hands
//! the sink back to the caller; every engine instance plays exactly one
//! resource and is released when its session retires.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};
use rodio::{Decoder, OutputStreamBuilder, Sink};

use super::probe;
use crate::clock::PositionClock;
use crate::error::{PlayerError, Result};

const OUTPUT_STREAM_OPEN_RETRIES: usize = 5;
const OUTPUT_STREAM_OPEN_RETRY_MS: u64 = 100;
const OUTPUT_SHUTDOWN_POLL_MS: u64 = 25;

/// Boundary to the platform audio facility.
///
/// `prepare` runs exactly once per engine and yields the total duration; all
/// later operations are callable from any thread. `release` must be safe to
/// call more than once.
pub trait PlaybackEngine: Send + Sync {
    /// Open the output path and ready the resource. Returns the duration in
    /// milliseconds.
    fn prepare(&mut self) -> Result<u64>;

    /// Start or resume output.
    fn start(&self);

    /// Suspend output without resetting the position.
    fn pause(&self);

    /// Halt output and reset the position to zero.
    fn stop(&self);

    /// Reposition playback.
    fn seek_to(&self, position_ms: u64);

    fn position_ms(&self) -> u64;

    fn is_playing(&self) -> bool;

    fn set_volume(&self, volume: f32);

    fn volume(&self) -> f32;

    /// Tear down the output. Idempotent.
    fn release(&self);
}

/// Creates an unprepared engine for a resource path.
pub type EngineFactory = Box<dyn Fn(&Path) -> Result<Box<dyn PlaybackEngine>> + Send + Sync>;

/// Factory producing [`RodioEngine`] instances.
pub fn rodio_engine_factory() -> EngineFactory {
    Box::new(|path| Ok(Box::new(RodioEngine::new(path))))
}

/// rodio-backed playback engine for a single audio file.
pub struct RodioEngine {
    path: PathBuf,
    sink: Mutex<Option<Sink>>,
    clock: Mutex<PositionClock>,
    shutdown: Arc<AtomicBool>,
    output_thread: Mutex<Option<JoinHandle<()>>>,
    released: AtomicBool,
}

impl RodioEngine {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            sink: Mutex::new(None),
            clock: Mutex::new(PositionClock::new()),
            shutdown: Arc::new(AtomicBool::new(false)),
            output_thread: Mutex::new(None),
            released: AtomicBool::new(false),
        }
    }

    /// Spawn the thread that owns the output stream. The stream handle is not
    /// `Send`, so the thread opens it, connects a paused sink with the decoded
    /// source queued, sends the sink back, and then parks until shutdown.
    fn spawn_output(
        path: PathBuf,
        shutdown: Arc<AtomicBool>,
    ) -> (mpsc::Receiver<Result<Sink>>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let mut stream = None;
            for attempt in 1..=OUTPUT_STREAM_OPEN_RETRIES {
                match OutputStreamBuilder::open_default_stream() {
                    Ok(s) => {
                        stream = Some(s);
                        break;
                    }
                    Err(err) => {
                        if attempt == OUTPUT_STREAM_OPEN_RETRIES {
                            let _ = tx.send(Err(PlayerError::Output(err.to_string())));
                            return;
                        }
                        warn!(
                            "open_default_stream attempt {}/{} failed: {}",
                            attempt, OUTPUT_STREAM_OPEN_RETRIES, err
                        );
                        thread::sleep(Duration::from_millis(OUTPUT_STREAM_OPEN_RETRY_MS));
                    }
                }
            }
            let stream = stream.expect("stream should exist after successful retry loop");
            let mixer = stream.mixer().clone();

            let sink = Sink::connect_new(&mixer);
            sink.pause();

            let file = match File::open(&path) {
                Ok(file) => file,
                Err(err) => {
                    let _ = tx.send(Err(PlayerError::Open(err)));
                    return;
                }
            };
            let source = match Decoder::new(BufReader::new(file)) {
                Ok(source) => source,
                Err(err) => {
                    let _ = tx.send(Err(PlayerError::Decode(err.to_string())));
                    return;
                }
            };
            sink.append(source);

            if tx.send(Ok(sink)).is_err() {
                return;
            }

            // Keep the output stream alive until the engine is released.
            while !shutdown.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(OUTPUT_SHUTDOWN_POLL_MS));
            }
            drop(stream);
        });
        (rx, handle)
    }
}

impl PlaybackEngine for RodioEngine {
    fn prepare(&mut self) -> Result<u64> {
        let duration_ms = probe::duration_ms(&self.path)?;

        let (rx, handle) = Self::spawn_output(self.path.clone(), self.shutdown.clone());
        let sink = match rx.recv() {
            Ok(result) => result?,
            Err(_) => {
                return Err(PlayerError::Output(
                    "output worker exited before reporting readiness".to_string(),
                ))
            }
        };

        *self.sink.lock().unwrap() = Some(sink);
        *self.output_thread.lock().unwrap() = Some(handle);
        debug!("prepared {} ({} ms)", self.path.display(), duration_ms);
        Ok(duration_ms)
    }

    fn start(&self) {
        let guard = self.sink.lock().unwrap();
        let Some(sink) = guard.as_ref() else { return };
        sink.play();
        self.clock.lock().unwrap().un_pause();
    }

    fn pause(&self) {
        let guard = self.sink.lock().unwrap();
        let Some(sink) = guard.as_ref() else { return };
        sink.pause();
        self.clock.lock().unwrap().pause();
    }

    fn stop(&self) {
        let guard = self.sink.lock().unwrap();
        let Some(sink) = guard.as_ref() else { return };
        sink.stop();
        self.clock.lock().unwrap().reset();
    }

    fn seek_to(&self, position_ms: u64) {
        let guard = self.sink.lock().unwrap();
        let Some(sink) = guard.as_ref() else { return };
        match sink.try_seek(Duration::from_millis(position_ms)) {
            Ok(()) => self
                .clock
                .lock()
                .unwrap()
                .set(Duration::from_millis(position_ms)),
            Err(err) => warn!("seek to {} ms failed: {}", position_ms, err),
        }
    }

    fn position_ms(&self) -> u64 {
        self.clock.lock().unwrap().position().as_millis() as u64
    }

    fn is_playing(&self) -> bool {
        self.sink
            .lock()
            .unwrap()
            .as_ref()
            .map(|sink| !sink.is_paused() && !sink.empty())
            .unwrap_or(false)
    }

    fn set_volume(&self, volume: f32) {
        if let Some(sink) = self.sink.lock().unwrap().as_ref() {
            sink.set_volume(volume);
        }
    }

    fn volume(&self) -> f32 {
        self.sink
            .lock()
            .unwrap()
            .as_ref()
            .map(|sink| sink.volume())
            .unwrap_or(1.0)
    }

    fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(sink) = self.sink.lock().unwrap().take() {
            sink.stop();
        }
        if let Some(handle) = self.output_thread.lock().unwrap().take() {
            if handle.join().is_err() {
                warn!("output thread panicked during join");
            }
        }
        debug!("released engine for {}", self.path.display());
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.release();
    }
}
