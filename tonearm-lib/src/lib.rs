//! # Tonearm Audio Library
//!
//! Core playback plumbing for the Tonearm player: the playback engine
//! boundary, the transport controller that drives it, and the progress
//! synchronizer that mirrors engine position into the shared UI model.

pub mod clock;
pub mod error;
pub mod model;
pub mod playback;

pub use error::{PlayerError, Result};
