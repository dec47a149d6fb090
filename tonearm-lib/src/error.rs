//! Error types for the playback library.

use thiserror::Error;

/// Failures surfaced by the playback engine and its collaborators.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("failed to open audio resource: {0}")]
    Open(#[from] std::io::Error),

    #[error("failed to probe audio resource: {0}")]
    Probe(String),

    #[error("failed to decode audio resource: {0}")]
    Decode(String),

    #[error("audio output unavailable: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
