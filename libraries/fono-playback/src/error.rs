//! Error types for the playback engine

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No playable session is bound
    #[error("No active session")]
    NoActiveSession,

    /// The subsystem could not open or decode the bound file
    #[error("Decode failure: {0}")]
    Decode(String),

    /// Invalid seek position
    #[error("Invalid seek position: {0:?}")]
    InvalidSeekPosition(std::time::Duration),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

impl From<PlaybackError> for fono_core::FonoError {
    fn from(err: PlaybackError) -> Self {
        fono_core::FonoError::playback(err.to_string())
    }
}
