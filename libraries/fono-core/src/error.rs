/// Core error types for Fono
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `FonoError`
pub type Result<T> = std::result::Result<T, FonoError>;

/// Core error type for Fono
///
/// The crate-specific errors (`ScanError`, `PlaybackError`, `ArtworkError`)
/// convert into this type at the boundary the shell reports from.
#[derive(Error, Debug)]
pub enum FonoError {
    /// Library scanning errors
    #[error("Library error: {0}")]
    Library(String),

    /// Audio playback errors
    #[error("Playback error: {0}")]
    Playback(String),

    /// Metadata/artwork extraction errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Audio file not present in the library
    #[error("Audio file not in library: {0}")]
    RecordNotFound(PathBuf),

    /// Folder not present in the library
    #[error("Folder not in library: {0}")]
    FolderNotFound(PathBuf),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl FonoError {
    /// Create a library error
    pub fn library(msg: impl Into<String>) -> Self {
        Self::Library(msg.into())
    }

    /// Create a playback error
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
