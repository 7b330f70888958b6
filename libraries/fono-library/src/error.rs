/// Scan-specific errors
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ScanError`
pub type Result<T> = std::result::Result<T, ScanError>;

/// Folder scan error types
///
/// A failed scan leaves the library untouched; per-file cover extraction
/// failures are absorbed inside the scan and never appear here.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Path is not a directory
    #[error("Not a folder: {0}")]
    NotAFolder(PathBuf),

    /// Folder unreadable or missing
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<walkdir::Error> for ScanError {
    fn from(err: walkdir::Error) -> Self {
        match err.into_io_error() {
            Some(io) => Self::Io(io),
            None => Self::Io(std::io::Error::other("directory walk failed")),
        }
    }
}

impl From<ScanError> for fono_core::FonoError {
    fn from(err: ScanError) -> Self {
        fono_core::FonoError::library(err.to_string())
    }
}
