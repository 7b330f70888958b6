//! Fono Library
//!
//! Folder indexing and the multi-folder audio library for Fono.
//!
//! This crate provides:
//! - `FolderScanner`: non-recursive scan of one folder, extension filtering,
//!   per-file size/mtime stat and embedded-cover extraction with progress
//!   reporting
//! - `LibraryStore`: the folder-keyed library map with add/remove/reset and
//!   typed change events
//!
//! # Example
//!
//! ```rust,no_run
//! use fono_library::{FolderScanner, LibraryStore, ScanConfig};
//! use fono_artwork::ArtworkExtractor;
//! use std::path::Path;
//! use std::sync::Arc;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = FolderScanner::new(Arc::new(ArtworkExtractor::new(100)));
//! let mut store = LibraryStore::new();
//!
//! if let Some(index) = store.add_folder(&scanner, Path::new("/music"), None).await? {
//!     println!("indexed {} audio files", index.len());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod scanner;
mod store;

pub use error::{Result, ScanError};
pub use scanner::{FolderScanner, ScanConfig, ScanProgress, ScanStats};
pub use store::{LibraryEvent, LibraryStore};
