//! Fono Core
//!
//! Platform-agnostic core types, traits, and error handling for Fono.
//!
//! This crate provides the foundational building blocks shared by the
//! library, artwork, playback, and session crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `AudioFileRecord`, `FolderIndex`, `CoverArt`
//! - **Core Traits**: `CoverExtractor`
//! - **Error Handling**: Unified `FonoError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use fono_core::{AudioFileRecord, FolderIndex};
//! use chrono::Utc;
//! use std::path::PathBuf;
//!
//! let record = AudioFileRecord {
//!     name: "song.mp3".to_string(),
//!     folder_path: PathBuf::from("/music"),
//!     path: PathBuf::from("/music/song.mp3"),
//!     size: 3_000_000,
//!     last_modified: Utc::now(),
//!     cover: None,
//! };
//!
//! let mut index = FolderIndex::new(PathBuf::from("/music"));
//! index.insert(record);
//! assert_eq!(index.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{FonoError, Result};
pub use traits::CoverExtractor;
pub use types::{AudioFileRecord, CoverArt, FolderIndex};
