//! Fono Artwork - Embedded cover art extraction
//!
//! Extracts embedded artwork (album covers) from audio files using Lofty.
//! Supports the formats the library indexes, including MP3 (ID3v2 APIC
//! frames) and FLAC (METADATA_BLOCK_PICTURE).
//!
//! # Features
//!
//! - Extract embedded artwork from audio files
//! - LRU caching for repeated lookups
//! - Size limits to prevent memory issues
//!
//! # Example
//!
//! ```no_run
//! use fono_artwork::ArtworkExtractor;
//! use std::path::Path;
//!
//! let extractor = ArtworkExtractor::new(100); // Cache 100 images
//! let path = Path::new("music/track.mp3");
//!
//! match extractor.extract_cover(path) {
//!     Ok(Some(cover)) => {
//!         println!("Found artwork: {} bytes, type: {}",
//!             cover.data.len(), cover.mime_type);
//!     }
//!     Ok(None) => println!("No artwork found"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

mod error;
mod extractor;

// Re-export public API
pub use error::{ArtworkError, Result};
pub use extractor::ArtworkExtractor;
