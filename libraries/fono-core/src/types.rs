//! Domain types for the audio library

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Embedded cover image extracted from an audio file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverArt {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
}

impl CoverArt {
    /// Create new cover art
    pub fn new(data: Vec<u8>, mime_type: String) -> Self {
        Self { data, mime_type }
    }

    /// Get the image as a base64-encoded string
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Get the image as a `data:` URL for direct display in a web surface
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// One indexed audio file
///
/// Created once per scan and immutable thereafter; removed when its owning
/// folder leaves the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFileRecord {
    /// Display filename, extension included
    pub name: String,

    /// Owning folder's absolute path (back-reference only)
    pub folder_path: PathBuf,

    /// Absolute file path; unique key across the library
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Timestamp of last filesystem modification
    pub last_modified: DateTime<Utc>,

    /// Embedded cover art, if any was found
    pub cover: Option<CoverArt>,
}

/// One user-added folder and the audio files discovered directly under it
///
/// Iteration over `audio_files` is path-sorted, so display order is stable
/// across rescans of an unchanged directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderIndex {
    /// Absolute folder path; unique key within the library
    pub folder_path: PathBuf,

    /// Last path segment, for display
    pub folder_name: String,

    /// File path -> record mapping
    pub audio_files: BTreeMap<PathBuf, AudioFileRecord>,
}

impl FolderIndex {
    /// Create an empty index for a folder
    pub fn new(folder_path: impl Into<PathBuf>) -> Self {
        let folder_path = folder_path.into();
        let folder_name = folder_display_name(&folder_path);
        Self {
            folder_path,
            folder_name,
            audio_files: BTreeMap::new(),
        }
    }

    /// Insert a record, keyed by its file path
    ///
    /// The record must belong to this folder.
    pub fn insert(&mut self, record: AudioFileRecord) {
        debug_assert_eq!(record.folder_path, self.folder_path);
        self.audio_files.insert(record.path.clone(), record);
    }

    /// Look up a record by file path
    pub fn get(&self, path: &Path) -> Option<&AudioFileRecord> {
        self.audio_files.get(path)
    }

    /// Whether a file path is indexed in this folder
    pub fn contains(&self, path: &Path) -> bool {
        self.audio_files.contains_key(path)
    }

    /// Records in path order
    pub fn records(&self) -> impl Iterator<Item = &AudioFileRecord> {
        self.audio_files.values()
    }

    /// Number of indexed files
    pub fn len(&self) -> usize {
        self.audio_files.len()
    }

    /// Whether the index holds no files
    pub fn is_empty(&self) -> bool {
        self.audio_files.is_empty()
    }
}

/// Display name for a folder: its last path segment
fn folder_display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.display().to_string())
}
