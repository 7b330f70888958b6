//! The multi-folder library store

use crate::error::Result;
use crate::scanner::{FolderScanner, ScanProgress};
use fono_core::{AudioFileRecord, CoverExtractor, FolderIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::info;

/// Events emitted on library mutation
///
/// Drained by the embedding layer via [`LibraryStore::take_events`] and
/// forwarded to whatever surface renders the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LibraryEvent {
    /// A folder was indexed and inserted (or replaced)
    FolderAdded {
        /// The folder's absolute path
        folder_path: PathBuf,
        /// Number of audio files indexed under it
        file_count: usize,
    },

    /// A folder was removed
    FolderRemoved {
        /// The folder's absolute path
        folder_path: PathBuf,
    },

    /// The whole library was cleared
    Reset,
}

/// The multi-folder audio library
///
/// Sole owner of the folder-path -> `FolderIndex` mapping; the one source of
/// truth for "what audio exists". Mutated only through the methods here,
/// serialized by the caller's single control thread.
#[derive(Debug, Default)]
pub struct LibraryStore {
    folders: BTreeMap<PathBuf, FolderIndex>,

    // Event queue for UI synchronization
    pending_events: Vec<LibraryEvent>,
}

impl LibraryStore {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a folder and merge the result into the library
    ///
    /// A scan that finds no audio files leaves the library unchanged and
    /// returns `Ok(None)`. Re-adding a folder replaces its previous index
    /// wholesale. A failed scan propagates without any partial merge.
    pub async fn add_folder<E: CoverExtractor>(
        &mut self,
        scanner: &FolderScanner<E>,
        folder: &Path,
        progress_tx: Option<mpsc::Sender<ScanProgress>>,
    ) -> Result<Option<&FolderIndex>> {
        let index = scanner.scan(folder, progress_tx).await?;

        if index.is_empty() {
            info!(folder = %folder.display(), "scan found no audio files, discarding");
            return Ok(None);
        }

        info!(
            folder = %folder.display(),
            files = index.len(),
            "folder indexed"
        );
        self.pending_events.push(LibraryEvent::FolderAdded {
            folder_path: index.folder_path.clone(),
            file_count: index.len(),
        });

        let key = index.folder_path.clone();
        self.folders.insert(key.clone(), index);
        Ok(self.folders.get(&key))
    }

    /// Remove a folder and all its records
    pub fn remove_folder(&mut self, folder: &Path) -> Option<FolderIndex> {
        let removed = self.folders.remove(folder);
        if removed.is_some() {
            self.pending_events.push(LibraryEvent::FolderRemoved {
                folder_path: folder.to_path_buf(),
            });
        }
        removed
    }

    /// Clear the whole library
    pub fn reset(&mut self) {
        self.folders.clear();
        self.pending_events.push(LibraryEvent::Reset);
    }

    /// Folders in path order
    pub fn folders(&self) -> impl Iterator<Item = &FolderIndex> {
        self.folders.values()
    }

    /// Look up one folder's index
    pub fn folder(&self, folder: &Path) -> Option<&FolderIndex> {
        self.folders.get(folder)
    }

    /// Flattened view over every record, folder-then-path order
    pub fn records(&self) -> impl Iterator<Item = &AudioFileRecord> {
        self.folders.values().flat_map(FolderIndex::records)
    }

    /// Look up a record by file path
    pub fn record(&self, path: &Path) -> Option<&AudioFileRecord> {
        self.folders.values().find_map(|index| index.get(path))
    }

    /// Whether a file path is present in the library
    pub fn contains(&self, path: &Path) -> bool {
        self.record(path).is_some()
    }

    /// Number of folders
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    /// Whether the library holds no folders
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Drain pending change events
    pub fn take_events(&mut self) -> Vec<LibraryEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fono_core::CoverArt;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    struct NoCover;

    impl CoverExtractor for NoCover {
        async fn extract(&self, _path: &Path) -> fono_core::Result<Option<CoverArt>> {
            Ok(None)
        }
    }

    fn scanner() -> FolderScanner<NoCover> {
        FolderScanner::new(Arc::new(NoCover))
    }

    #[tokio::test]
    async fn add_folder_inserts_scanned_index() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"aa").unwrap();

        let mut store = LibraryStore::new();
        let index = store
            .add_folder(&scanner(), dir.path(), None)
            .await
            .unwrap()
            .expect("folder with audio");

        assert_eq!(index.len(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&dir.path().join("a.mp3")));

        let events = store.take_events();
        assert!(matches!(
            events.as_slice(),
            [LibraryEvent::FolderAdded { file_count: 1, .. }]
        ));
    }

    #[tokio::test]
    async fn empty_scan_is_discarded() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"no audio here").unwrap();

        let mut store = LibraryStore::new();
        let result = store.add_folder(&scanner(), dir.path(), None).await.unwrap();

        assert!(result.is_none());
        assert!(store.is_empty());
        assert!(store.take_events().is_empty());
    }

    #[tokio::test]
    async fn readding_folder_replaces_index() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"aa").unwrap();
        fs::write(dir.path().join("b.mp3"), b"bb").unwrap();

        let mut store = LibraryStore::new();
        let s = scanner();
        store.add_folder(&s, dir.path(), None).await.unwrap();

        fs::remove_file(dir.path().join("b.mp3")).unwrap();
        let index = store
            .add_folder(&s, dir.path(), None)
            .await
            .unwrap()
            .expect("still has a.mp3");

        assert_eq!(index.len(), 1);
        assert_eq!(store.len(), 1);
        assert!(!store.contains(&dir.path().join("b.mp3")));
    }

    #[tokio::test]
    async fn failed_scan_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"aa").unwrap();

        let mut store = LibraryStore::new();
        let s = scanner();
        store.add_folder(&s, dir.path(), None).await.unwrap();
        store.take_events();

        let result = store
            .add_folder(&s, Path::new("/does/not/exist"), None)
            .await;

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
        assert!(store.take_events().is_empty());
    }

    #[tokio::test]
    async fn remove_and_reset_emit_events() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"aa").unwrap();

        let mut store = LibraryStore::new();
        store.add_folder(&scanner(), dir.path(), None).await.unwrap();

        let removed = store.remove_folder(dir.path()).expect("was present");
        assert_eq!(removed.len(), 1);
        assert!(store.remove_folder(dir.path()).is_none());

        store.reset();
        assert!(store.is_empty());

        let events = store.take_events();
        assert!(matches!(
            events.as_slice(),
            [
                LibraryEvent::FolderAdded { .. },
                LibraryEvent::FolderRemoved { .. },
                LibraryEvent::Reset
            ]
        ));
    }
}
