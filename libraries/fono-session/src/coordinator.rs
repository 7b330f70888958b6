//! Selection coordination between library and playback

use fono_core::{AudioFileRecord, CoverExtractor, FolderIndex, FonoError, Result};
use fono_library::{FolderScanner, LibraryEvent, LibraryStore, ScanProgress};
use fono_playback::{
    AudioBackend, BackendSignal, PlaybackEngine, PlaybackEvent, PlaybackState, SessionId,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// The coordination layer over library, selection, and playback
///
/// Owns all three; every mutation goes through `&mut self` on the caller's
/// single control thread, so library changes and the selection/playback
/// reconciliation they require happen atomically within one call. The
/// selected path always resolves to a record in the store.
pub struct SelectionCoordinator<E: CoverExtractor> {
    scanner: FolderScanner<E>,
    store: LibraryStore,
    engine: PlaybackEngine,
    selection: Option<PathBuf>,
}

impl<E: CoverExtractor> SelectionCoordinator<E> {
    /// Create a coordinator over a scanner and an audio subsystem
    pub fn new(scanner: FolderScanner<E>, backend: Box<dyn AudioBackend>) -> Self {
        Self {
            scanner,
            store: LibraryStore::new(),
            engine: PlaybackEngine::new(backend),
            selection: None,
        }
    }

    // ---- Library ----

    /// Scan a folder and merge it into the library
    ///
    /// Returns the number of audio files indexed, or `None` when the folder
    /// held no audio and was discarded. Re-adding a folder replaces its
    /// index; if the replacement no longer contains the selected file the
    /// selection is cleared and the playback session released.
    pub async fn add_folder(
        &mut self,
        folder: &Path,
        progress_tx: Option<mpsc::Sender<ScanProgress>>,
    ) -> Result<Option<usize>> {
        let count = self
            .store
            .add_folder(&self.scanner, folder, progress_tx)
            .await?
            .map(FolderIndex::len);
        self.reconcile();
        Ok(count)
    }

    /// Remove a folder from the library
    ///
    /// A selection inside the removed folder is cleared and the playback
    /// session released before this returns.
    pub fn remove_folder(&mut self, folder: &Path) -> bool {
        let removed = self.store.remove_folder(folder).is_some();
        if removed {
            self.reconcile();
        }
        removed
    }

    /// Clear the whole library, the selection, and any playback session
    pub fn reset(&mut self) {
        self.store.reset();
        self.reconcile();
    }

    /// The underlying library, read-only
    pub fn library(&self) -> &LibraryStore {
        &self.store
    }

    // ---- Selection ----

    /// Select an audio file and bind it for playback
    ///
    /// The file must already be in the library. Binding replaces any prior
    /// playback session; the new one becomes playable once the subsystem
    /// reports ready.
    pub fn select(&mut self, path: &Path) -> Result<()> {
        let Some(record) = self.store.record(path).cloned() else {
            return Err(FonoError::RecordNotFound(path.to_path_buf()));
        };

        self.engine.bind(&record)?;
        info!(path = %path.display(), "track selected");
        self.selection = Some(record.path);
        Ok(())
    }

    /// Drop the selection and release any playback session
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.engine.unbind();
    }

    /// The selected record, resolved against the library
    pub fn selected(&self) -> Option<&AudioFileRecord> {
        self.selection.as_deref().and_then(|p| self.store.record(p))
    }

    // ---- Transport ----

    /// Start or resume playback of the selected track
    pub fn play(&mut self) -> Result<()> {
        self.engine.play().map_err(FonoError::from)
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        self.engine.pause().map_err(FonoError::from)
    }

    /// Stop playback, rewinding to the start
    pub fn stop(&mut self) -> Result<()> {
        self.engine.stop().map_err(FonoError::from)
    }

    /// Seek to a position in seconds, clamped to the track bounds
    pub fn seek_seconds(&mut self, seconds: f64) -> Result<Duration> {
        self.engine.seek_seconds(seconds).map_err(FonoError::from)
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.engine.state()
    }

    /// Current playback position
    pub fn position(&self) -> Duration {
        self.engine.position()
    }

    /// Track duration, once known
    pub fn duration(&self) -> Option<Duration> {
        self.engine.duration()
    }

    /// Forward an asynchronous subsystem signal into the engine
    pub fn handle_signal(&mut self, id: SessionId, signal: BackendSignal) {
        self.engine.handle_signal(id, signal);
    }

    // ---- Events ----

    /// Drain pending library change events
    pub fn take_library_events(&mut self) -> Vec<LibraryEvent> {
        self.store.take_events()
    }

    /// Drain pending playback events
    pub fn take_playback_events(&mut self) -> Vec<PlaybackEvent> {
        self.engine.take_events()
    }

    /// Drop a selection whose record left the library
    fn reconcile(&mut self) {
        let stale = self
            .selection
            .as_deref()
            .is_some_and(|p| !self.store.contains(p));
        if stale {
            info!("selected track left the library, clearing selection");
            self.clear_selection();
        }
    }
}
