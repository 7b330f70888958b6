/// Folder scanner implementation
use crate::error::{Result, ScanError};
use chrono::{DateTime, Utc};
use fono_core::{AudioFileRecord, CoverExtractor, FolderIndex};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;
use walkdir::WalkDir;

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Supported audio file extensions (lowercase, no dot)
    pub extensions: Vec<String>,

    /// Per-file budget for cover extraction; a hung or malformed file
    /// counts as an extraction failure instead of stalling the scan
    pub extract_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".to_string(),
                "wav".to_string(),
                "m4a".to_string(),
                "aac".to_string(),
                "ogg".to_string(),
                "flac".to_string(),
            ],
            extract_timeout: Duration::from_secs(5),
        }
    }
}

/// Scan progress updates
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Scanning started
    Started { total_files: usize },

    /// File indexed
    FileScanned { path: PathBuf, cover_found: bool },

    /// Scanning completed
    Completed { stats: ScanStats },
}

/// Scan statistics
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Number of matching audio files discovered
    pub files_discovered: usize,

    /// Number of records produced
    pub files_indexed: usize,

    /// Number of files with embedded cover art
    pub covers_found: usize,

    /// Per-file cover extraction failures (record still produced, cover absent)
    pub cover_errors: Vec<(PathBuf, String)>,
}

/// Folder scanner
///
/// Scans the direct entries of one folder, filters to the configured audio
/// extensions, and produces a `FolderIndex` with per-file size, mtime, and
/// embedded cover art.
pub struct FolderScanner<E: CoverExtractor> {
    extractor: Arc<E>,
    config: ScanConfig,
}

impl<E: CoverExtractor> FolderScanner<E> {
    /// Create a new folder scanner
    pub fn new(extractor: Arc<E>) -> Self {
        Self {
            extractor,
            config: ScanConfig::default(),
        }
    }

    /// Create a scanner with custom configuration
    pub fn with_config(extractor: Arc<E>, config: ScanConfig) -> Self {
        Self { extractor, config }
    }

    /// Scan a folder for audio files
    ///
    /// Non-recursive: only direct entries are considered. Subdirectories,
    /// non-regular files, and unsupported extensions are silently skipped.
    /// A per-file cover extraction failure still produces a record with
    /// `cover = None`; an unreadable folder fails the whole scan and nothing
    /// is produced.
    ///
    /// # Arguments
    /// * `folder` - Directory to scan
    /// * `progress_tx` - Optional channel for progress updates
    pub async fn scan(
        &self,
        folder: &Path,
        progress_tx: Option<mpsc::Sender<ScanProgress>>,
    ) -> Result<FolderIndex> {
        let files = self.discover_files(folder)?;

        let mut stats = ScanStats {
            files_discovered: files.len(),
            ..ScanStats::default()
        };

        if let Some(ref tx) = progress_tx {
            let _ = tx
                .send(ScanProgress::Started {
                    total_files: files.len(),
                })
                .await;
        }

        let mut index = FolderIndex::new(folder);

        for (path, metadata) in files {
            let cover = match tokio::time::timeout(
                self.config.extract_timeout,
                self.extractor.extract(&path),
            )
            .await
            {
                Ok(Ok(cover)) => cover,
                Ok(Err(e)) => {
                    debug!(path = %path.display(), error = %e, "cover extraction failed");
                    stats.cover_errors.push((path.clone(), e.to_string()));
                    None
                }
                Err(_) => {
                    debug!(path = %path.display(), "cover extraction timed out");
                    stats
                        .cover_errors
                        .push((path.clone(), "extraction timed out".to_string()));
                    None
                }
            };

            let cover_found = cover.is_some();
            if cover_found {
                stats.covers_found += 1;
            }

            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let last_modified: DateTime<Utc> = metadata.modified()?.into();

            index.insert(AudioFileRecord {
                name,
                folder_path: folder.to_path_buf(),
                path: path.clone(),
                size: metadata.len(),
                last_modified,
                cover,
            });
            stats.files_indexed += 1;

            if let Some(ref tx) = progress_tx {
                let _ = tx.send(ScanProgress::FileScanned { path, cover_found }).await;
            }
        }

        if let Some(ref tx) = progress_tx {
            let _ = tx.send(ScanProgress::Completed { stats }).await;
        }

        Ok(index)
    }

    /// Discover matching audio files directly under a folder
    ///
    /// Returns path-sorted entries so the scan result is deterministic for a
    /// given directory snapshot.
    fn discover_files(&self, folder: &Path) -> Result<Vec<(PathBuf, std::fs::Metadata)>> {
        let root = std::fs::metadata(folder)?;
        if !root.is_dir() {
            return Err(ScanError::NotAFolder(folder.to_path_buf()));
        }

        let mut files = Vec::new();

        // Direct entries only; symlinks are not followed, so anything that
        // is not a regular file drops out here.
        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if self.is_supported_file(path) {
                let metadata = entry.metadata()?;
                files.push((path.to_path_buf(), metadata));
            }
        }

        files.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(files)
    }

    /// Check if file has a supported audio extension (case-insensitive)
    fn is_supported_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.config.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }
}
