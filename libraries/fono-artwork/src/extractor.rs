use crate::error::{ArtworkError, Result};
use fono_core::{CoverArt, CoverExtractor};
use lofty::{PictureType, TaggedFileExt};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Maximum artwork size (5MB)
const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Extracts embedded cover art from audio files, with LRU caching
pub struct ArtworkExtractor {
    cache: Arc<Mutex<LruCache<PathBuf, Arc<CoverArt>>>>,
}

impl ArtworkExtractor {
    /// Create a new artwork extractor with the specified cache size
    ///
    /// # Arguments
    /// * `cache_size` - Maximum number of images to cache (0 to disable caching)
    pub fn new(cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Extract cover art from an audio file
    ///
    /// Returns `Ok(Some(cover))` if artwork was found, `Ok(None)` if the file
    /// carries none, or `Err` if the file could not be read.
    pub fn extract_cover(&self, path: &Path) -> Result<Option<CoverArt>> {
        // Canonicalize path for consistent cache keys
        let canonical_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        {
            let mut cache = self.cache.lock().unwrap();
            if let Some(cached) = cache.get(&canonical_path) {
                return Ok(Some((**cached).clone()));
            }
        }

        match Self::extract_from_file(path) {
            Ok(Some(cover)) => {
                let mut cache = self.cache.lock().unwrap();
                cache.put(canonical_path, Arc::new(cover.clone()));
                Ok(Some(cover))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        let mut cache = self.cache.lock().unwrap();
        cache.clear();
    }

    /// Extract cover art from a file without caching
    fn extract_from_file(path: &Path) -> Result<Option<CoverArt>> {
        if !path.exists() {
            return Err(ArtworkError::FileNotFound(path.to_path_buf()));
        }

        let tagged_file = lofty::read_from_path(path)?;

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag());

        let Some(tag) = tag else {
            return Ok(None);
        };

        let pictures = tag.pictures();
        if pictures.is_empty() {
            return Ok(None);
        }

        // Prefer front cover, otherwise use first picture
        let picture = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first());

        let Some(picture) = picture else {
            return Ok(None);
        };

        let data = picture.data();
        if data.len() > MAX_ARTWORK_SIZE {
            debug!(
                path = %path.display(),
                size = data.len(),
                "artwork exceeds size limit, skipping"
            );
            return Err(ArtworkError::TooLarge(data.len(), MAX_ARTWORK_SIZE));
        }

        // Default to "image/jpeg" when the tag does not declare a MIME type
        let mime_type = picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "image/jpeg".to_string());

        Ok(Some(CoverArt::new(data.to_vec(), mime_type)))
    }
}

impl CoverExtractor for ArtworkExtractor {
    async fn extract(&self, path: &Path) -> fono_core::Result<Option<CoverArt>> {
        Ok(self.extract_cover(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extractor_creation() {
        let extractor = ArtworkExtractor::new(10);
        assert!(extractor.cache.lock().unwrap().is_empty());
    }

    #[test]
    fn extract_nonexistent_file_returns_error() {
        let extractor = ArtworkExtractor::new(10);
        let result = extractor.extract_cover(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(ArtworkError::FileNotFound(_))));
    }

    #[test]
    fn extract_unparseable_file_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.mp3");
        std::fs::write(&path, b"not an mp3 at all").unwrap();

        let extractor = ArtworkExtractor::new(10);
        assert!(extractor.extract_cover(&path).is_err());
    }

    #[test]
    fn clear_cache_works() {
        let extractor = ArtworkExtractor::new(10);
        extractor.clear_cache();
        assert!(extractor.cache.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn trait_extraction_converts_errors() {
        let extractor = ArtworkExtractor::new(1);
        let result =
            CoverExtractor::extract(&extractor, Path::new("/nonexistent/file.mp3")).await;
        assert!(result.is_err());
    }
}
