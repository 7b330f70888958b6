/// Core traits for Fono
use crate::error::Result;
use crate::types::CoverArt;
use std::path::Path;

/// Cover extractor trait
///
/// Implementers read embedded artwork out of an audio file's metadata
/// container. The scanner calls this once per accepted file; a failure is
/// absorbed at the scan boundary and never aborts the containing scan.
#[allow(async_fn_in_trait)]
pub trait CoverExtractor: Send + Sync {
    /// Extract embedded cover art from an audio file
    ///
    /// Returns `Ok(Some(cover))` if artwork was found, `Ok(None)` if the file
    /// carries none.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its tags parsed
    async fn extract(&self, path: &Path) -> Result<Option<CoverArt>>;
}
