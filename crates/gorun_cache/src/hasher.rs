//! Fingerprinting of script paths and staged file content.

use std::path::Path;

use gorun_common::ContentHash;

use crate::error::CacheError;

/// Computes the fingerprints the cache is keyed on.
///
/// Paths are hashed by their string form, so callers must normalize them
/// first; files are hashed by their raw bytes.
pub struct PathHasher;

impl PathHasher {
    /// Fingerprints an already-normalized path by its raw OS bytes.
    ///
    /// Non-UTF-8 paths keep their exact bytes, so distinct paths never
    /// collapse onto one workspace through lossy conversion.
    pub fn fingerprint_path(path: &Path) -> ContentHash {
        ContentHash::from_bytes(path.as_os_str().as_encoded_bytes())
    }

    /// Reads a file and returns its XXH3-128 content hash.
    pub fn fingerprint_file(path: &Path) -> Result<ContentHash, CacheError> {
        let content = std::fs::read(path).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(ContentHash::from_bytes(&content))
    }
}
