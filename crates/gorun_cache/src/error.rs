//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur while resolving or inspecting a cache directory.
///
/// The cache is trusted local state, so every one of these is fatal to the
/// run: there is no fallback to an uncached build.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or writing cache files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The cache root exists but is not a directory.
    #[error("temporary compilation directory {path} already exists and is a file")]
    RootNotDirectory {
        /// The configured cache root.
        path: PathBuf,
    },

    /// A workspace directory could not be listed.
    #[error("could not read the contents of temporary compilation directory {path}: {source}")]
    Unreadable {
        /// The workspace directory.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
