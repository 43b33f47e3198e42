//! Mapping of script paths to per-script workspace directories.
//!
//! A workspace is named by the fingerprint of the script's normalized path,
//! never its content. The same script therefore keeps one directory for its
//! whole life, and content changes are caught by comparing against the staged
//! copy inside it.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::CacheError;
use crate::hasher::PathHasher;

/// Resolves script paths to workspace directories under a cache root.
///
/// The root is passed in explicitly so tests and callers can isolate caches.
#[derive(Debug, Clone)]
pub struct WorkspaceResolver {
    root: PathBuf,
}

impl WorkspaceResolver {
    /// Creates a resolver rooted at `root`. Nothing is touched on disk yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the workspace directory for an already-normalized script path.
    pub fn directory_for(&self, normalized: &Path) -> PathBuf {
        self.root
            .join(PathHasher::fingerprint_path(normalized).to_string())
    }

    /// Resolves `script_path` to its workspace, creating directories as needed.
    ///
    /// Relative paths are anchored at the current working directory before
    /// normalization.
    pub fn resolve(&self, script_path: &Path) -> Result<PathBuf, CacheError> {
        let cwd = std::env::current_dir().map_err(|e| CacheError::Io {
            path: PathBuf::from("."),
            source: e,
        })?;
        let normalized = normalize_path(script_path, &cwd);
        tracing::debug!(script = %normalized.display(), "normalized script path");

        self.ensure_root()?;

        let dir = self.directory_for(&normalized);
        std::fs::create_dir_all(&dir).map_err(|e| CacheError::Io {
            path: dir.clone(),
            source: e,
        })?;
        tracing::debug!(workspace = %dir.display(), "temporary compilation directory ready");
        Ok(dir)
    }

    fn ensure_root(&self) -> Result<(), CacheError> {
        match std::fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(CacheError::RootNotDirectory {
                path: self.root.clone(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(root = %self.root.display(), "creating cache root");
                std::fs::create_dir_all(&self.root).map_err(|e| CacheError::Io {
                    path: self.root.clone(),
                    source: e,
                })
            }
            Err(e) => Err(CacheError::Io {
                path: self.root.clone(),
                source: e,
            }),
        }
    }
}

/// Makes `path` absolute against `cwd` and folds `.` and `..` lexically.
///
/// Symlinks are not resolved, so two links to one file get two workspaces.
pub fn normalize_path(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
