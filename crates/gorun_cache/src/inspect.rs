//! Classification of the files already present in a workspace directory.

use std::path::Path;

use gorun_common::ContentHash;

use crate::error::CacheError;
use crate::hasher::PathHasher;

/// File name of the staged copy of the script body.
pub const STAGED_SOURCE_NAME: &str = "main.go";

/// File name of the toolchain's project descriptor.
pub const BUILD_METADATA_NAME: &str = "go.mod";

/// What a workspace entry was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The staged script body, with the fingerprint of its current bytes.
    StagedSource(ContentHash),
    /// The build metadata file. Its content is never inspected.
    BuildMetadata,
    /// A file named like the expected compiled binary.
    Artifact,
    /// Anything else; tolerated and ignored.
    Unrecognized,
}

/// A single named item found in a workspace directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// File name relative to the workspace.
    pub name: String,
    /// How the entry was classified.
    pub kind: EntryKind,
}

/// The classified contents of one workspace directory.
#[derive(Debug, Clone, Default)]
pub struct Inspection {
    entries: Vec<CacheEntry>,
}

impl Inspection {
    /// Wraps pre-classified entries, sorted by name.
    pub fn from_entries(mut entries: Vec<CacheEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    /// All entries, sorted by name.
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Fingerprint of the staged source, if one was found.
    pub fn staged_source(&self) -> Option<ContentHash> {
        self.entries.iter().find_map(|e| match e.kind {
            EntryKind::StagedSource(hash) => Some(hash),
            _ => None,
        })
    }

    /// Whether build metadata exists.
    pub fn has_build_metadata(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == EntryKind::BuildMetadata)
    }

    /// Whether an entry with the artifact's name exists.
    pub fn has_artifact(&self) -> bool {
        self.entries.iter().any(|e| e.kind == EntryKind::Artifact)
    }

    /// Names of entries that matched none of the known files.
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Unrecognized)
            .map(|e| e.name.as_str())
    }
}

/// Lists and classifies a workspace directory.
pub struct CacheInspector;

impl CacheInspector {
    /// Classifies the immediate children of `dir`.
    ///
    /// Names are matched exactly against [`STAGED_SOURCE_NAME`],
    /// [`BUILD_METADATA_NAME`] and `artifact_name`, in that order. The staged
    /// source is read and fingerprinted here so planning stays pure.
    pub fn inspect(dir: &Path, artifact_name: &str) -> Result<Inspection, CacheError> {
        let unreadable = |e: std::io::Error| CacheError::Unreadable {
            path: dir.to_path_buf(),
            source: e,
        };

        let mut entries = Vec::new();
        for item in std::fs::read_dir(dir).map_err(unreadable)? {
            let item = item.map_err(unreadable)?;
            let name = item.file_name().to_string_lossy().into_owned();
            tracing::debug!(name = %name, "found file in temporary compilation directory");

            let kind = if name == STAGED_SOURCE_NAME {
                EntryKind::StagedSource(PathHasher::fingerprint_file(&item.path())?)
            } else if name == BUILD_METADATA_NAME {
                EntryKind::BuildMetadata
            } else if name == artifact_name {
                EntryKind::Artifact
            } else {
                EntryKind::Unrecognized
            };
            entries.push(CacheEntry { name, kind });
        }

        Ok(Inspection::from_entries(entries))
    }
}
