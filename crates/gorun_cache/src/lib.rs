//! Incremental build cache for single-file scripts.
//!
//! Each script path owns one workspace directory under a cache root. This
//! crate resolves that directory, classifies what is already in it, and turns
//! the classification into a [`BuildPlan`] that says which build phases can be
//! skipped without ever serving a binary built from different source.

#![warn(missing_docs)]

pub mod error;
pub mod hasher;
pub mod inspect;
pub mod plan;
pub mod workspace;

pub use error::CacheError;
pub use hasher::PathHasher;
pub use inspect::{
    CacheEntry, CacheInspector, EntryKind, Inspection, BUILD_METADATA_NAME, STAGED_SOURCE_NAME,
};
pub use plan::{BuildPlan, BuildPlanner, Phase};
pub use workspace::{normalize_path, WorkspaceResolver};
