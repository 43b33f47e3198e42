//! The skip/run decision for the three build phases.
//!
//! Planning is a pure function of the inspected workspace and the current
//! script fingerprint. The one invariant everything else leans on: a binary is
//! only reused when the staged source that produced it is byte-identical to
//! the script being run.

use std::fmt;

use gorun_common::ContentHash;

use crate::inspect::Inspection;

/// One of the build phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Write the script body into the workspace.
    Stage,
    /// Initialize the toolchain's project metadata.
    MetadataInit,
    /// Resolve dependencies and build the binary.
    Compile,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Stage => "stage",
            Phase::MetadataInit => "metadata-init",
            Phase::Compile => "compile",
        };
        f.write_str(name)
    }
}

/// Which phases may be skipped for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildPlan {
    /// The staged source already matches the script.
    pub skip_stage: bool,
    /// Build metadata already exists.
    pub skip_metadata_init: bool,
    /// The existing artifact was built from the current script.
    pub skip_compile: bool,
    /// An artifact with the expected name exists, stale or not.
    pub artifact_present: bool,
}

impl BuildPlan {
    /// The phases that must run, in order.
    pub fn phases(&self) -> Vec<Phase> {
        let mut phases = Vec::with_capacity(3);
        if !self.skip_stage {
            phases.push(Phase::Stage);
        }
        if !self.skip_metadata_init {
            phases.push(Phase::MetadataInit);
        }
        if !self.skip_compile {
            phases.push(Phase::Compile);
        }
        phases
    }

    /// Returns `true` when the cached binary can be run as is.
    pub fn is_fresh(&self) -> bool {
        self.phases().is_empty()
    }
}

/// Derives a [`BuildPlan`] from a workspace inspection.
pub struct BuildPlanner;

impl BuildPlanner {
    /// Plans a run of a script whose body hashes to `current`.
    ///
    /// Metadata is keyed on presence alone. Compilation is skipped only when
    /// the artifact exists, staging was skipped, and metadata did not have to
    /// be initialized; a metadata init restarts the build chain.
    pub fn plan(inspection: &Inspection, current: ContentHash) -> BuildPlan {
        let skip_stage = inspection.staged_source() == Some(current);
        let skip_metadata_init = inspection.has_build_metadata();
        let artifact_present = inspection.has_artifact();
        let skip_compile = artifact_present && skip_stage && skip_metadata_init;

        let plan = BuildPlan {
            skip_stage,
            skip_metadata_init,
            skip_compile,
            artifact_present,
        };
        tracing::debug!(?plan, "planned build");
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{CacheEntry, EntryKind};

    fn entry(name: &str, kind: EntryKind) -> CacheEntry {
        CacheEntry {
            name: name.to_string(),
            kind,
        }
    }

    fn staged(body: &[u8]) -> CacheEntry {
        entry("main.go", EntryKind::StagedSource(ContentHash::from_bytes(body)))
    }

    const BODY: &[u8] = b"package main\nfunc main() { println(\"hi\") }\n";

    #[test]
    fn fresh_directory_runs_everything() {
        let plan = BuildPlanner::plan(&Inspection::default(), ContentHash::from_bytes(BODY));
        assert_eq!(plan, BuildPlan::default());
        assert_eq!(
            plan.phases(),
            vec![Phase::Stage, Phase::MetadataInit, Phase::Compile]
        );
    }

    #[test]
    fn unchanged_workspace_skips_everything() {
        let inspection = Inspection::from_entries(vec![
            staged(BODY),
            entry("go.mod", EntryKind::BuildMetadata),
            entry("hello", EntryKind::Artifact),
        ]);
        let plan = BuildPlanner::plan(&inspection, ContentHash::from_bytes(BODY));
        assert_eq!(
            plan,
            BuildPlan {
                skip_stage: true,
                skip_metadata_init: true,
                skip_compile: true,
                artifact_present: true,
            }
        );
        assert!(plan.is_fresh());
    }

    #[test]
    fn changed_script_invalidates_stale_artifact() {
        let inspection = Inspection::from_entries(vec![
            staged(b"package main // old"),
            entry("go.mod", EntryKind::BuildMetadata),
            entry("hello", EntryKind::Artifact),
        ]);
        let plan = BuildPlanner::plan(&inspection, ContentHash::from_bytes(BODY));
        assert!(!plan.skip_stage);
        assert!(plan.skip_metadata_init);
        assert!(!plan.skip_compile);
        assert!(plan.artifact_present);
        assert_eq!(plan.phases(), vec![Phase::Stage, Phase::Compile]);
    }

    #[test]
    fn missing_metadata_forces_rebuild() {
        let inspection =
            Inspection::from_entries(vec![staged(BODY), entry("hello", EntryKind::Artifact)]);
        let plan = BuildPlanner::plan(&inspection, ContentHash::from_bytes(BODY));
        assert!(plan.skip_stage);
        assert!(!plan.skip_metadata_init);
        assert!(!plan.skip_compile);
        assert!(plan.artifact_present);
        assert_eq!(plan.phases(), vec![Phase::MetadataInit, Phase::Compile]);
    }

    #[test]
    fn matching_source_without_artifact_compiles() {
        let inspection = Inspection::from_entries(vec![
            staged(BODY),
            entry("go.mod", EntryKind::BuildMetadata),
        ]);
        let plan = BuildPlanner::plan(&inspection, ContentHash::from_bytes(BODY));
        assert!(plan.skip_stage);
        assert!(!plan.skip_compile);
        assert!(!plan.artifact_present);
        assert_eq!(plan.phases(), vec![Phase::Compile]);
    }

    #[test]
    fn metadata_is_kept_across_content_changes() {
        let inspection = Inspection::from_entries(vec![entry("go.mod", EntryKind::BuildMetadata)]);
        let plan = BuildPlanner::plan(&inspection, ContentHash::from_bytes(b"anything"));
        assert!(plan.skip_metadata_init);
    }

    #[test]
    fn unrecognized_entries_do_not_affect_plan() {
        let inspection = Inspection::from_entries(vec![
            entry("go.sum", EntryKind::Unrecognized),
            entry("hello.bak", EntryKind::Unrecognized),
        ]);
        let plan = BuildPlanner::plan(&inspection, ContentHash::from_bytes(BODY));
        assert_eq!(plan, BuildPlan::default());
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Stage.to_string(), "stage");
        assert_eq!(Phase::MetadataInit.to_string(), "metadata-init");
        assert_eq!(Phase::Compile.to_string(), "compile");
    }
}
