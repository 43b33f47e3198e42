//! Sequential execution of the phases a [`BuildPlan`] does not skip.

use std::path::{Path, PathBuf};

use gorun_cache::{BuildPlan, Phase, STAGED_SOURCE_NAME};
use gorun_common::Script;

use crate::error::BuildError;
use crate::toolchain::{Toolchain, ToolchainStep};

/// What a build left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Path of the binary to run.
    pub artifact: PathBuf,
    /// The phases that actually ran, in order.
    pub phases_run: Vec<Phase>,
}

/// Runs stage, metadata-init and compile against one workspace.
pub struct BuildOrchestrator<'t, T: Toolchain + ?Sized> {
    toolchain: &'t T,
}

impl<'t, T: Toolchain + ?Sized> BuildOrchestrator<'t, T> {
    /// Creates an orchestrator that compiles with `toolchain`.
    pub fn new(toolchain: &'t T) -> Self {
        Self { toolchain }
    }

    /// Executes the non-skipped phases of `plan` in `dir`, failing fast.
    ///
    /// Toolchain steps run with `dir` as their working directory; the
    /// process's own working directory is left alone.
    pub fn execute(
        &self,
        dir: &Path,
        script: &Script,
        plan: &BuildPlan,
    ) -> Result<BuildOutcome, BuildError> {
        let mut phases_run = Vec::new();
        let mut artifact_present = plan.artifact_present;

        if plan.skip_stage {
            tracing::debug!("skipping copy for script contents");
        } else {
            let staged = dir.join(STAGED_SOURCE_NAME);
            std::fs::write(&staged, script.body()).map_err(|e| BuildError::Stage {
                dir: dir.to_path_buf(),
                source: e,
            })?;
            tracing::debug!(path = %staged.display(), "staged script contents");
            phases_run.push(Phase::Stage);
        }

        if plan.skip_metadata_init {
            tracing::debug!("skipping Go module initialisation");
        } else {
            self.toolchain.run(
                &ToolchainStep::InitMetadata {
                    project: script.binary_name().to_string(),
                },
                dir,
            )?;
            phases_run.push(Phase::MetadataInit);
        }

        if plan.skip_compile {
            tracing::debug!("skipping compilation");
        } else {
            self.toolchain.run(&ToolchainStep::ResolveDependencies, dir)?;
            self.toolchain.run(&ToolchainStep::Build, dir)?;
            artifact_present = true;
            phases_run.push(Phase::Compile);
        }

        if !artifact_present {
            return Err(BuildError::MissingArtifact {
                dir: dir.to_path_buf(),
            });
        }

        Ok(BuildOutcome {
            artifact: dir.join(script.artifact_file_name()),
            phases_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingToolchain {
        steps: RefCell<Vec<ToolchainStep>>,
        fail_on: Option<ToolchainStep>,
    }

    impl Toolchain for RecordingToolchain {
        fn run(&self, step: &ToolchainStep, dir: &Path) -> Result<(), BuildError> {
            self.steps.borrow_mut().push(step.clone());
            if self.fail_on.as_ref() == Some(step) {
                return Err(BuildError::Toolchain {
                    step: step.clone(),
                    dir: dir.to_path_buf(),
                    status: "exit status: 1".to_string(),
                    output: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    fn script() -> Script {
        Script::from_parts(Path::new("/work/hello.go"), b"package main\n".to_vec()).unwrap()
    }

    #[test]
    fn full_plan_runs_all_steps_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let toolchain = RecordingToolchain::default();

        let outcome = BuildOrchestrator::new(&toolchain)
            .execute(dir.path(), &script(), &BuildPlan::default())
            .unwrap();

        assert_eq!(
            outcome.phases_run,
            vec![Phase::Stage, Phase::MetadataInit, Phase::Compile]
        );
        assert_eq!(
            *toolchain.steps.borrow(),
            vec![
                ToolchainStep::InitMetadata {
                    project: "hello".to_string()
                },
                ToolchainStep::ResolveDependencies,
                ToolchainStep::Build,
            ]
        );
        assert_eq!(
            std::fs::read(dir.path().join("main.go")).unwrap(),
            b"package main\n"
        );
        assert_eq!(outcome.artifact, dir.path().join(script().artifact_file_name()));
    }

    #[test]
    fn fresh_plan_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let toolchain = RecordingToolchain::default();
        let plan = BuildPlan {
            skip_stage: true,
            skip_metadata_init: true,
            skip_compile: true,
            artifact_present: true,
        };

        let outcome = BuildOrchestrator::new(&toolchain)
            .execute(dir.path(), &script(), &plan)
            .unwrap();

        assert!(outcome.phases_run.is_empty());
        assert!(toolchain.steps.borrow().is_empty());
        assert!(!dir.path().join("main.go").exists());
    }

    #[test]
    fn stage_overwrites_previous_copy() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.go"), "package main // old").unwrap();
        let toolchain = RecordingToolchain::default();
        let plan = BuildPlan {
            skip_metadata_init: true,
            ..BuildPlan::default()
        };

        BuildOrchestrator::new(&toolchain)
            .execute(dir.path(), &script(), &plan)
            .unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("main.go")).unwrap(),
            b"package main\n"
        );
    }

    #[test]
    fn failure_stops_later_steps() {
        let dir = tempfile::tempdir().unwrap();
        let toolchain = RecordingToolchain {
            fail_on: Some(ToolchainStep::ResolveDependencies),
            ..RecordingToolchain::default()
        };

        let err = BuildOrchestrator::new(&toolchain)
            .execute(dir.path(), &script(), &BuildPlan::default())
            .unwrap_err();

        assert!(matches!(err, BuildError::Toolchain { .. }));
        assert!(!toolchain.steps.borrow().contains(&ToolchainStep::Build));
    }

    #[test]
    fn skipped_compile_without_artifact_is_inconsistent() {
        let dir = tempfile::tempdir().unwrap();
        let toolchain = RecordingToolchain::default();
        let plan = BuildPlan {
            skip_stage: true,
            skip_metadata_init: true,
            skip_compile: true,
            artifact_present: false,
        };

        let err = BuildOrchestrator::new(&toolchain)
            .execute(dir.path(), &script(), &plan)
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingArtifact { .. }));
    }

    #[test]
    fn stage_write_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let toolchain = RecordingToolchain::default();

        let err = BuildOrchestrator::new(&toolchain)
            .execute(&missing, &script(), &BuildPlan::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::Stage { .. }));
        assert!(toolchain.steps.borrow().is_empty());
    }
}
