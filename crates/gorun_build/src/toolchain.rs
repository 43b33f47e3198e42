//! The external compiler, driven as an opaque subprocess.

use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::error::BuildError;

/// A single toolchain invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainStep {
    /// Create project metadata for a project called `project`.
    InitMetadata {
        /// Project name, the script's binary name.
        project: String,
    },
    /// Resolve and tidy dependencies.
    ResolveDependencies,
    /// Build the binary.
    Build,
}

impl ToolchainStep {
    /// Arguments passed to the `go` command for this step.
    pub fn go_args(&self) -> Vec<&str> {
        match self {
            ToolchainStep::InitMetadata { project } => vec!["mod", "init", project.as_str()],
            ToolchainStep::ResolveDependencies => vec!["mod", "tidy"],
            ToolchainStep::Build => vec!["build"],
        }
    }
}

impl fmt::Display for ToolchainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolchainStep::InitMetadata { project } => write!(f, "initialise Go module {project}"),
            ToolchainStep::ResolveDependencies => f.write_str("tidy Go module"),
            ToolchainStep::Build => f.write_str("build script"),
        }
    }
}

/// Something that can carry out toolchain steps inside a workspace.
pub trait Toolchain {
    /// Runs `step` with `dir` as its working directory.
    ///
    /// Success or failure is all the caller interprets; output is only
    /// surfaced inside the error.
    fn run(&self, step: &ToolchainStep, dir: &Path) -> Result<(), BuildError>;
}

/// The Go toolchain, invoked through a configurable program name.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    program: String,
}

impl GoToolchain {
    /// Uses `program` (usually `go`) for every step.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program this toolchain runs.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Toolchain for GoToolchain {
    fn run(&self, step: &ToolchainStep, dir: &Path) -> Result<(), BuildError> {
        let args = step.go_args();
        tracing::debug!(program = %self.program, ?args, dir = %dir.display(), "running toolchain");

        let output = Command::new(self.program())
            .args(&args)
            .current_dir(dir)
            .output()
            .map_err(|e| BuildError::ToolchainSpawn {
                program: self.program().to_string(),
                step: step.clone(),
                dir: dir.to_path_buf(),
                source: e,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(BuildError::Toolchain {
                step: step.clone(),
                dir: dir.to_path_buf(),
                status: output.status.to_string(),
                output: combined,
            });
        }
        if !combined.is_empty() {
            tracing::debug!(output = %combined.trim_end(), "toolchain output");
        }
        Ok(())
    }
}
