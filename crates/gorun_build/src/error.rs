//! Error types for the build and launch phases.

use std::path::PathBuf;
use std::process::ExitStatus;

use crate::toolchain::ToolchainStep;

/// Errors raised while building or running a script.
///
/// Every variant aborts the run. Toolchain failures carry the captured
/// compiler output so it can be shown to the operator verbatim.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The script body could not be written to the workspace.
    #[error("could not write script contents to compilation directory {dir}: {source}")]
    Stage {
        /// The workspace directory.
        dir: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The toolchain program could not be started.
    #[error("could not start `{program}` to {step} in {dir}: {source}")]
    ToolchainSpawn {
        /// The configured toolchain program.
        program: String,
        /// The step being attempted.
        step: ToolchainStep,
        /// The workspace directory.
        dir: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A toolchain step exited unsuccessfully.
    #[error("could not {step} in temporary compilation directory {dir}: {status}\nOutput:\n{output}")]
    Toolchain {
        /// The step that failed.
        step: ToolchainStep,
        /// The workspace directory.
        dir: PathBuf,
        /// How the toolchain process terminated.
        status: String,
        /// Combined stdout and stderr of the toolchain.
        output: String,
    },

    /// All phases finished but there is no binary to run.
    #[error("could not locate compiled binary to execute in temporary compilation directory {dir}")]
    MissingArtifact {
        /// The workspace directory.
        dir: PathBuf,
    },

    /// The compiled binary could not be started.
    #[error("could not launch compiled script {path}: {source}")]
    Launch {
        /// Path of the compiled binary.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The script ran but did not exit successfully.
    #[error("error occurred during script execution: {status}")]
    ScriptFailed {
        /// How the script process terminated.
        status: ExitStatus,
    },
}
