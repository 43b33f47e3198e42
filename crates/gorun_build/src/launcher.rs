//! Running the compiled script with the caller's stdio.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::BuildError;

/// Runs compiled artifacts.
pub struct ExecutionLauncher;

impl ExecutionLauncher {
    /// Runs `artifact` to completion with inherited stdin, stdout and stderr.
    ///
    /// The script starts in the caller's working directory, not the
    /// workspace it was built in.
    ///
    /// Any unsuccessful termination, including death by signal, is an error.
    pub fn launch(artifact: &Path) -> Result<(), BuildError> {
        tracing::debug!(binary = %artifact.display(), "executing compiled binary");
        let status = Command::new(artifact)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| BuildError::Launch {
                path: artifact.to_path_buf(),
                source: e,
            })?;

        if !status.success() {
            return Err(BuildError::ScriptFailed { status });
        }
        Ok(())
    }
}
