//! The run pipeline: resolve, inspect, plan, build, launch.

use std::path::{Path, PathBuf};

use gorun_build::{BuildError, BuildOrchestrator, BuildOutcome, ExecutionLauncher, GoToolchain};
use gorun_cache::{normalize_path, BuildPlanner, CacheError, CacheInspector, WorkspaceResolver};
use gorun_common::{Script, ScriptError};
use gorun_config::{ConfigError, RunnerConfig};

/// Settings taken from the command line.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Optional configuration file.
    pub config: Option<PathBuf>,
    /// Overrides the configured cache root.
    pub cache_dir: Option<PathBuf>,
}

/// Any failure that aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The configuration file was unreadable or invalid.
    #[error("{path}: {source}")]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// What went wrong.
        source: ConfigError,
    },

    /// The working directory could not be determined.
    #[error("could not determine current directory: {0}")]
    CurrentDir(std::io::Error),

    /// The script could not be loaded.
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// The cache could not be prepared or inspected.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A build phase or the script itself failed.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Loads the configuration and applies command-line overrides.
pub fn load_settings(options: &RunOptions) -> Result<RunnerConfig, RunError> {
    let mut config = match &options.config {
        Some(path) => gorun_config::load_config(path).map_err(|e| RunError::Config {
            path: path.clone(),
            source: e,
        })?,
        None => RunnerConfig::default(),
    };
    if let Some(dir) = &options.cache_dir {
        let cwd = std::env::current_dir().map_err(RunError::CurrentDir)?;
        config.cache.root = Some(normalize_path(dir, &cwd));
    }
    Ok(config)
}

/// Brings the cached binary for `script_path` up to date.
pub fn build(
    script_path: &Path,
    config: &RunnerConfig,
    tool_name: &str,
) -> Result<BuildOutcome, RunError> {
    let script = Script::load(script_path)?;
    tracing::debug!(binary = script.binary_name(), "using script binary name");

    let resolver = WorkspaceResolver::new(config.cache_root(tool_name));
    let dir = resolver.resolve(script.path())?;

    let inspection = CacheInspector::inspect(&dir, &script.artifact_file_name())?;
    let plan = BuildPlanner::plan(&inspection, script.fingerprint());

    let toolchain = GoToolchain::new(config.toolchain.program.clone());
    let outcome = BuildOrchestrator::new(&toolchain).execute(&dir, &script, &plan)?;
    Ok(outcome)
}

/// Builds the script if needed, then runs it with the caller's stdio.
pub fn run(script_path: &Path, options: &RunOptions, tool_name: &str) -> Result<(), RunError> {
    let config = load_settings(options)?;
    let outcome = build(script_path, &config, tool_name)?;
    ExecutionLauncher::launch(&outcome.artifact)?;
    Ok(())
}
