//! Configuration types deserialized from a gorun TOML file.

use std::path::PathBuf;

use serde::Deserialize;

/// Toolchain program used when none is configured.
pub const DEFAULT_TOOLCHAIN_PROGRAM: &str = "go";

/// The top-level runner configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Where compilation workspaces live.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Which compiler to drive.
    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

/// Cache location settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Explicit cache root. Defaults to `<temp dir>/<tool name>`.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// External toolchain settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Program invoked for `mod init`, `mod tidy` and `build`.
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

fn default_program() -> String {
    DEFAULT_TOOLCHAIN_PROGRAM.to_string()
}

impl RunnerConfig {
    /// Returns the effective cache root for a tool invoked as `tool_name`.
    pub fn cache_root(&self, tool_name: &str) -> PathBuf {
        match &self.cache.root {
            Some(root) => root.clone(),
            None => std::env::temp_dir().join(tool_name),
        }
    }
}
