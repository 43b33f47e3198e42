//! Configuration file loading and validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::RunnerConfig;

/// Loads and validates a runner configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RunnerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a runner configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<RunnerConfig, ConfigError> {
    let config: RunnerConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &RunnerConfig) -> Result<(), ConfigError> {
    if config.toolchain.program.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "toolchain.program must not be empty".to_string(),
        ));
    }
    if let Some(root) = &config.cache.root {
        if !root.is_absolute() {
            return Err(ConfigError::ValidationError(format!(
                "cache.root must be an absolute path, got {}",
                root.display()
            )));
        }
    }
    Ok(())
}
