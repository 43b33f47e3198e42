//! Parsing and validation of gorun runner configuration files.
//!
//! Configuration is optional: every field has a default, and a file is only
//! read when the caller names one. The result is a [`RunnerConfig`] that the
//! binary threads explicitly into the cache and build layers.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
