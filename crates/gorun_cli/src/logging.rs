//! Diagnostic logging setup for the `gorun` binary.
//!
//! `RUST_LOG` takes precedence when set (e.g. `RUST_LOG=gorun_cache=debug`).
//! Otherwise `-v` enables debug output and the default shows warnings only.
//! Everything is written to stderr so the script's stdout stays clean.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. Call once, before any work starts.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
