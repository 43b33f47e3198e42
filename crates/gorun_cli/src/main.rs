//! gorun: run a Go source file as if it were a script.
//!
//! The file is compiled in a per-path workspace under a cache root and the
//! resulting binary is executed with the caller's stdio. Unchanged scripts
//! skip straight to execution on later runs.

#![warn(missing_docs)]

mod logging;
mod run;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use crate::run::RunOptions;

/// Name used when `argv[0]` gives nothing usable.
const DEFAULT_TOOL_NAME: &str = "gorun";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "gorun",
    version,
    about = "Run a Go source file as a script",
    after_help = "The script runs in the current working directory; only the Go toolchain runs inside the cache workspace."
)]
pub struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cache root to use instead of the configured one.
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// A valid file path to the Go code to be run.
    pub path: Option<PathBuf>,
}

fn main() {
    let tool = tool_name(std::env::args_os().next().as_deref().map(Path::new));
    let cli = Cli::parse();

    let Some(path) = cli.path else {
        print!("{}", usage(&tool));
        process::exit(2);
    };

    logging::init(cli.verbose);

    let options = RunOptions {
        config: cli.config,
        cache_dir: cli.cache_dir,
    };
    if let Err(e) = run::run(&path, &options, &tool) {
        eprintln!("{tool}: {e}");
        process::exit(1);
    }
}

/// Derives the tool name from the invoked program path.
fn tool_name(argv0: Option<&Path>) -> String {
    argv0
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_TOOL_NAME.to_string())
}

fn usage(tool: &str) -> String {
    format!(
        "{tool} usage:

\t{tool} [-v] PATH

OPTIONS:
\t-v\tEnable verbose logging
\t--config FILE\tRead settings from a TOML file
\t--cache-dir DIR\tKeep compilation workspaces under DIR

ARGUMENTS:
\tPATH\tA valid file path to the Go code to be run

The script runs in the current working directory; only the Go
toolchain runs inside the cache workspace.
"
    )
}
