//! Build execution and launch for cached scripts.
//!
//! Given a [`gorun_cache::BuildPlan`], the [`BuildOrchestrator`] runs only the
//! phases the plan does not skip, through a [`Toolchain`], and the
//! [`ExecutionLauncher`] runs the resulting binary with the caller's stdio.

#![warn(missing_docs)]

pub mod error;
pub mod launcher;
pub mod orchestrator;
pub mod toolchain;

pub use error::BuildError;
pub use launcher::ExecutionLauncher;
pub use orchestrator::{BuildOrchestrator, BuildOutcome};
pub use toolchain::{GoToolchain, Toolchain, ToolchainStep};
