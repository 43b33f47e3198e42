//! Shared foundational types used across gorun.
//!
//! This crate provides the content fingerprint used as a cache key and the
//! in-memory representation of the script being run.

#![warn(missing_docs)]

pub mod hash;
pub mod script;

pub use hash::ContentHash;
pub use script::{strip_directive, Script, ScriptError};
