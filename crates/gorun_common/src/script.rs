//! The script being run: its location, body, and derived names.

use std::path::{Path, PathBuf};

use crate::hash::ContentHash;

/// Errors raised while loading the user's script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("could not read supplied filepath {path}: {source}")]
    Read {
        /// The path given on the command line.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file name does not yield a usable binary name (e.g. `.go`).
    #[error("could not derive a binary name from {path}")]
    NoBinaryName {
        /// The path given on the command line.
        path: PathBuf,
    },
}

/// A loaded script, immutable for the duration of one run.
///
/// The body has any leading `#!` interpreter line removed, so running the file
/// directly or through its interpreter line stages and fingerprints the same
/// bytes.
#[derive(Debug, Clone)]
pub struct Script {
    path: PathBuf,
    body: Vec<u8>,
    fingerprint: ContentHash,
    binary_name: String,
}

impl Script {
    /// Reads the script at `path` and prepares its body and names.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let raw = std::fs::read(path).map_err(|e| ScriptError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_parts(path, raw)
    }

    /// Builds a script from already-read content.
    pub fn from_parts(path: &Path, raw: Vec<u8>) -> Result<Self, ScriptError> {
        let binary_name = binary_name(path).ok_or_else(|| ScriptError::NoBinaryName {
            path: path.to_path_buf(),
        })?;
        let body = strip_directive(&raw).to_vec();
        let fingerprint = ContentHash::from_bytes(&body);
        Ok(Self {
            path: path.to_path_buf(),
            body,
            fingerprint,
            binary_name,
        })
    }

    /// The path as supplied by the caller.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The script body with any interpreter directive removed.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Fingerprint of [`Script::body`].
    pub fn fingerprint(&self) -> ContentHash {
        self.fingerprint
    }

    /// The project and binary name: the file name up to its last `.`.
    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    /// The on-disk file name of the compiled artifact for this platform.
    pub fn artifact_file_name(&self) -> String {
        format!("{}{}", self.binary_name, std::env::consts::EXE_SUFFIX)
    }
}

/// Removes a leading `#!` line, newline included.
///
/// Content without a newline is returned unchanged even if it starts with
/// `#!`.
pub fn strip_directive(content: &[u8]) -> &[u8] {
    if !content.starts_with(b"#!") {
        return content;
    }
    match content.iter().position(|&b| b == b'\n') {
        Some(idx) => &content[idx + 1..],
        None => content,
    }
}

fn binary_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    let name = match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => &file_name[..],
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
