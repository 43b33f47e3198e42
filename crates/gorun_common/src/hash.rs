//! Content hashing for cache keys.

use std::fmt;

/// A 128-bit XXH3 fingerprint.
///
/// Used both to name per-script cache directories (from the canonical path)
/// and to detect when a script body differs from its staged copy. Equal
/// fingerprints are treated as equal inputs.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(u128);

impl ContentHash {
    /// Hashes `data` with XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:08x}..)", self.0 >> 96)
    }
}
