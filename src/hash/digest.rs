//! Immutable 128-bit hash digest

use serde::{Deserialize, Serialize};

/// A finalized 128-bit hash value.
///
/// Produced by [`Murmur3f::hash`](crate::Murmur3f::hash). Digests are
/// detached value objects: mutating the hasher afterwards does not affect
/// digests it already produced. Equality and hashing are structural over
/// the two 64-bit halves, so digests can key maps and sets directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashDigest {
    h1: u64,
    h2: u64,
}

impl HashDigest {
    /// Build a digest from its two 64-bit halves.
    pub fn new(h1: u64, h2: u64) -> Self {
        Self { h1, h2 }
    }

    /// First 64-bit half of the digest.
    pub fn h1(&self) -> u64 {
        self.h1
    }

    /// Second 64-bit half of the digest.
    pub fn h2(&self) -> u64 {
        self.h2
    }

    /// The digest as 16 big-endian bytes: `h1` most-significant-first,
    /// followed by `h2` most-significant-first.
    pub fn to_be_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[0..8].copy_from_slice(&self.h1.to_be_bytes());
        bytes[8..16].copy_from_slice(&self.h2.to_be_bytes());
        bytes
    }

    /// The digest as 16 little-endian bytes: the exact byte reversal of
    /// [`HashDigest::to_be_bytes`].
    pub fn to_le_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[0..8].copy_from_slice(&self.h2.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.h1.to_le_bytes());
        bytes
    }

    /// The digest as a non-negative 128-bit integer, built from the
    /// big-endian byte sequence.
    pub fn as_u128(&self) -> u128 {
        (u128::from(self.h1) << 64) | u128::from(self.h2)
    }

    /// The digest as 32 lowercase hex characters (the hex encoding of the
    /// big-endian bytes).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }
}

impl std::fmt::Display for HashDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
