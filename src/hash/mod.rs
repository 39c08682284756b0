//! 128-bit incremental hashing
//!
//! Provides the MurmurHash3 x64-128 variant ("Murmur3f") as a reusable
//! streaming hasher, plus the immutable 128-bit digest it produces.

mod digest;
mod murmur3;

pub use digest::HashDigest;
pub use murmur3::Murmur3f;
