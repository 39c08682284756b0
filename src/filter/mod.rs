//! Probabilistic set-membership filters
//!
//! Two Bloom filter implementations over a shared bit vector: a fixed-size
//! two-probe filter driven by the standard library hasher, and a
//! parameterized filter built on 128-bit Murmur3 digests with double
//! hashing.

mod basic;
mod bitvec;
mod bloom;

pub use basic::BasicBloomFilter;
pub use bitvec::BitVector;
pub use bloom::BloomFilter;
