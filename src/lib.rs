//! # bloomhash - Murmur3 hashing and Bloom filters
//!
//! bloomhash provides a reusable, incremental 128-bit MurmurHash3 hasher
//! (the x64 variant, "Murmur3f") and probabilistic set-membership filters
//! built on top of it.
//!
//! ## Features
//!
//! - **Streaming 128-bit hashing**: feed input in any number of calls,
//!   finalize on demand, reseed and reuse the same instance
//! - **Rich digest views**: big-endian and little-endian bytes, `u128`,
//!   lowercase hex
//! - **Two Bloom filters**: a fixed-size two-probe filter and a
//!   capacity/precision-sized filter driven by Murmur3 double hashing
//! - **Saturation and cardinality estimation**: expected false positive
//!   probability, bit utilization, approximate element count
//! - **Persistent filter state**: compact byte encoding plus JSON
//!   snapshots on disk
//!
//! ## Quick Start
//!
//! ```
//! use bloomhash::Murmur3f;
//!
//! let mut hasher = Murmur3f::with_seed(1);
//! let digest = hasher.include(b"hello").hash();
//!
//! assert_eq!(digest.to_hex(), "a78ddff5adae8d10128900ef20900135");
//! ```
//!
//! ## Filters
//!
//! ```
//! use bloomhash::BloomFilter;
//!
//! let mut filter = BloomFilter::with_capacity(10_000, 0.01).unwrap();
//! filter.insert("alpha");
//! filter.insert("beta");
//!
//! assert!(filter.contains("alpha"));
//! assert!(!filter.contains("gamma"));
//! ```
//!
//! ## Streaming caveat
//!
//! Each `include` call mixes its leftover tail bytes immediately instead of
//! buffering a partial block, so splitting input at a non-16-byte boundary
//! yields a different digest than one concatenated call. See
//! [`Murmur3f::include`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod filter;
pub mod hash;

// Re-export commonly used types
pub use error::{BloomHashError, Result};
pub use filter::{BasicBloomFilter, BitVector, BloomFilter};
pub use hash::{HashDigest, Murmur3f};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```
    //! use bloomhash::prelude::*;
    //! ```

    pub use crate::error::{BloomHashError, Result};
    pub use crate::filter::{BasicBloomFilter, BloomFilter};
    pub use crate::hash::{HashDigest, Murmur3f};
}
