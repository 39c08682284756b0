//! Streaming MurmurHash3 x64-128 ("Murmur3f")
//!
//! A reusable, incremental implementation of the 128-bit x64 variant of
//! MurmurHash3. Input can be fed in any number of `include` calls and the
//! hasher can be reseeded for reuse instead of reallocated.
//!
//! Note: each `include` call mixes its own leftover tail bytes immediately
//! rather than buffering them for the next call. Splitting input at a
//! boundary that is not a multiple of 16 bytes therefore produces a
//! different digest than hashing the concatenated input in one call. See
//! [`Murmur3f::include`] for details.

use crate::hash::HashDigest;

// Block-mix constants defined by the MurmurHash3 algorithm.
const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

// Finalization (avalanche) multipliers.
const FMIX_M1: u64 = 0xff51_afd7_ed55_8ccd;
const FMIX_M2: u64 = 0xc4ce_b9fe_1a85_ec53;

/// Incremental MurmurHash3 x64-128 hasher.
///
/// Holds 128 bits of mixing state plus a running count of bytes consumed.
/// One instance corresponds to one hashing session; call [`Murmur3f::reset`]
/// to start a new session without reallocating.
///
/// This is a non-cryptographic hash: fast and well-distributed, but with no
/// collision or preimage resistance. Not safe for concurrent use from
/// multiple threads without external synchronization.
///
/// # Example
///
/// ```
/// use bloomhash::Murmur3f;
///
/// let mut hasher = Murmur3f::new();
/// let digest = hasher.include(b"hello").hash();
/// assert_eq!(digest.to_hex().len(), 32);
/// ```
#[derive(Debug, Clone)]
pub struct Murmur3f {
    h1: u64,
    h2: u64,
    len: u64,
}

impl Murmur3f {
    /// Create a hasher with the default seed of 0.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create a hasher with an explicit seed.
    ///
    /// The same input hashed under different seeds yields unrelated digests.
    pub fn with_seed(seed: u32) -> Self {
        let mut hasher = Self { h1: 0, h2: 0, len: 0 };
        hasher.reset(seed);
        hasher
    }

    /// Reset the hasher to a fresh session with the given seed.
    ///
    /// May be called at any point, including mid-stream. Afterwards the
    /// hasher behaves identically to a newly constructed instance with the
    /// same seed; no state survives the reset.
    pub fn reset(&mut self, seed: u32) {
        self.h1 = u64::from(seed);
        self.h2 = u64::from(seed);
        self.len = 0;
    }

    /// Feed bytes into the hash computation. Chainable.
    ///
    /// Every full 16-byte block of `input` is mixed into the state; the
    /// remaining 0-15 bytes are mixed immediately as a partial block. Because
    /// partial blocks are not carried over to the next call,
    /// `include(a).include(b)` only equals `include(a + b)` when `a.len()`
    /// is a multiple of 16. Callers that need concatenation-equivalence must
    /// buffer to 16-byte boundaries themselves.
    ///
    /// Empty input is valid and leaves the state unchanged.
    pub fn include(&mut self, input: &[u8]) -> &mut Self {
        let mut blocks = input.chunks_exact(16);
        for block in &mut blocks {
            let k1 = u64::from_le_bytes(block[0..8].try_into().unwrap());
            let k2 = u64::from_le_bytes(block[8..16].try_into().unwrap());
            self.bmix64(k1, k2);
            self.len += 16;
        }

        let tail = blocks.remainder();
        debug_assert!(tail.len() < 16, "tail length out of range: {}", tail.len());
        self.len += tail.len() as u64;

        if !tail.is_empty() {
            // Accumulate the tail little-endian: bytes 0-7 into k1, 8-14
            // into k2. Tail bytes get only the XOR, never the full block
            // rotate/add step.
            let mut k1 = 0u64;
            let mut k2 = 0u64;
            for (offset, &byte) in tail.iter().enumerate() {
                if offset < 8 {
                    k1 |= u64::from(byte) << (8 * offset);
                } else {
                    k2 |= u64::from(byte) << (8 * (offset - 8));
                }
            }
            self.h1 ^= mix_k1(k1);
            self.h2 ^= mix_k2(k2);
        }

        self
    }

    /// Finalize the current state into a 128-bit digest.
    ///
    /// Does not consume or mutate the hasher: calling `hash` repeatedly
    /// returns the same digest until the next `include` or `reset`.
    pub fn hash(&self) -> HashDigest {
        let mut h1 = self.h1 ^ self.len;
        let mut h2 = self.h2 ^ self.len;

        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);

        h1 = fmix64(h1);
        h2 = fmix64(h2);

        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);

        HashDigest::new(h1, h2)
    }

    /// Total bytes consumed by `include` since the last reset.
    pub fn bytes_included(&self) -> u64 {
        self.len
    }

    /// Mix one full 16-byte block into the state.
    fn bmix64(&mut self, k1: u64, k2: u64) {
        self.h1 ^= mix_k1(k1);
        self.h1 = self.h1.rotate_left(27);
        self.h1 = self.h1.wrapping_add(self.h2);
        self.h1 = self.h1.wrapping_mul(5).wrapping_add(0x52dc_e729);

        self.h2 ^= mix_k2(k2);
        self.h2 = self.h2.rotate_left(31);
        self.h2 = self.h2.wrapping_add(self.h1);
        self.h2 = self.h2.wrapping_mul(5).wrapping_add(0x3849_5ab5);
    }
}

impl Default for Murmur3f {
    fn default() -> Self {
        Self::new()
    }
}

impl std::hash::Hasher for Murmur3f {
    fn write(&mut self, bytes: &[u8]) {
        self.include(bytes);
    }

    fn finish(&self) -> u64 {
        self.hash().h1()
    }
}

fn mix_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

fn mix_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(FMIX_M1);
    k ^= k >> 33;
    k = k.wrapping_mul(FMIX_M2);
    k ^= k >> 33;
    k
}
