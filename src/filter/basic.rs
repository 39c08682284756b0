//! Fixed-size two-probe Bloom filter

use crate::error::{BloomHashError, Result};
use crate::filter::BitVector;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Width of the bit array, fixed at 64 Ki bits.
const FILTER_BITS: usize = 1 << 16;

/// Probes per element.
const PROBES: u32 = 2;

/// A basic Bloom filter with a fixed 2^16-bit array and two probes per
/// element.
///
/// Both probe positions come from a single run of the standard library's
/// [`DefaultHasher`]: the low 16 bits and the next 16 bits of the 64-bit
/// output. This keeps insertion and lookup cheap, at the cost of a false
/// positive rate that rises quickly as the filter fills. For tunable
/// precision use [`BloomFilter`](crate::BloomFilter) instead.
///
/// False positives are possible; false negatives are not. Not thread-safe
/// without external synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicBloomFilter {
    bits: BitVector,
}

impl BasicBloomFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self {
            bits: BitVector::new(FILTER_BITS),
        }
    }

    /// Derive the two probe positions for a value.
    fn probe_pair<T: Hash + ?Sized>(value: &T) -> (usize, usize) {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        let hash = hasher.finish();
        ((hash & 0xffff) as usize, ((hash >> 16) & 0xffff) as usize)
    }

    /// Add a value to the filter.
    pub fn put<T: Hash + ?Sized>(&mut self, value: &T) {
        let (first, second) = Self::probe_pair(value);
        self.bits.set(first);
        self.bits.set(second);
    }

    /// Test whether a value might have been added.
    ///
    /// Returns `false` only if the value was definitely never added; `true`
    /// means it was added or collides with values that were.
    pub fn might_contain<T: Hash + ?Sized>(&self, value: &T) -> bool {
        let (first, second) = Self::probe_pair(value);
        self.bits.get(first) && self.bits.get(second)
    }

    /// Expected false positive probability at the current fill level.
    ///
    /// Computed as `(1 - e^(-k*n/m))^k` with k probes, m bits, and the
    /// approximate element count n. An empty filter reports exactly 0.
    pub fn expected_fpp(&self) -> f64 {
        let m = self.bits.len() as f64;
        let n = self.approximate_element_count() as f64;
        let k = f64::from(PROBES);
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Fraction of bits currently set, in `[0, 1]`.
    ///
    /// A saturation measure: the closer to 1, the higher the false positive
    /// probability.
    pub fn utilization(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Approximate count of distinct values added.
    ///
    /// Derived from the fill level as `-m/k * ln((m - ones)/m)`. The
    /// estimate saturates to `u64::MAX` when every bit is set.
    pub fn approximate_element_count(&self) -> u64 {
        let m = self.bits.len() as f64;
        let unset = (self.bits.len() - self.bits.count_ones()) as f64;
        (-m * (unset / m).ln() / f64::from(PROBES)) as u64
    }

    /// Encode the filter state to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| BloomHashError::Encode(e.to_string()))
    }

    /// Decode a filter from bytes produced by [`BasicBloomFilter::to_bytes`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let filter: Self =
            bincode::deserialize(data).map_err(|e| BloomHashError::Decode(e.to_string()))?;
        if !filter.bits.is_well_formed() || filter.bits.len() != FILTER_BITS {
            return Err(BloomHashError::corrupt("bit array does not match filter geometry"));
        }
        Ok(filter)
    }
}

impl Default for BasicBloomFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_contains_nothing() {
        let filter = BasicBloomFilter::new();
        // No bits set, so membership is guaranteed false.
        assert!(!filter.might_contain("42"));
        assert!(!filter.might_contain(&12345u64));
        assert_eq!(filter.utilization(), 0.0);
        assert_eq!(filter.approximate_element_count(), 0);
    }

    #[test]
    fn test_empty_filter_fpp_is_zero() {
        let filter = BasicBloomFilter::new();
        assert_eq!(filter.expected_fpp(), 0.0);
    }

    #[test]
    fn test_presence_after_put() {
        let values = ["42", "Hello world!", "Ahoj", "↓←☺"];
        let mut filter = BasicBloomFilter::new();
        for value in values {
            filter.put(value);
            assert!(filter.might_contain(value));
        }
    }

    #[test]
    fn test_estimates_grow_with_inserts() {
        let mut filter = BasicBloomFilter::new();
        for i in 0..1000u32 {
            filter.put(&i);
        }

        let estimate = filter.approximate_element_count();
        assert!(
            (900..=1100).contains(&estimate),
            "estimate {estimate} far from 1000 inserts"
        );
        assert!(filter.utilization() > 0.0 && filter.utilization() < 0.1);
        assert!(filter.expected_fpp() > 0.0 && filter.expected_fpp() < 0.01);
    }

    #[test]
    fn test_byte_round_trip() {
        let mut filter = BasicBloomFilter::new();
        filter.put("persisted");
        filter.put(&7u8);

        let bytes = filter.to_bytes().unwrap();
        let restored = BasicBloomFilter::from_bytes(&bytes).unwrap();

        assert!(restored.might_contain("persisted"));
        assert!(restored.might_contain(&7u8));
        assert_eq!(
            restored.approximate_element_count(),
            filter.approximate_element_count()
        );
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(BasicBloomFilter::from_bytes(&[0x01, 0x02, 0x03]).is_err());
    }
}
