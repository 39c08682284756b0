//! Murmur3-backed Bloom filter with configurable geometry

use crate::error::{BloomHashError, Result};
use crate::filter::BitVector;
use crate::hash::{HashDigest, Murmur3f};
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::path::Path;

/// A Bloom filter driven by 128-bit Murmur3 digests.
///
/// Each value is hashed once; the digest's two 64-bit halves seed a double
/// hashing scheme that derives all probe positions as `h1 + i*h2 mod m`.
/// This gives k independent-enough probes from a single hash computation,
/// per Kirsch and Mitzenmacher.
///
/// The filter can be sized explicitly with [`BloomFilter::new`] or from an
/// expected element count and target false positive probability with
/// [`BloomFilter::with_capacity`].
///
/// # Example
///
/// ```
/// use bloomhash::BloomFilter;
///
/// let mut filter = BloomFilter::with_capacity(1000, 0.01).unwrap();
/// filter.insert("alpha");
/// assert!(filter.contains("alpha"));
/// assert!(!filter.contains("omega"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloomFilter {
    bits: BitVector,
    hashes: u32,
    seed: u32,
}

impl BloomFilter {
    /// Create a filter with explicit geometry: `bits` array width, `hashes`
    /// probes per element, and the seed passed to the underlying hasher.
    pub fn new(bits: usize, hashes: u32, seed: u32) -> Result<Self> {
        if bits == 0 {
            return Err(BloomHashError::invalid_parameter("filter must have at least one bit"));
        }
        if hashes == 0 {
            return Err(BloomHashError::invalid_parameter(
                "filter must use at least one hash per element",
            ));
        }
        tracing::debug!("creating bloom filter: {} bits, {} hashes, seed {}", bits, hashes, seed);
        Ok(Self {
            bits: BitVector::new(bits),
            hashes,
            seed,
        })
    }

    /// Create a filter sized for `expected_items` elements at the target
    /// false positive probability `fpp` (exclusive range 0 to 1).
    ///
    /// Uses the standard optimal sizing: `m = -n*ln(p) / ln(2)^2` bits and
    /// `k = (m/n)*ln(2)` hashes, rounded.
    pub fn with_capacity(expected_items: usize, fpp: f64) -> Result<Self> {
        if expected_items == 0 {
            return Err(BloomHashError::invalid_parameter(
                "expected item count must be at least 1",
            ));
        }
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(BloomHashError::invalid_parameter(format!(
                "false positive probability must be in (0, 1), got {fpp}"
            )));
        }

        let n = expected_items as f64;
        let ln2 = std::f64::consts::LN_2;
        let bits = (-(n * fpp.ln()) / (ln2 * ln2)).ceil() as usize;
        let hashes = ((bits as f64 / n) * ln2).round().max(1.0) as u32;

        tracing::debug!(
            "sizing bloom filter for {} items at fpp {}: {} bits, {} hashes",
            expected_items,
            fpp,
            bits,
            hashes
        );
        Self::new(bits, hashes, 0)
    }

    /// Add a value to the filter.
    pub fn insert<T: Hash + ?Sized>(&mut self, value: &T) {
        let digest = self.digest_of(value);
        self.set_probes(digest);
    }

    /// Test whether a value might have been added.
    ///
    /// `false` is definitive; `true` carries the filter's false positive
    /// probability.
    pub fn contains<T: Hash + ?Sized>(&self, value: &T) -> bool {
        let digest = self.digest_of(value);
        self.check_probes(digest)
    }

    /// Add raw bytes to the filter, hashing them directly.
    ///
    /// Unlike [`BloomFilter::insert`], this path does not go through
    /// `std::hash::Hash` and therefore produces identical probe positions
    /// on every platform.
    pub fn insert_bytes(&mut self, data: &[u8]) {
        let digest = Murmur3f::with_seed(self.seed).include(data).hash();
        self.set_probes(digest);
    }

    /// Test raw bytes for membership; the counterpart of
    /// [`BloomFilter::insert_bytes`].
    pub fn contains_bytes(&self, data: &[u8]) -> bool {
        let digest = Murmur3f::with_seed(self.seed).include(data).hash();
        self.check_probes(digest)
    }

    /// Expected false positive probability at the current fill level, as
    /// `(1 - e^(-k*n/m))^k` with the approximate element count n.
    pub fn expected_fpp(&self) -> f64 {
        let m = self.bits.len() as f64;
        let n = self.approximate_element_count() as f64;
        let k = f64::from(self.hashes);
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Fraction of bits currently set, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Approximate count of distinct values added, derived from the fill
    /// level as `-m/k * ln((m - ones)/m)`. Saturates to `u64::MAX` when
    /// every bit is set.
    pub fn approximate_element_count(&self) -> u64 {
        let m = self.bits.len() as f64;
        let unset = (self.bits.len() - self.bits.count_ones()) as f64;
        (-m * (unset / m).ln() / f64::from(self.hashes)) as u64
    }

    /// Width of the bit array.
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Probes per element.
    pub fn hash_count(&self) -> u32 {
        self.hashes
    }

    /// Seed passed to the underlying hasher.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Encode the filter state to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| BloomHashError::Encode(e.to_string()))
    }

    /// Decode a filter from bytes produced by [`BloomFilter::to_bytes`].
    ///
    /// The decoded state is validated: degenerate geometry or a bit array
    /// that does not match its declared width is rejected as corrupt.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let filter: Self =
            bincode::deserialize(data).map_err(|e| BloomHashError::Decode(e.to_string()))?;
        filter.validate()?;
        Ok(filter)
    }

    /// Write the filter state to `path` as a human-readable JSON snapshot.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BloomHashError::Encode(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| BloomHashError::snapshot(path, e))?;
        tracing::debug!("saved bloom filter snapshot to {}", path.display());
        Ok(())
    }

    /// Load a filter from a JSON snapshot written by [`BloomFilter::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let json =
            std::fs::read_to_string(path).map_err(|e| BloomHashError::snapshot(path, e))?;
        let filter: Self =
            serde_json::from_str(&json).map_err(|e| BloomHashError::Decode(e.to_string()))?;
        filter.validate()?;
        tracing::debug!("loaded bloom filter snapshot from {}", path.display());
        Ok(filter)
    }

    /// Stream a value into a freshly seeded hasher and finalize.
    fn digest_of<T: Hash + ?Sized>(&self, value: &T) -> HashDigest {
        let mut hasher = Murmur3f::with_seed(self.seed);
        value.hash(&mut hasher);
        hasher.hash()
    }

    /// Probe positions for a digest: `h1 + i*h2 mod m` for i in 0..k.
    fn probe_positions(&self, digest: HashDigest) -> impl Iterator<Item = usize> + '_ {
        let width = self.bits.len() as u64;
        let (h1, h2) = (digest.h1(), digest.h2());
        (0..u64::from(self.hashes))
            .map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % width) as usize)
    }

    fn set_probes(&mut self, digest: HashDigest) {
        let positions: Vec<usize> = self.probe_positions(digest).collect();
        for position in positions {
            self.bits.set(position);
        }
    }

    fn check_probes(&self, digest: HashDigest) -> bool {
        let mut positions = self.probe_positions(digest);
        positions.all(|position| self.bits.get(position))
    }

    fn validate(&self) -> Result<()> {
        if self.bits.is_empty() || self.hashes == 0 {
            return Err(BloomHashError::corrupt("degenerate filter geometry"));
        }
        if !self.bits.is_well_formed() {
            return Err(BloomHashError::corrupt("bit array does not match its declared width"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rejects_degenerate_geometry() {
        assert!(BloomFilter::new(0, 3, 0).is_err());
        assert!(BloomFilter::new(1024, 0, 0).is_err());
        assert!(BloomFilter::with_capacity(0, 0.01).is_err());
        assert!(BloomFilter::with_capacity(100, 0.0).is_err());
        assert!(BloomFilter::with_capacity(100, 1.0).is_err());
        assert!(BloomFilter::with_capacity(100, f64::NAN).is_err());
    }

    #[test]
    fn test_capacity_sizing() {
        // Classic result: 1% fpp needs just under 10 bits per element.
        let filter = BloomFilter::with_capacity(1000, 0.01).unwrap();
        assert!((9000..=10000).contains(&filter.bit_count()));
        assert_eq!(filter.hash_count(), 7);
        assert_eq!(filter.seed(), 0);
    }

    #[test]
    fn test_empty_filter() {
        let filter = BloomFilter::with_capacity(100, 0.01).unwrap();
        assert!(!filter.contains("anything"));
        assert!(!filter.contains_bytes(b"anything"));
        assert_eq!(filter.expected_fpp(), 0.0);
        assert_eq!(filter.utilization(), 0.0);
        assert_eq!(filter.approximate_element_count(), 0);
    }

    #[test]
    fn test_presence_after_insert() {
        let mut filter = BloomFilter::with_capacity(1000, 0.01).unwrap();
        for value in ["42", "Hello world!", "Ahoj", "↓←☺"] {
            filter.insert(value);
            assert!(filter.contains(value));
        }
        for i in 0..100u32 {
            filter.insert(&i);
        }
        for i in 0..100u32 {
            assert!(filter.contains(&i));
        }
    }

    #[test]
    fn test_bytes_api_membership() {
        let mut filter = BloomFilter::with_capacity(100, 0.01).unwrap();
        filter.insert_bytes(b"raw value");
        assert!(filter.contains_bytes(b"raw value"));
        assert!(!filter.contains_bytes(b"other value"));
    }

    #[test]
    fn test_explicit_seed_survives_round_trip() {
        let mut filter = BloomFilter::new(1 << 14, 4, 99).unwrap();
        filter.insert_bytes(b"seeded");

        let restored = BloomFilter::from_bytes(&filter.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.seed(), 99);
        assert!(restored.contains_bytes(b"seeded"));
    }

    #[test]
    fn test_estimates_track_inserts() {
        let mut filter = BloomFilter::with_capacity(1000, 0.01).unwrap();
        for i in 0..500u32 {
            filter.insert(&i);
        }

        let estimate = filter.approximate_element_count();
        assert!(
            (425..=575).contains(&estimate),
            "estimate {estimate} far from 500 inserts"
        );
        assert!(filter.utilization() > 0.0 && filter.utilization() < 1.0);

        // Half full relative to design capacity: fpp should sit well below
        // the 1% design point.
        assert!(filter.expected_fpp() > 0.0);
        assert!(filter.expected_fpp() < 0.01);
    }

    #[test]
    fn test_observed_fpp_near_design_point() {
        let mut filter = BloomFilter::with_capacity(1000, 0.01).unwrap();
        for i in 0..1000u32 {
            filter.insert(&i);
        }

        let false_positives = (1000..11000u32).filter(|i| filter.contains(i)).count();
        let observed = false_positives as f64 / 10_000.0;
        assert!(observed < 0.03, "observed fpp {observed} too far above design 0.01");
    }

    #[test]
    fn test_byte_round_trip() {
        let mut filter = BloomFilter::with_capacity(200, 0.02).unwrap();
        filter.insert("kept");
        filter.insert_bytes(b"kept bytes");

        let bytes = filter.to_bytes().unwrap();
        let restored = BloomFilter::from_bytes(&bytes).unwrap();

        assert_eq!(restored.bit_count(), filter.bit_count());
        assert_eq!(restored.hash_count(), filter.hash_count());
        assert_eq!(restored.seed(), filter.seed());
        assert!(restored.contains("kept"));
        assert!(restored.contains_bytes(b"kept bytes"));
        assert!(!restored.contains("dropped"));
    }

    #[test]
    fn test_from_bytes_rejects_corrupt_state() {
        assert!(BloomFilter::from_bytes(&[0xff; 4]).is_err());

        // A structurally valid encoding with degenerate geometry must also
        // be rejected.
        let filter = BloomFilter::new(64, 2, 0).unwrap();
        let mut tampered = filter.clone();
        tampered.hashes = 0;
        let bytes = bincode::serialize(&tampered).unwrap();
        assert!(matches!(
            BloomFilter::from_bytes(&bytes),
            Err(BloomHashError::CorruptState(_))
        ));
    }

    #[test]
    fn test_snapshot_save_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filter.json");

        let mut filter = BloomFilter::with_capacity(100, 0.01).unwrap();
        filter.insert("snapshot me");
        filter.save(&path).unwrap();

        let restored = BloomFilter::load(&path).unwrap();
        assert!(restored.contains("snapshot me"));
        assert_eq!(restored.bit_count(), filter.bit_count());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = BloomFilter::load(&path).unwrap_err();
        assert_eq!(err.path().unwrap(), &path);
    }
}
