//! Standard Bloom filter implementation
//!
//! A space-efficient probabilistic data structure for membership testing.
//! Elements are byte sequences; each one maps to `k` bit positions derived
//! from two base hashes, see [`DoubleHasher`].

use crate::bitstore::BitStore;
use crate::hash::{DoubleHasher, HashFunction};
use crate::utils::optimal_parameters;
use crate::{BloomError, Result};
use tracing::debug;

/// A Bloom filter over byte-sequence elements
///
/// `check` takes `&self` and may run concurrently; `add` and `reset` take
/// `&mut self`, so sharing a filter between writers needs external locking.
#[derive(Debug)]
pub struct BloomFilter {
    /// Bit array storing the filter data
    bits: BitStore,
    /// Base hash pair the positions are derived from
    hasher: DoubleHasher,
    /// Number of positions per element (k)
    num_positions: u32,
}

impl BloomFilter {
    /// Create a Bloom filter from a list of base hash functions
    ///
    /// # Arguments
    /// * `size` - Number of bits, a power of two in `8..=2^31`
    /// * `k` - Number of positions derived per element
    /// * `hash_functions` - Exactly two distinct hash functions
    pub fn new(size: u32, k: u32, hash_functions: Vec<Box<dyn HashFunction>>) -> Result<Self> {
        let hasher = DoubleHasher::from_functions(hash_functions)?;
        Self::with_hasher(size, k, hasher)
    }

    /// Create a Bloom filter from a statically known pair of hash functions
    pub fn with_hash_functions<H1, H2>(size: u32, k: u32, first: H1, second: H2) -> Result<Self>
    where
        H1: HashFunction + 'static,
        H2: HashFunction + 'static,
    {
        Self::with_hasher(size, k, DoubleHasher::new(first, second))
    }

    /// Create a Bloom filter hashing with 64-bit FNV-1 and FNV-1a
    pub fn with_fnv(size: u32, k: u32) -> Result<Self> {
        Self::with_hasher(size, k, DoubleHasher::fnv())
    }

    /// Create an FNV Bloom filter sized for `expected_elements` at roughly
    /// `target_fpr` false positives
    pub fn with_accuracy(expected_elements: u64, target_fpr: f64) -> Result<Self> {
        let params = optimal_parameters(expected_elements, target_fpr)?;
        Self::with_fnv(params.num_bits, params.num_positions)
    }

    /// Create a Bloom filter from an already paired hasher
    pub fn with_hasher(size: u32, k: u32, hasher: DoubleHasher) -> Result<Self> {
        if k == 0 {
            return Err(BloomError::InvalidPositionCount(k));
        }
        let bits = BitStore::new(size)?;
        let [first, second] = hasher.names();
        debug!(size, k, first = %first, second = %second, "created bloom filter");

        Ok(BloomFilter {
            bits,
            hasher,
            num_positions: k,
        })
    }

    /// Add an element to the filter
    pub fn add(&mut self, element: &[u8]) {
        let size = self.bits.len();
        for position in self.hasher.positions(element, self.num_positions, size) {
            self.bits.set_bit(position);
        }
    }

    /// Check if an element might be in the filter
    /// Returns true if the element might be present (with possible false positives)
    /// Returns false if the element is definitely not present
    pub fn check(&self, element: &[u8]) -> bool {
        let size = self.bits.len();
        self.hasher
            .positions(element, self.num_positions, size)
            .all(|position| self.bits.get_bit(position))
    }

    /// Add an element, returning whether it was possibly present beforehand
    pub fn check_and_add(&mut self, element: &[u8]) -> bool {
        let size = self.bits.len();
        let mut was_present = true;
        for position in self.hasher.positions(element, self.num_positions, size) {
            was_present &= self.bits.get_bit(position);
            self.bits.set_bit(position);
        }
        was_present
    }

    /// Clear all bits in the filter
    pub fn reset(&mut self) {
        self.bits.clear_all();
        debug!(size = self.bits.len(), "reset bloom filter");
    }

    /// Get the size of the bit array (m)
    pub fn num_bits(&self) -> u32 {
        self.bits.len()
    }

    /// Get the number of positions per element (k)
    pub fn num_positions(&self) -> u32 {
        self.num_positions
    }

    /// Get the number of bits currently set
    pub fn num_bits_set(&self) -> u64 {
        self.bits.count_ones()
    }

    /// Check if no bit is set
    pub fn is_empty(&self) -> bool {
        self.num_bits_set() == 0
    }

    /// Get the current load factor (fraction of bits set)
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set() as f64 / self.num_bits() as f64
    }

    /// Get the false positive rate implied by the current fill
    pub fn estimated_fpr(&self) -> f64 {
        self.load_factor().powi(self.num_positions as i32)
    }

    /// Get statistics about the filter
    pub fn stats(&self) -> BloomStats {
        BloomStats {
            num_bits: self.num_bits(),
            num_positions: self.num_positions,
            bits_set: self.num_bits_set(),
            load_factor: self.load_factor(),
            estimated_fpr: self.estimated_fpr(),
        }
    }
}

/// Statistics about a Bloom filter
#[derive(Debug, Clone, PartialEq)]
pub struct BloomStats {
    pub num_bits: u32,
    pub num_positions: u32,
    pub bits_set: u64,
    pub load_factor: f64,
    pub estimated_fpr: f64,
}

impl std::fmt::Display for BloomStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "BloomFilter Stats:\n\
             - Size: {} bits\n\
             - Positions per element: {}\n\
             - Bits set: {}\n\
             - Load factor: {:.3}\n\
             - Estimated FPR: {:.6}",
            self.num_bits, self.num_positions, self.bits_set, self.load_factor, self.estimated_fpr
        )
    }
}
