//! Fixed-size packed bit storage backing the Bloom filter.

use crate::{BloomError, Result};
use bit_vec::BitVec;

/// Smallest bit array accepted by [`BitStore::new`]
pub const MIN_SIZE: u32 = 8;

/// Largest bit array accepted by [`BitStore::new`]. Positions are computed
/// with 32-bit arithmetic, so this is the largest power of two below `u32::MAX`.
pub const MAX_SIZE: u32 = 1 << 31;

/// A fixed-size array of bits, packed into machine words.
///
/// Indices are not range-checked beyond what `bit-vec` asserts: passing an
/// index `>= len()` to [`set_bit`](Self::set_bit) or [`get_bit`](Self::get_bit)
/// panics. The filter only ever produces indices reduced modulo the size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStore {
    bits: BitVec,
}

impl BitStore {
    /// Allocate `size` zeroed bits.
    ///
    /// Fails with [`BloomError::InvalidSize`] unless `size` is a power of two
    /// in `8..=2^31`.
    pub fn new(size: u32) -> Result<Self> {
        validate_size(size)?;
        Ok(BitStore {
            bits: BitVec::from_elem(size as usize, false),
        })
    }

    /// Set bit `index` to 1.
    #[inline]
    pub fn set_bit(&mut self, index: u32) {
        self.bits.set(index as usize, true);
    }

    /// Whether bit `index` is 1.
    #[inline]
    pub fn get_bit(&self, index: u32) -> bool {
        self.bits[index as usize]
    }

    /// Reset every bit to 0.
    pub fn clear_all(&mut self) {
        self.bits.clear();
    }

    /// Number of bits in the store
    pub fn len(&self) -> u32 {
        self.bits.len() as u32
    }

    /// Always false: a store holds at least [`MIN_SIZE`] bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of bits currently set to 1
    pub fn count_ones(&self) -> u64 {
        self.bits
            .storage()
            .iter()
            .map(|word| word.count_ones() as u64)
            .sum()
    }
}

fn validate_size(size: u32) -> Result<()> {
    if size < MIN_SIZE || size > MAX_SIZE || !size.is_power_of_two() {
        return Err(BloomError::InvalidSize(size as u64));
    }
    Ok(())
}
