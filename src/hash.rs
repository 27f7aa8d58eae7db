//! Hash functions for Bloom filters
//!
//! Every element is hashed by exactly two base functions. The `k` bit
//! positions are then derived from the pair by double hashing,
//! `p_i = (x1 + i * x2) mod m`, so only two digests are computed per element.

use crate::{BloomError, Result};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Trait for the base hash functions used by the filter
///
/// Implementations are stateless: hashing the same bytes always yields the
/// same digest, whatever was hashed before.
pub trait HashFunction: Send + Sync {
    /// Hash a byte sequence to a 64-bit digest
    fn hash(&self, bytes: &[u8]) -> u64;

    /// Get a name/identifier for this hash function
    fn name(&self) -> String;
}

/// 64-bit FNV-1: multiply by the prime, then xor in each byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1;

impl HashFunction for Fnv1 {
    fn hash(&self, bytes: &[u8]) -> u64 {
        bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
            hash.wrapping_mul(FNV_PRIME) ^ byte as u64
        })
    }

    fn name(&self) -> String {
        "fnv1-64".to_string()
    }
}

/// 64-bit FNV-1a: xor in each byte, then multiply by the prime.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1a;

impl HashFunction for Fnv1a {
    fn hash(&self, bytes: &[u8]) -> u64 {
        let mut hasher = fnv::FnvHasher::default();
        hasher.write(bytes);
        hasher.finish()
    }

    fn name(&self) -> String {
        "fnv1a-64".to_string()
    }
}

/// Adapts any [`BuildHasher`] into a [`HashFunction`].
///
/// A fresh hasher is built for every call, so no state leaks between elements.
#[derive(Debug, Clone, Default)]
pub struct BuildHasherFunction<B> {
    builder: B,
}

impl<B: BuildHasher> BuildHasherFunction<B> {
    pub fn new(builder: B) -> Self {
        BuildHasherFunction { builder }
    }
}

impl<B: BuildHasher + Send + Sync> HashFunction for BuildHasherFunction<B> {
    fn hash(&self, bytes: &[u8]) -> u64 {
        let mut hasher = self.builder.build_hasher();
        hasher.write(bytes);
        hasher.finish()
    }

    fn name(&self) -> String {
        std::any::type_name::<B>().to_string()
    }
}

/// The pair of base hash functions and the position derivation built on them
pub struct DoubleHasher {
    first: Box<dyn HashFunction>,
    second: Box<dyn HashFunction>,
}

impl DoubleHasher {
    /// Pair two hash functions. They should be distinct algorithms, or at
    /// least produce statistically independent digests.
    pub fn new<H1, H2>(first: H1, second: H2) -> Self
    where
        H1: HashFunction + 'static,
        H2: HashFunction + 'static,
    {
        DoubleHasher {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Pair a list of hash functions, which must hold exactly two entries.
    pub fn from_functions(functions: Vec<Box<dyn HashFunction>>) -> Result<Self> {
        let [first, second]: [Box<dyn HashFunction>; 2] = functions
            .try_into()
            .map_err(|rejected: Vec<_>| BloomError::InvalidHashFunctionCount(rejected.len()))?;
        Ok(DoubleHasher { first, second })
    }

    /// FNV-1 and FNV-1a, 64-bit
    pub fn fnv() -> Self {
        DoubleHasher::new(Fnv1, Fnv1a)
    }

    /// The two 32-bit seeds of an element: the upper half of each digest.
    #[inline]
    pub fn seeds(&self, bytes: &[u8]) -> (u32, u32) {
        (
            (self.first.hash(bytes) >> 32) as u32,
            (self.second.hash(bytes) >> 32) as u32,
        )
    }

    /// Derive `k` positions in `0..size` for an element.
    ///
    /// `size` must be a power of two; the reduction is a mask.
    #[inline]
    pub fn positions(&self, bytes: &[u8], k: u32, size: u32) -> Positions {
        debug_assert!(size.is_power_of_two());
        let (x1, x2) = self.seeds(bytes);
        Positions {
            x1,
            x2,
            i: 0,
            k,
            mask: size - 1,
        }
    }

    /// Names of the two base functions
    pub fn names(&self) -> [String; 2] {
        [self.first.name(), self.second.name()]
    }
}

impl fmt::Debug for DoubleHasher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DoubleHasher")
            .field("first", &self.first.name())
            .field("second", &self.second.name())
            .finish()
    }
}

/// Iterator over the derived bit positions of one element
#[derive(Debug, Clone)]
pub struct Positions {
    x1: u32,
    x2: u32,
    i: u32,
    k: u32,
    mask: u32,
}

impl Iterator for Positions {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.i >= self.k {
            return None;
        }
        let position = self.x1.wrapping_add(self.i.wrapping_mul(self.x2)) & self.mask;
        self.i += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.k - self.i) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv_known_vectors() {
        // Reference values for the 64-bit FNV variants
        assert_eq!(Fnv1.hash(b""), 0xcbf29ce484222325);
        assert_eq!(Fnv1a.hash(b""), 0xcbf29ce484222325);
        assert_eq!(Fnv1.hash(b"a"), 0xaf63bd4c8601b7be);
        assert_eq!(Fnv1a.hash(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(Fnv1.hash(b"foobar"), 0x340d8765a4dda9c2);
        assert_eq!(Fnv1a.hash(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_hash_is_stateless() {
        let first = Fnv1a.hash(b"A towering wave");
        Fnv1a.hash(b"something else entirely");
        assert_eq!(Fnv1a.hash(b"A towering wave"), first);
    }

    #[test]
    fn test_build_hasher_function_matches_fnv1a() {
        let adapted = BuildHasherFunction::new(fnv::FnvBuildHasher::default());
        assert_eq!(adapted.hash(b"A rickety boat"), Fnv1a.hash(b"A rickety boat"));
        assert!(adapted.name().contains("Fnv"));
    }

    #[test]
    fn test_from_functions_requires_two() {
        let one: Vec<Box<dyn HashFunction>> = vec![Box::new(Fnv1)];
        let three: Vec<Box<dyn HashFunction>> =
            vec![Box::new(Fnv1), Box::new(Fnv1a), Box::new(Fnv1)];
        let two: Vec<Box<dyn HashFunction>> = vec![Box::new(Fnv1), Box::new(Fnv1a)];

        assert_eq!(
            DoubleHasher::from_functions(one).unwrap_err(),
            BloomError::InvalidHashFunctionCount(1)
        );
        assert_eq!(
            DoubleHasher::from_functions(three).unwrap_err(),
            BloomError::InvalidHashFunctionCount(3)
        );
        assert!(DoubleHasher::from_functions(Vec::new()).is_err());
        assert!(DoubleHasher::from_functions(two).is_ok());
    }

    #[test]
    fn test_seeds_take_upper_half() {
        let hasher = DoubleHasher::fnv();
        let (x1, x2) = hasher.seeds(b"a");
        assert_eq!(x1, 0xaf63bd4c);
        assert_eq!(x2, 0xaf63dc4c);
    }

    #[test]
    fn test_positions_follow_double_hashing() {
        let hasher = DoubleHasher::fnv();
        let (x1, x2) = hasher.seeds(b"A stormy ocean");

        let positions: Vec<u32> = hasher.positions(b"A stormy ocean", 6, 1024).collect();
        let expected: Vec<u32> = (0..6u32)
            .map(|i| x1.wrapping_add(i.wrapping_mul(x2)) % 1024)
            .collect();

        assert_eq!(positions, expected);
        assert!(positions.iter().all(|&p| p < 1024));
    }

    #[test]
    fn test_positions_len() {
        let hasher = DoubleHasher::fnv();
        let positions = hasher.positions(b"x", 5, 64);
        assert_eq!(positions.len(), 5);
        assert_eq!(hasher.positions(b"x", 0, 64).count(), 0);
    }

    #[test]
    fn test_debug_shows_names() {
        let debug = format!("{:?}", DoubleHasher::fnv());
        assert!(debug.contains("fnv1-64"));
        assert!(debug.contains("fnv1a-64"));
    }
}
