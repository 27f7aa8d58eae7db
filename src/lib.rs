//! # Double Bloom
//!
//! A compact Bloom filter answering "has this element possibly been added?"
//! with no false negatives and a tunable false positive rate.
//!
//! All `k` bit positions of an element are derived from just two base hashes
//! (Kirsch-Mitzenmacher double hashing): `p_i = (h1 + i * h2) mod m`.
//!
//! ```
//! use double_bloom::BloomFilter;
//!
//! let mut bloom = BloomFilter::with_fnv(1024, 4).unwrap();
//! bloom.add(b"A stormy ocean");
//!
//! assert!(bloom.check(b"A stormy ocean"));
//! assert!(!bloom.check(b"A rickety boat"));
//! ```

pub mod bitstore;
pub mod bloom;
pub mod hash;
pub mod utils;

pub use bitstore::BitStore;
pub use bloom::{BloomFilter, BloomStats};
pub use hash::{BuildHasherFunction, DoubleHasher, Fnv1, Fnv1a, HashFunction};
pub use utils::{
    false_positive_rate, false_positive_rate_approx, optimal_parameters, BloomParameters,
};

/// Common error types for the library
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BloomError {
    #[error("Invalid size {0}: bit array size must be a power of two between 8 and 2^31")]
    InvalidSize(u64),

    #[error("Invalid hash function count {0}: exactly two distinct hash functions are required")]
    InvalidHashFunctionCount(usize),

    #[error("Invalid position count {0}: at least one position per element is required")]
    InvalidPositionCount(u32),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, BloomError>;
