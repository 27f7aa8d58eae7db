//! False positive estimates and parameter sizing for Bloom filters
//!
//! `n` is always the caller-tracked count of distinct elements added; the
//! filter itself does not count insertions.

use crate::bitstore::{MAX_SIZE, MIN_SIZE};
use crate::{BloomError, Result};
use tracing::warn;

/// Upper bound on the suggested number of positions per element
const MAX_POSITIONS: u32 = 32;

/// Expected false positive rate of a filter with `m` bits and `k` positions
/// per element after `n` distinct insertions:
///
/// `f = (1 - (1 - 1/m)^(k*n))^k`
///
/// `m` must be positive.
pub fn false_positive_rate(m: u64, k: u32, n: u64) -> f64 {
    let m = m as f64;
    let k = k as f64;
    let n = n as f64;
    let zero_prob = (1.0 - 1.0 / m).powf(k * n);
    (1.0 - zero_prob).powf(k)
}

/// Large-`m` approximation of [`false_positive_rate`]:
///
/// `f ≈ (1 - e^(-k*n/m))^k`
pub fn false_positive_rate_approx(m: u64, k: u32, n: u64) -> f64 {
    let m = m as f64;
    let k = k as f64;
    let n = n as f64;
    (1.0 - (-k * n / m).exp()).powf(k)
}

/// Suggested Bloom filter parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BloomParameters {
    pub num_bits: u32,
    pub num_positions: u32,
    pub expected_fpr: f64,
}

/// Calculate Bloom filter parameters for `expected_elements` insertions at
/// roughly `target_fpr` false positives.
///
/// The bit count is rounded up to a power of two, clamped to `8..=2^31`.
pub fn optimal_parameters(expected_elements: u64, target_fpr: f64) -> Result<BloomParameters> {
    if !(target_fpr > 0.0 && target_fpr < 1.0) {
        return Err(BloomError::InvalidParameter(format!(
            "Target false positive rate must be in (0, 1), got {}",
            target_fpr
        )));
    }
    if expected_elements == 0 {
        return Ok(BloomParameters {
            num_bits: MIN_SIZE,
            num_positions: 1,
            expected_fpr: 0.0,
        });
    }

    let n = expected_elements as f64;

    // m = -n * ln(p) / (ln(2))^2
    let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;
    let bits_needed = (-n * target_fpr.ln() / ln2_squared).ceil();

    let num_bits = if bits_needed > MAX_SIZE as f64 {
        warn!(
            expected_elements,
            target_fpr, "requested accuracy exceeds the largest filter, clamping size"
        );
        MAX_SIZE
    } else {
        (bits_needed as u32).max(MIN_SIZE).next_power_of_two()
    };

    // k = (m/n) * ln(2)
    let positions = ((num_bits as f64 / n) * std::f64::consts::LN_2).round() as u32;
    let num_positions = positions.clamp(1, MAX_POSITIONS);

    Ok(BloomParameters {
        num_bits,
        num_positions,
        expected_fpr: false_positive_rate_approx(num_bits as u64, num_positions, expected_elements),
    })
}
