//! Sizing utility for Bloom filters.
//!
//! Converts an expected element count `n` and a target false positive rate `ε`
//! into the two numbers a filter is built from:
//!
//! - `m = ⌈n × ln(ε) / ln(1 / 2^ln2)⌉ = ⌈-n × ln(ε) / (ln 2)²⌉` (bits in filter)
//! - `k = ⌈log₂(1/ε)⌉` (hash probes per key)
//!
//! `k` depends on the rate alone, so two filters built for the same rate probe
//! the same number of bits regardless of their size. Both values are clamped to
//! at least 1, which keeps the offset math `(h1 + h2·i) mod m` defined even for
//! a filter sized for zero elements.
//!
//! Expected false positive rate after `n` insertions:
//! - `p = (1 - e^(-kn/m))^k`
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors"
//! - Kirsch & Mitzenmacher (2006). "Less Hashing, Same Performance: Building a Better Bloom Filter"

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{AtomBloomError, Result};
use std::f64::consts::LN_2;

/// (ln 2)² ≈ 0.4804530139182014
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Width of one Bit Store word in bits.
pub const WORD_BITS: usize = u32::BITS as usize;

/// Smallest `m` a filter can have.
pub const MIN_FILTER_SIZE: usize = 1;

/// Largest `m` a filter can have.
///
/// Anything above this is an accidental request rather than a real workload.
pub const MAX_FILTER_SIZE: usize = usize::MAX / 2;

/// Smallest `k` a filter can have.
pub const MIN_HASH_FUNCTIONS: usize = 1;

/// Optimal number of bits for `n` elements at false positive rate `fp_rate`.
///
/// Implements `m = ⌈-n × ln(ε) / (ln 2)²⌉`, clamped to at least
/// [`MIN_FILTER_SIZE`] and saturating at `usize::MAX`.
///
/// `fp_rate` is expected to lie in (0, 1); use [`FilterParams::for_capacity`]
/// when the rate comes from user input and needs validating.
///
/// # Examples
///
/// ```
/// use atombloom::core::params::optimal_m;
///
/// assert_eq!(optimal_m(100, 0.1), 480);
/// assert_eq!(optimal_m(1000, 0.01), 9586);
/// assert_eq!(optimal_m(0, 0.01), 1); // never zero
/// ```
#[must_use]
pub fn optimal_m(n: usize, fp_rate: f64) -> usize {
    let m = (-(n as f64) * fp_rate.ln() / LN2_SQUARED).ceil();

    if m >= usize::MAX as f64 {
        return usize::MAX;
    }

    // `as` saturates NaN and negatives to 0, which the clamp below lifts.
    (m as usize).max(MIN_FILTER_SIZE)
}

/// Optimal number of hash probes for false positive rate `fp_rate`.
///
/// Implements `k = ⌈log₂(1/ε)⌉`, clamped to at least [`MIN_HASH_FUNCTIONS`].
///
/// # Examples
///
/// ```
/// use atombloom::core::params::optimal_k;
///
/// assert_eq!(optimal_k(0.1), 4);
/// assert_eq!(optimal_k(0.01), 7);
/// assert_eq!(optimal_k(0.9), 1);
/// ```
#[must_use]
pub fn optimal_k(fp_rate: f64) -> usize {
    let k = (1.0 / fp_rate).log2().ceil();
    (k as usize).max(MIN_HASH_FUNCTIONS)
}

/// Expected false positive rate after inserting `n` distinct elements into a
/// filter of `m` bits probed `k` times per key.
///
/// Implements `p = (1 - e^(-kn/m))^k`. An empty filter has rate `0.0`.
///
/// # Errors
///
/// [`AtomBloomError::InvalidParameters`] if `m` or `k` is zero.
///
/// # Examples
///
/// ```
/// use atombloom::core::params::expected_fp_rate;
///
/// let fp = expected_fp_rate(9586, 1000, 7).unwrap();
/// assert!((fp - 0.01).abs() < 0.001);
/// ```
pub fn expected_fp_rate(m: usize, n: usize, k: usize) -> Result<f64> {
    if m == 0 {
        return Err(AtomBloomError::invalid_parameters("m must be at least 1"));
    }
    if k == 0 {
        return Err(AtomBloomError::invalid_parameters("k must be at least 1"));
    }
    if n == 0 {
        return Ok(0.0);
    }

    let k_f64 = k as f64;
    let exponent = -(k_f64 * n as f64) / m as f64;
    let fp_rate = (1.0 - exponent.exp()).powf(k_f64);

    Ok(fp_rate.clamp(0.0, 1.0))
}

/// Reject any rate outside the open interval (0, 1), NaN included.
///
/// # Errors
///
/// [`AtomBloomError::FalsePositiveRateOutOfBounds`] for an unusable rate.
pub fn validate_fp_rate(fp_rate: f64) -> Result<()> {
    if fp_rate.is_finite() && fp_rate > 0.0 && fp_rate < 1.0 {
        Ok(())
    } else {
        Err(AtomBloomError::fp_rate_out_of_bounds(fp_rate))
    }
}

/// Validated `(m, k)` pair a filter is constructed from.
///
/// # Examples
///
/// ```
/// use atombloom::core::params::FilterParams;
///
/// let params = FilterParams::for_capacity(100, 0.1).unwrap();
/// assert_eq!(params.m(), 480);
/// assert_eq!(params.k(), 4);
/// assert_eq!(params.words(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    m: usize,
    k: usize,
}

impl FilterParams {
    /// Size a filter for `expected_items` elements at rate `fp_rate`.
    ///
    /// `expected_items == 0` is accepted and yields the minimum capacity.
    ///
    /// # Errors
    ///
    /// - [`AtomBloomError::FalsePositiveRateOutOfBounds`] if `fp_rate` is not in (0, 1)
    /// - [`AtomBloomError::CapacityOverflow`] if the bit array cannot be allocated
    pub fn for_capacity(expected_items: usize, fp_rate: f64) -> Result<Self> {
        validate_fp_rate(fp_rate)?;

        if expected_items == 0 {
            tracing::debug!(
                fp_rate,
                "sizing for zero expected items, using minimum capacity"
            );
        }

        Self::checked(optimal_m(expected_items, fp_rate), optimal_k(fp_rate))
    }

    /// Use explicit `m` and `k`, bypassing the sizing formulas.
    ///
    /// # Errors
    ///
    /// - [`AtomBloomError::InvalidParameters`] if `m == 0` or `k == 0`
    /// - [`AtomBloomError::CapacityOverflow`] if the bit array cannot be allocated
    pub fn with_params(m: usize, k: usize) -> Result<Self> {
        if m < MIN_FILTER_SIZE {
            return Err(AtomBloomError::invalid_parameters(format!(
                "m={m} must be at least {MIN_FILTER_SIZE}"
            )));
        }
        if k < MIN_HASH_FUNCTIONS {
            return Err(AtomBloomError::invalid_parameters(format!(
                "k={k} must be at least {MIN_HASH_FUNCTIONS}"
            )));
        }

        Self::checked(m, k)
    }

    fn checked(m: usize, k: usize) -> Result<Self> {
        if m > MAX_FILTER_SIZE {
            return Err(AtomBloomError::capacity_overflow(m as f64));
        }

        let bytes = words_for(m).checked_mul(std::mem::size_of::<u32>());
        match bytes {
            Some(bytes) if bytes <= isize::MAX as usize => Ok(Self { m, k }),
            _ => Err(AtomBloomError::capacity_overflow(m as f64)),
        }
    }

    /// Total addressable bits.
    #[must_use]
    #[inline]
    pub const fn m(&self) -> usize {
        self.m
    }

    /// Hash probes per key.
    #[must_use]
    #[inline]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Number of 32-bit words backing `m` bits: `⌈m/32⌉ + 1`.
    #[must_use]
    #[inline]
    pub const fn words(&self) -> usize {
        words_for(self.m)
    }
}

#[inline]
const fn words_for(m: usize) -> usize {
    m.div_ceil(WORD_BITS) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ln2_squared_constant() {
        let expected = 0.480_453_013_918_201_4;
        assert!((LN2_SQUARED - expected).abs() < 1e-10);
    }

    #[test]
    fn test_reference_sizing() {
        assert_eq!(optimal_m(100, 0.1), 480);
        assert_eq!(optimal_k(0.1), 4);
    }

    #[test]
    fn test_optimal_m_various_rates() {
        let cases = [(1000, 0.1, 4793), (1000, 0.01, 9586), (1000, 0.001, 14378)];

        for (n, fp, expected) in cases {
            assert_eq!(optimal_m(n, fp), expected, "n={n}, fp={fp}");
        }
    }

    #[test]
    fn test_optimal_m_never_zero() {
        assert_eq!(optimal_m(0, 0.01), 1);
        assert_eq!(optimal_m(0, 0.5), 1);
        // ~0.00000014 bits per element rounds up to one bit
        assert_eq!(optimal_m(1, 0.999_999_9), 1);
    }

    #[test]
    fn test_optimal_m_saturates() {
        assert_eq!(optimal_m(usize::MAX, 1e-300), usize::MAX);
    }

    #[test]
    fn test_optimal_k_various_rates() {
        assert_eq!(optimal_k(0.5), 1);
        assert_eq!(optimal_k(0.25), 2);
        assert_eq!(optimal_k(0.01), 7);
        assert_eq!(optimal_k(0.001), 10);
        assert_eq!(optimal_k(0.9), 1);
    }

    #[test]
    fn test_expected_fp_rate_matches_target() {
        let m = optimal_m(1000, 0.01);
        let fp = expected_fp_rate(m, 1000, optimal_k(0.01)).unwrap();
        assert!((fp - 0.01).abs() / 0.01 < 0.15, "got {fp}");
    }

    #[test]
    fn test_expected_fp_rate_empty_filter() {
        assert_eq!(expected_fp_rate(1000, 0, 7).unwrap(), 0.0);
    }

    #[test]
    fn test_expected_fp_rate_invalid() {
        assert!(expected_fp_rate(0, 10, 7).is_err());
        assert!(expected_fp_rate(1000, 10, 0).is_err());
    }

    #[test]
    fn test_validate_fp_rate() {
        assert!(validate_fp_rate(0.01).is_ok());
        assert!(validate_fp_rate(0.5).is_ok());
        for bad in [
            0.0,
            1.0,
            -0.1,
            1.5,
            f64::NAN,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ] {
            assert!(
                matches!(
                    validate_fp_rate(bad),
                    Err(AtomBloomError::FalsePositiveRateOutOfBounds { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_for_capacity_zero_items_clamps() {
        let params = FilterParams::for_capacity(0, 0.01).unwrap();
        assert_eq!(params.m(), 1);
        assert_eq!(params.k(), 7);
        assert_eq!(params.words(), 2);
    }

    #[test]
    fn test_for_capacity_rejects_bad_rate() {
        assert!(FilterParams::for_capacity(100, 0.0).is_err());
        assert!(FilterParams::for_capacity(100, 1.0).is_err());
    }

    #[test]
    fn test_for_capacity_overflow() {
        let result = FilterParams::for_capacity(usize::MAX, 1e-300);
        assert!(matches!(
            result,
            Err(AtomBloomError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn test_with_params() {
        let params = FilterParams::with_params(1000, 5).unwrap();
        assert_eq!((params.m(), params.k()), (1000, 5));

        assert!(FilterParams::with_params(0, 5).is_err());
        assert!(FilterParams::with_params(1000, 0).is_err());
        assert!(matches!(
            FilterParams::with_params(usize::MAX, 3),
            Err(AtomBloomError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn test_words() {
        assert_eq!(FilterParams::with_params(1, 1).unwrap().words(), 2);
        assert_eq!(FilterParams::with_params(32, 1).unwrap().words(), 2);
        assert_eq!(FilterParams::with_params(33, 1).unwrap().words(), 3);
        assert_eq!(FilterParams::with_params(480, 1).unwrap().words(), 16);
    }
}
