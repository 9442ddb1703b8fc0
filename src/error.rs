//! Error types for atombloom.
//!
//! Only construction can fail. Once a filter exists, `test`, `add` and
//! `test_and_add` are total over every byte string, so the error surface is
//! limited to sizing and configuration.
//!
//! # Error Propagation
//!
//! ```
//! use atombloom::{AtomBloomError, Result};
//! use atombloom::core::params::FilterParams;
//!
//! fn sizing(n: usize, fp: f64) -> Result<(usize, usize)> {
//!     let params = FilterParams::for_capacity(n, fp)?;
//!     Ok((params.m(), params.k()))
//! }
//!
//! assert_eq!(sizing(100, 0.1).unwrap(), (480, 4));
//! assert!(matches!(
//!     sizing(100, 1.5),
//!     Err(AtomBloomError::FalsePositiveRateOutOfBounds { .. })
//! ));
//! ```

/// Result type alias for atombloom operations.
pub type Result<T> = std::result::Result<T, AtomBloomError>;

/// Errors that can occur while sizing or configuring a filter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AtomBloomError {
    /// False positive rate outside the open interval (0, 1), or not finite.
    ///
    /// - ε = 0 would require infinite memory
    /// - ε = 1 accepts everything
    /// - NaN and infinities are rejected outright
    #[error("False positive rate {fp_rate} is out of bounds. Must be in range (0, 1).")]
    FalsePositiveRateOutOfBounds {
        /// The rejected rate.
        fp_rate: f64,
    },

    /// Explicit filter parameters that cannot describe a working filter.
    #[error("Invalid Bloom filter parameters: {message}.")]
    InvalidParameters {
        /// What was wrong with them.
        message: String,
    },

    /// The requested sizing needs more memory than the address space allows.
    #[error("Filter of {bits} bits exceeds addressable memory.")]
    CapacityOverflow {
        /// Number of bits that was requested.
        bits: f64,
    },
}

impl AtomBloomError {
    /// Create a `FalsePositiveRateOutOfBounds` error.
    #[must_use]
    pub fn fp_rate_out_of_bounds(fp_rate: f64) -> Self {
        Self::FalsePositiveRateOutOfBounds { fp_rate }
    }

    /// Create an `InvalidParameters` error with a formatted message.
    ///
    /// ```
    /// use atombloom::AtomBloomError;
    ///
    /// let err = AtomBloomError::invalid_parameters(format!("k={} must be at least 1", 0));
    /// assert!(err.to_string().contains("k=0"));
    /// ```
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create a `CapacityOverflow` error.
    #[must_use]
    pub fn capacity_overflow(bits: f64) -> Self {
        Self::CapacityOverflow { bits }
    }
}
