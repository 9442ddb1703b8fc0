//! Plain-data filter configuration.
//!
//! [`FilterConfig`] is the form a service keeps in its own config file. With
//! the `serde` feature it deserializes from any serde format; missing fields
//! fall back to the defaults (10 000 items at 1 %).
//!
//! ```
//! use atombloom::builder::FilterConfig;
//!
//! let config = FilterConfig {
//!     expected_items: 100,
//!     false_positive_rate: 0.1,
//! };
//!
//! let params = config.validate().unwrap();
//! assert_eq!(params.m(), 480);
//!
//! let filter = config.build_lock_free().unwrap();
//! assert_eq!(filter.k(), 4);
//! ```

use crate::core::params::FilterParams;
use crate::error::Result;
use crate::filters::{GuardedBloomFilter, LockFreeBloomFilter};

/// Default expected item count.
pub const DEFAULT_EXPECTED_ITEMS: usize = 10_000;

/// Default target false positive rate.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// Sizing inputs for a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterConfig {
    /// Number of keys the filter should hold at the target rate.
    pub expected_items: usize,

    /// Target false positive rate, in (0, 1).
    pub false_positive_rate: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            expected_items: DEFAULT_EXPECTED_ITEMS,
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
        }
    }
}

impl FilterConfig {
    /// Check the rate and compute `(m, k)`.
    ///
    /// # Errors
    ///
    /// [`AtomBloomError::FalsePositiveRateOutOfBounds`](crate::AtomBloomError::FalsePositiveRateOutOfBounds)
    /// if the rate is not in (0, 1).
    pub fn validate(&self) -> Result<FilterParams> {
        FilterParams::for_capacity(self.expected_items, self.false_positive_rate)
    }

    /// Build a [`LockFreeBloomFilter`] from this configuration.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn build_lock_free(&self) -> Result<LockFreeBloomFilter> {
        LockFreeBloomFilter::new(self.expected_items, self.false_positive_rate)
    }

    /// Build a [`GuardedBloomFilter`] from this configuration.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn build_guarded(&self) -> Result<GuardedBloomFilter> {
        GuardedBloomFilter::new(self.expected_items, self.false_positive_rate)
    }
}
