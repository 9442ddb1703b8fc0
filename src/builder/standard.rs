//! Type-state builder for Bloom filters.
//!
//! # Type-State Pattern
//!
//! Required parameters are enforced at compile time. The builder moves
//! through three states and only `Complete` can build:
//!
//! ```text
//! Initial ──.expected_items()──► WithItems ──.false_positive_rate()──► Complete
//!                                                                        │
//!                                    .params() / .build_lock_free() / .build_guarded()
//! ```
//!
//! # Examples
//!
//! ## Minimal Configuration
//!
//! ```
//! use atombloom::builder::BloomFilterBuilder;
//!
//! let filter = BloomFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .build_lock_free()
//!     .unwrap();
//!
//! assert_eq!(filter.k(), 7);
//! ```
//!
//! ## Smaller Hasher Pool
//!
//! ```
//! use atombloom::builder::BloomFilterBuilder;
//!
//! let filter = BloomFilterBuilder::new()
//!     .hasher_pool_size(4)
//!     .expected_items(500)
//!     .false_positive_rate(0.001)
//!     .build_guarded()
//!     .unwrap();
//!
//! assert_eq!(filter.capacity(), 7189);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use atombloom::builder::BloomFilterBuilder;
//!
//! let result = BloomFilterBuilder::new()
//!     .expected_items(1000)
//!     .false_positive_rate(1.5)
//!     .build_lock_free();
//!
//! assert!(result.is_err());
//! ```

use crate::core::params::FilterParams;
use crate::error::Result;
use crate::filters::{GuardedBloomFilter, LockFreeBloomFilter};
use crate::hash::{HashKernel, DEFAULT_MAX_IDLE};
use std::marker::PhantomData;

/// Type-state marker: no parameters set.
#[derive(Debug)]
pub struct Initial;

/// Type-state marker: item count set.
#[derive(Debug)]
pub struct WithItems;

/// Type-state marker: all required parameters set.
#[derive(Debug)]
pub struct Complete;

/// Builder for [`LockFreeBloomFilter`] and [`GuardedBloomFilter`].
#[derive(Debug)]
pub struct BloomFilterBuilder<State> {
    expected_items: usize,
    fp_rate: f64,
    max_idle_hashers: usize,
    _state: PhantomData<State>,
}

impl BloomFilterBuilder<Initial> {
    /// Create a builder with no parameters set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_items: 0,
            fp_rate: 0.0,
            max_idle_hashers: DEFAULT_MAX_IDLE,
            _state: PhantomData,
        }
    }

    /// Set the expected number of keys. Transitions to `WithItems`.
    ///
    /// `0` is accepted and sizes the filter at its minimum capacity.
    #[must_use]
    pub fn expected_items(self, items: usize) -> BloomFilterBuilder<WithItems> {
        BloomFilterBuilder {
            expected_items: items,
            fp_rate: self.fp_rate,
            max_idle_hashers: self.max_idle_hashers,
            _state: PhantomData,
        }
    }
}

impl Default for BloomFilterBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}

impl BloomFilterBuilder<WithItems> {
    /// Set the target false positive rate. Transitions to `Complete`.
    ///
    /// The rate is checked when the filter is built.
    #[must_use]
    pub fn false_positive_rate(self, fp_rate: f64) -> BloomFilterBuilder<Complete> {
        BloomFilterBuilder {
            expected_items: self.expected_items,
            fp_rate,
            max_idle_hashers: self.max_idle_hashers,
            _state: PhantomData,
        }
    }
}

impl<State> BloomFilterBuilder<State> {
    /// Keep at most `max_idle` hashers in the filter's pool (default 64).
    ///
    /// This is a bound, not a reservation; any value is accepted.
    #[must_use]
    pub fn hasher_pool_size(mut self, max_idle: usize) -> Self {
        self.max_idle_hashers = max_idle;
        self
    }
}

impl BloomFilterBuilder<Complete> {
    /// Validate and compute `(m, k)` without allocating a filter.
    ///
    /// # Errors
    ///
    /// [`AtomBloomError::FalsePositiveRateOutOfBounds`](crate::AtomBloomError::FalsePositiveRateOutOfBounds)
    /// if the rate is not in (0, 1).
    ///
    /// ```
    /// use atombloom::builder::BloomFilterBuilder;
    ///
    /// let params = BloomFilterBuilder::new()
    ///     .expected_items(100)
    ///     .false_positive_rate(0.1)
    ///     .params()
    ///     .unwrap();
    ///
    /// assert_eq!((params.m(), params.k()), (480, 4));
    /// ```
    pub fn params(&self) -> Result<FilterParams> {
        FilterParams::for_capacity(self.expected_items, self.fp_rate)
    }

    /// Build a [`LockFreeBloomFilter`].
    ///
    /// # Errors
    ///
    /// See [`params`](Self::params).
    pub fn build_lock_free(self) -> Result<LockFreeBloomFilter> {
        let params = self.params()?;
        Ok(LockFreeBloomFilter::build(
            params,
            self.expected_items,
            Some(self.fp_rate),
            self.kernel(),
        ))
    }

    /// Build a [`GuardedBloomFilter`].
    ///
    /// # Errors
    ///
    /// See [`params`](Self::params).
    pub fn build_guarded(self) -> Result<GuardedBloomFilter> {
        let params = self.params()?;
        Ok(GuardedBloomFilter::build(
            params,
            self.expected_items,
            Some(self.fp_rate),
            self.kernel(),
        ))
    }

    fn kernel(&self) -> HashKernel {
        HashKernel::with_max_idle(self.max_idle_hashers)
    }
}
