//! Lock-free Bloom filter.
//!
//! [`LockFreeBloomFilter`] is the façade over the three building blocks:
//!
//! ```text
//! key ─► HashKernel ─► (h1, h2) ─► gᵢ = (h1 + i·h2) mod m ─► AtomicBitVec get/set
//! ```
//!
//! The key is hashed once per operation regardless of `k`.
//!
//! # Concurrency Model
//!
//! Every method takes `&self`; share the filter through an `Arc`, no outer
//! lock needed.
//!
//! - `test` - one `Acquire` load per probe, stops at the first unset bit
//! - `add` - one CAS retry loop per probe
//! - `test_and_add` - load then CAS per probe, all `k` probes always visited
//!
//! Concurrent `add`s on overlapping bits produce the union of every bit any
//! of them meant to set; OR is commutative and idempotent, so no ordering
//! between them is needed.
//!
//! The bit array is lock-free. Hashing is not quite: each operation pops a
//! hasher from the filter's [`HasherPool`](crate::hash::HasherPool) and
//! pushes it back, two short `parking_lot::Mutex` sections shared by every
//! thread using the filter. Neither is held while hashing or touching bits.
//! Under heavy write contention from many cores this pool lock, not the CAS
//! loops, is the first shared point to show up in profiles.
//!
//! ## Racing `test_and_add` on the same key
//!
//! Two threads calling `test_and_add(x)` at the same moment for a new key may
//! both read "not yet a member" and both return `false`. The key ends up
//! inserted either way (at-least-once insertion); the return value is a
//! snapshot taken while racing, not a linearizable check-and-set. Callers that
//! need exactly one `false` per key should use
//! [`GuardedBloomFilter`](crate::GuardedBloomFilter).
//!
//! # Examples
//!
//! ```
//! use atombloom::LockFreeBloomFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let filter = Arc::new(LockFreeBloomFilter::new(10_000, 0.01)?);
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|tid| {
//!         let f = Arc::clone(&filter);
//!         thread::spawn(move || {
//!             for i in 0..1000 {
//!                 f.add(format!("item-{tid}-{i}").as_bytes());
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert!(filter.test(b"item-0-42"));
//! assert!(filter.test(b"item-3-999"));
//! # Ok(())
//! # }
//! ```

#![allow(clippy::cast_precision_loss)]

use crate::core::bitvec::AtomicBitVec;
use crate::core::filter::Filter;
use crate::core::params::FilterParams;
use crate::error::Result;
use crate::hash::HashKernel;
use crate::util::AtomicCounter;
use std::fmt;

/// Bloom filter whose bits are set with per-word compare-and-swap.
pub struct LockFreeBloomFilter {
    bits: AtomicBitVec,
    params: FilterParams,
    kernel: HashKernel,

    /// Approximate number of insertions.
    count: AtomicCounter,

    expected_items: usize,
    target_fp_rate: Option<f64>,
}

impl LockFreeBloomFilter {
    /// Create a filter sized for `expected_items` keys at false positive rate
    /// `fp_rate`.
    ///
    /// `expected_items == 0` yields the minimum capacity (`m = 1`).
    ///
    /// # Errors
    ///
    /// - [`AtomBloomError::FalsePositiveRateOutOfBounds`](crate::AtomBloomError::FalsePositiveRateOutOfBounds)
    ///   if `fp_rate` is not in (0, 1)
    /// - [`AtomBloomError::CapacityOverflow`](crate::AtomBloomError::CapacityOverflow)
    ///   if the bit array cannot be allocated
    ///
    /// # Examples
    ///
    /// ```
    /// use atombloom::LockFreeBloomFilter;
    ///
    /// let filter = LockFreeBloomFilter::new(100, 0.1).unwrap();
    /// assert_eq!(filter.capacity(), 480);
    /// assert_eq!(filter.k(), 4);
    /// ```
    pub fn new(expected_items: usize, fp_rate: f64) -> Result<Self> {
        let params = FilterParams::for_capacity(expected_items, fp_rate)?;
        Ok(Self::build(params, expected_items, Some(fp_rate), HashKernel::new()))
    }

    /// Create a filter with explicit `m` bits and `k` probes.
    ///
    /// # Errors
    ///
    /// [`AtomBloomError::InvalidParameters`](crate::AtomBloomError::InvalidParameters)
    /// if `m` or `k` is zero.
    pub fn with_params(m: usize, k: usize) -> Result<Self> {
        Ok(Self::from_params(FilterParams::with_params(m, k)?))
    }

    /// Create a filter from already validated parameters.
    #[must_use]
    pub fn from_params(params: FilterParams) -> Self {
        Self::build(params, 0, None, HashKernel::new())
    }

    pub(crate) fn build(
        params: FilterParams,
        expected_items: usize,
        target_fp_rate: Option<f64>,
        kernel: HashKernel,
    ) -> Self {
        let bits = AtomicBitVec::new(params.m());

        tracing::debug!(
            m = params.m(),
            k = params.k(),
            words = bits.num_words(),
            expected_items,
            target_fp_rate,
            "created lock-free bloom filter"
        );

        Self {
            bits,
            params,
            kernel,
            count: AtomicCounter::new(0),
            expected_items,
            target_fp_rate,
        }
    }

    /// Number of addressable bits (m).
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Number of probes per key (k).
    #[must_use]
    #[inline]
    pub fn k(&self) -> usize {
        self.params.k()
    }

    /// The `(m, k)` this filter was built with.
    #[must_use]
    pub fn params(&self) -> FilterParams {
        self.params
    }

    /// `false` if `key` was definitely never added, `true` if it probably was.
    #[must_use]
    #[inline]
    pub fn test(&self, key: &[u8]) -> bool {
        let present = self
            .kernel
            .probes(key, self.params.k(), self.params.m())
            .all(|offset| self.bits.get(offset));

        #[cfg(feature = "trace")]
        tracing::trace!(key_len = key.len(), present, "test");

        present
    }

    /// Set all `k` probe bits of `key` and return `self` for chaining.
    #[inline]
    pub fn add(&self, key: &[u8]) -> &Self {
        for offset in self.kernel.probes(key, self.params.k(), self.params.m()) {
            self.bits.set(offset);
        }
        self.count.increment();

        #[cfg(feature = "trace")]
        tracing::trace!(key_len = key.len(), "add");

        self
    }

    /// Insert `key` and report whether it appeared present beforehand.
    ///
    /// Every probe is read, then set, with no early exit.
    ///
    /// ```
    /// use atombloom::LockFreeBloomFilter;
    ///
    /// let filter = LockFreeBloomFilter::new(100, 0.01).unwrap();
    /// assert!(!filter.test_and_add(b"a"));
    /// assert!(filter.test_and_add(b"a"));
    /// ```
    #[inline]
    pub fn test_and_add(&self, key: &[u8]) -> bool {
        let mut member = true;

        for offset in self.kernel.probes(key, self.params.k(), self.params.m()) {
            if !self.bits.get(offset) {
                member = false;
            }
            self.bits.set(offset);
        }

        if !member {
            self.count.increment();
        }

        #[cfg(feature = "trace")]
        tracing::trace!(key_len = key.len(), member, "test_and_add");

        member
    }

    /// Approximate number of insertions.
    ///
    /// Counts every `add` and every `test_and_add` that found the key absent.
    /// Repeated adds of one key are counted each time; concurrent updates may
    /// be observed late.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    /// Number of bits currently set.
    #[must_use]
    pub fn count_set_bits(&self) -> usize {
        self.bits.count_ones()
    }

    /// `true` when no bit is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count_set_bits() == 0
    }

    /// Fraction of bits set, in [0, 1].
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        self.count_set_bits() as f64 / self.capacity() as f64
    }

    /// Current false positive rate estimated from the fill ratio.
    ///
    /// A random absent key tests positive when all `k` of its probes land on
    /// set bits, so the estimate is `fill_ratio^k`.
    #[must_use]
    pub fn estimated_fp_rate(&self) -> f64 {
        self.fill_ratio().powf(self.params.k() as f64)
    }

    /// Element count the filter was sized for; `0` when built from explicit
    /// parameters.
    #[must_use]
    pub fn expected_items(&self) -> usize {
        self.expected_items
    }

    /// Rate the filter was sized for; `None` when built from explicit
    /// parameters.
    #[must_use]
    pub fn target_fp_rate(&self) -> Option<f64> {
        self.target_fp_rate
    }

    /// Heap and inline bytes held by the filter, hasher pool excluded.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.bits.memory_usage() + std::mem::size_of::<Self>()
    }

    /// Copy of the backing words, spare word included.
    #[must_use]
    pub fn raw_words(&self) -> Vec<u32> {
        self.bits.to_raw()
    }
}

impl Filter for LockFreeBloomFilter {
    #[inline]
    fn test(&self, key: &[u8]) -> bool {
        LockFreeBloomFilter::test(self, key)
    }

    #[inline]
    fn add(&self, key: &[u8]) -> &Self {
        LockFreeBloomFilter::add(self, key)
    }

    #[inline]
    fn test_and_add(&self, key: &[u8]) -> bool {
        LockFreeBloomFilter::test_and_add(self, key)
    }

    fn capacity(&self) -> usize {
        LockFreeBloomFilter::capacity(self)
    }

    fn k(&self) -> usize {
        self.params.k()
    }
}

impl Clone for LockFreeBloomFilter {
    /// Point-in-time copy of the bits. Adds racing the clone may or may not
    /// be included.
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            params: self.params,
            kernel: self.kernel.clone(),
            count: self.count.clone(),
            expected_items: self.expected_items,
            target_fp_rate: self.target_fp_rate,
        }
    }
}

impl fmt::Debug for LockFreeBloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockFreeBloomFilter")
            .field("m", &self.capacity())
            .field("k", &self.params.k())
            .field("count", &self.count())
            .field("expected_items", &self.expected_items)
            .field("target_fp_rate", &self.target_fp_rate)
            .finish()
    }
}
