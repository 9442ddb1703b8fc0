//! Lock-guarded Bloom filter.
//!
//! [`GuardedBloomFilter`] keeps its bits in plain `u32` words behind a
//! `parking_lot::RwLock`. Sizing, hashing and offsets are identical to
//! [`LockFreeBloomFilter`](crate::LockFreeBloomFilter), so both filters answer
//! the same way after the same sequence of inserts.
//!
//! # Locking
//!
//! - `test` - shared read lock for all `k` probes
//! - `add` - exclusive write lock for all `k` probes
//! - `test_and_add` - exclusive write lock for the whole check-and-set
//!
//! Hashing happens before the lock is taken, so the critical section is only
//! the `k` word reads or writes.
//!
//! Because `test_and_add` holds the write lock across both the reads and the
//! writes, it is linearizable: among threads racing `test_and_add(x)` for a
//! new key, exactly one sees `false`. `test` also sees either all or none of a
//! concurrent `add`'s bits.
//!
//! ```
//! use atombloom::GuardedBloomFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let filter = Arc::new(GuardedBloomFilter::new(1000, 0.01).unwrap());
//!
//! let handles: Vec<_> = (0..8)
//!     .map(|_| {
//!         let f = Arc::clone(&filter);
//!         thread::spawn(move || f.test_and_add(b"job-17"))
//!     })
//!     .collect();
//!
//! let first_sightings = handles
//!     .into_iter()
//!     .map(|h| h.join().unwrap())
//!     .filter(|seen| !seen)
//!     .count();
//!
//! assert_eq!(first_sightings, 1);
//! ```

#![allow(clippy::cast_precision_loss)]

use crate::core::filter::Filter;
use crate::core::params::{FilterParams, WORD_BITS};
use crate::error::Result;
use crate::hash::HashKernel;
use parking_lot::RwLock;

/// Bit words plus insert count, guarded together.
#[derive(Debug, Clone)]
struct Guarded {
    words: Vec<u32>,
    count: u64,
}

impl Guarded {
    #[inline]
    fn get(&self, offset: usize) -> bool {
        self.words[offset / WORD_BITS] & (1u32 << (offset % WORD_BITS)) != 0
    }

    #[inline]
    fn set(&mut self, offset: usize) {
        self.words[offset / WORD_BITS] |= 1u32 << (offset % WORD_BITS);
    }
}

/// Bloom filter serialized by a reader-writer lock.
#[derive(Debug)]
pub struct GuardedBloomFilter {
    state: RwLock<Guarded>,
    params: FilterParams,
    kernel: HashKernel,
    expected_items: usize,
    target_fp_rate: Option<f64>,
}

impl GuardedBloomFilter {
    /// Create a filter sized for `expected_items` keys at false positive rate
    /// `fp_rate`.
    ///
    /// # Errors
    ///
    /// Same as [`LockFreeBloomFilter::new`](crate::LockFreeBloomFilter::new).
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
        tracing::debug!(
            m = params.m(),
            k = params.k(),
            words = params.words(),
            expected_items,
            target_fp_rate,
            "created guarded bloom filter"
        );

        Self {
            state: RwLock::new(Guarded {
                words: vec![0; params.words()],
                count: 0,
            }),
            params,
            kernel,
            expected_items,
            target_fp_rate,
        }
    }

    /// Number of addressable bits (m).
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.params.m()
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
    pub fn test(&self, key: &[u8]) -> bool {
        let mut probes = self.kernel.probes(key, self.params.k(), self.params.m());
        let state = self.state.read();
        let present = probes.all(|offset| state.get(offset));

        #[cfg(feature = "trace")]
        tracing::trace!(key_len = key.len(), present, "test");

        present
    }

    /// Set all `k` probe bits of `key` and return `self` for chaining.
    pub fn add(&self, key: &[u8]) -> &Self {
        let probes = self.kernel.probes(key, self.params.k(), self.params.m());

        {
            let mut state = self.state.write();
            for offset in probes {
                state.set(offset);
            }
            state.count += 1;
        }

        #[cfg(feature = "trace")]
        tracing::trace!(key_len = key.len(), "add");

        self
    }

    /// Insert `key` and report whether it was present beforehand, atomically
    /// with respect to every other operation on this filter.
    pub fn test_and_add(&self, key: &[u8]) -> bool {
        let probes = self.kernel.probes(key, self.params.k(), self.params.m());
        let mut member = true;

        {
            let mut state = self.state.write();
            for offset in probes {
                if !state.get(offset) {
                    member = false;
                }
                state.set(offset);
            }
            if !member {
                state.count += 1;
            }
        }

        #[cfg(feature = "trace")]
        tracing::trace!(key_len = key.len(), member, "test_and_add");

        member
    }

    /// Approximate number of insertions, counted like
    /// [`LockFreeBloomFilter::count`](crate::LockFreeBloomFilter::count).
    #[must_use]
    pub fn count(&self) -> u64 {
        self.state.read().count
    }

    /// Number of bits currently set.
    #[must_use]
    pub fn count_set_bits(&self) -> usize {
        self.state
            .read()
            .words
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
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

    /// Current false positive rate estimated as `fill_ratio^k`.
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
        self.params.words() * std::mem::size_of::<u32>() + std::mem::size_of::<Self>()
    }

    /// Copy of the backing words, spare word included.
    #[must_use]
    pub fn raw_words(&self) -> Vec<u32> {
        self.state.read().words.clone()
    }
}

impl Filter for GuardedBloomFilter {
    fn test(&self, key: &[u8]) -> bool {
        GuardedBloomFilter::test(self, key)
    }

    fn add(&self, key: &[u8]) -> &Self {
        GuardedBloomFilter::add(self, key)
    }

    fn test_and_add(&self, key: &[u8]) -> bool {
        GuardedBloomFilter::test_and_add(self, key)
    }

    fn capacity(&self) -> usize {
        self.params.m()
    }

    fn k(&self) -> usize {
        self.params.k()
    }
}

impl Clone for GuardedBloomFilter {
    fn clone(&self) -> Self {
        Self {
            state: RwLock::new(self.state.read().clone()),
            params: self.params,
            kernel: self.kernel.clone(),
            expected_items: self.expected_items,
            target_fp_rate: self.target_fp_rate,
        }
    }
}
