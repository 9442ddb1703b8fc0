//! The capability set shared by every filter variant.
//!
//! Both [`LockFreeBloomFilter`](crate::LockFreeBloomFilter) and
//! [`GuardedBloomFilter`](crate::GuardedBloomFilter) implement [`Filter`], so
//! code that only needs membership operations can be written once:
//!
//! ```
//! use atombloom::{Filter, GuardedBloomFilter, LockFreeBloomFilter};
//!
//! fn seen_before<F: Filter>(filter: &F, event_id: &str) -> bool {
//!     filter.test_and_add(event_id.as_bytes())
//! }
//!
//! let lock_free = LockFreeBloomFilter::new(1000, 0.01).unwrap();
//! let guarded = GuardedBloomFilter::new(1000, 0.01).unwrap();
//!
//! assert!(!seen_before(&lock_free, "evt-1"));
//! assert!(seen_before(&lock_free, "evt-1"));
//! assert!(!seen_before(&guarded, "evt-1"));
//! assert!(seen_before(&guarded, "evt-1"));
//! ```
//!
//! # Guarantees
//!
//! - **No false negatives**: once `add(x)` has returned, `test(x)` is `true`
//!   forever after, whatever other threads do.
//! - **Monotonic**: bits are never cleared; there is no removal.
//! - **Fixed shape**: `capacity()` and `k()` never change after construction.
//!
//! `test` is not atomic across its `k` probes. Racing an in-flight `add` of
//! the same key, it may see none, some or all of that key's bits.
//!
//! The trait takes `&self` everywhere and requires `Send + Sync`, so a filter
//! is shared across threads through a plain `Arc` without an outer lock.

/// Approximate set membership over byte-string keys.
pub trait Filter: Send + Sync {
    /// `false` if `key` was definitely never added, `true` if it probably was.
    ///
    /// Stops at the first unset probe bit.
    #[must_use]
    fn test(&self, key: &[u8]) -> bool;

    /// Set all `k` probe bits of `key`.
    ///
    /// Never fails. Returns `self` for chaining:
    ///
    /// ```
    /// use atombloom::{Filter, LockFreeBloomFilter};
    ///
    /// let filter = LockFreeBloomFilter::new(100, 0.01).unwrap();
    /// filter.add(b"a").add(b"b").add(b"c");
    /// assert!(filter.test(b"b"));
    /// ```
    fn add(&self, key: &[u8]) -> &Self;

    /// Report whether `key` appeared present, then insert it, in one hash pass.
    ///
    /// Unlike [`test`](Filter::test) this visits every probe: each bit is read
    /// and then set even after an unset bit has been seen. The return value is
    /// the membership state observed before this call's own insertion.
    fn test_and_add(&self, key: &[u8]) -> bool;

    /// Number of addressable bits (m).
    #[must_use]
    fn capacity(&self) -> usize;

    /// Number of probes per key (k).
    #[must_use]
    fn k(&self) -> usize;

    /// Add every key in `keys`.
    fn add_batch<K: AsRef<[u8]>>(&self, keys: &[K]) {
        for key in keys {
            self.add(key.as_ref());
        }
    }

    /// Test every key in `keys`, in order.
    #[must_use]
    fn test_batch<K: AsRef<[u8]>>(&self, keys: &[K]) -> Vec<bool> {
        keys.iter().map(|key| self.test(key.as_ref())).collect()
    }

    /// `true` if every key in `keys` tests positive.
    #[must_use]
    fn test_all<K: AsRef<[u8]>>(&self, keys: &[K]) -> bool {
        keys.iter().all(|key| self.test(key.as_ref()))
    }

    /// `true` if any key in `keys` tests positive.
    #[must_use]
    fn test_any<K: AsRef<[u8]>>(&self, keys: &[K]) -> bool {
        keys.iter().any(|key| self.test(key.as_ref()))
    }
}
