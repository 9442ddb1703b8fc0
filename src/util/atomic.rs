//! Cache-line aligned atomic counter.
//!
//! Filters keep an approximate insert count next to the hot bit array. Every
//! `add` bumps it, so the counter lives on its own cache line to keep those
//! increments from invalidating the line holding the filter's other fields.

use std::sync::atomic::{AtomicU64, Ordering};

/// Cache line size assumed for alignment.
pub const CACHE_LINE_SIZE: usize = 64;

/// Relaxed atomic counter occupying a full cache line.
///
/// All operations use `Ordering::Relaxed`. The value is a hint: it never
/// synchronizes with the bit array, and a reader may see it lag behind bits
/// that are already visible.
///
/// ```
/// use atombloom::util::AtomicCounter;
///
/// let counter = AtomicCounter::new(0);
/// counter.increment();
/// assert_eq!(counter.fetch_increment(), 1);
/// assert_eq!(counter.get(), 2);
/// ```
#[repr(align(64))]
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicU64,
}

impl AtomicCounter {
    /// Create a counter holding `initial`.
    #[must_use]
    pub const fn new(initial: u64) -> Self {
        Self {
            value: AtomicU64::new(initial),
        }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Add 1 and return the previous value.
    #[inline]
    pub fn fetch_increment(&self) -> u64 {
        self.value.fetch_add(1, Ordering::Relaxed)
    }

    /// Add 1.
    #[inline]
    pub fn increment(&self) {
        self.fetch_increment();
    }
}

impl Clone for AtomicCounter {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}
