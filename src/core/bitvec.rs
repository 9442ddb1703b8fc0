//! Lock-free bit store over 32-bit atomic words.
//!
//! `AtomicBitVec` addresses `m` bits packed into `⌈m/32⌉ + 1` words of
//! `AtomicU32`. Every mutation goes through a single primitive, a
//! compare-and-swap retry loop on one word, so no update ever spans two words
//! and no lock is ever taken.
//!
//! # Thread Safety
//!
//! - `get`: one atomic load (`Ordering::Acquire`), never mutates
//! - `set`: load, OR in the mask, `compare_exchange_weak` (`AcqRel`), retry on failure
//!
//! Bits are only ever set, never cleared, so a concurrent `set` on another bit
//! of the same word can make our CAS fail but can never be lost: the retry
//! observes the fresher word and ORs our bit into it.
//!
//! # Memory Layout
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 31]
//! Word 1: [bit 32][bit 33]...[bit 63]
//! ...
//! Word ⌈m/32⌉: spare word, never addressed
//! ```
//!
//! # Examples
//!
//! ```
//! use atombloom::core::bitvec::AtomicBitVec;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let bv = Arc::new(AtomicBitVec::new(64));
//!
//! // Every thread targets a different bit of word 0.
//! let handles: Vec<_> = (0..32)
//!     .map(|bit| {
//!         let bv = Arc::clone(&bv);
//!         thread::spawn(move || bv.set(bit))
//!     })
//!     .collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(bv.count_ones(), 32);
//! ```

use crate::core::params::WORD_BITS;
use std::sync::atomic::{AtomicU32, Ordering};

/// Fixed-size bit array mutated exclusively through atomic read-modify-write.
#[derive(Debug)]
pub struct AtomicBitVec {
    words: Box<[AtomicU32]>,

    /// Number of addressable bits (m).
    len: usize,
}

impl AtomicBitVec {
    /// Create a zeroed bit vector addressing `num_bits` bits.
    ///
    /// Allocates `⌈num_bits/32⌉ + 1` words, so even `num_bits == 0` owns one
    /// word of storage.
    ///
    /// ```
    /// use atombloom::core::bitvec::AtomicBitVec;
    ///
    /// let bv = AtomicBitVec::new(480);
    /// assert_eq!(bv.len(), 480);
    /// assert_eq!(bv.num_words(), 16);
    /// assert_eq!(bv.count_ones(), 0);
    /// ```
    #[must_use]
    pub fn new(num_bits: usize) -> Self {
        let num_words = num_bits.div_ceil(WORD_BITS) + 1;
        let words = (0..num_words)
            .map(|_| AtomicU32::new(0))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            words,
            len: num_bits,
        }
    }

    /// Number of addressable bits.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` when no bit is addressable.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of backing 32-bit words, spare word included.
    #[must_use]
    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Read one bit with a single atomic load.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, matching slice indexing.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);

        // Acquire: pairs with the AcqRel CAS in `set`
        self.words[word].load(Ordering::Acquire) & mask != 0
    }

    /// Force one bit to 1.
    ///
    /// Loads the word, ORs in the mask and attempts a compare-and-swap from
    /// the loaded value. A failed CAS means another thread changed the word in
    /// between; the loop retries against the value it saw. Returns as soon as
    /// the bit is observed set, whether by this call or an earlier one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn set(&self, index: usize) {
        let (word, mask) = self.locate(index);
        let cell = &self.words[word];
        let mut current = cell.load(Ordering::Acquire);

        loop {
            if current & mask != 0 {
                return;
            }

            match cell.compare_exchange_weak(
                current,
                current | mask,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }

    #[inline]
    fn locate(&self, index: usize) -> (usize, u32) {
        assert!(
            index < self.len,
            "AtomicBitVec index out of bounds: index={} len={}",
            index,
            self.len
        );

        (index / WORD_BITS, 1u32 << (index % WORD_BITS))
    }

    /// Count set bits (population count over all words).
    ///
    /// Not a snapshot: words are read one at a time while writers may be active.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    /// Heap bytes held by the word array.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.words.len() * std::mem::size_of::<AtomicU32>()
    }

    /// Copy the current word values out.
    #[must_use]
    pub fn to_raw(&self) -> Vec<u32> {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Acquire))
            .collect()
    }
}

impl Clone for AtomicBitVec {
    /// Point-in-time copy, word by word.
    fn clone(&self) -> Self {
        let words = self
            .words
            .iter()
            .map(|w| AtomicU32::new(w.load(Ordering::Acquire)))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            words,
            len: self.len,
        }
    }
}
