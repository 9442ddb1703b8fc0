//! Probe position generation by double hashing.
//!
//! For k positions derived from two base hashes h₁ and h₂ (Kirsch & Mitzenmacher 2006):
//!
//! ```text
//! gᵢ(x) = (h₁(x) + i·h₂(x)) mod m,   i = 0, 1, ..., k-1
//! ```
//!
//! Both bases are 32-bit values widened to `u64`, so the sum only wraps once
//! `i` exceeds 2³², far beyond any realistic `k`. Positions are not
//! deduplicated; when `h₂ ≡ 0 (mod m)` all k probes land on the same bit,
//! which is harmless for both `set` and `get`.
//!
//! # References
//!
//! - Kirsch, A., & Mitzenmacher, M. (2006). "Less Hashing, Same Performance: Building a Better Bloom Filter"

#![allow(clippy::cast_possible_truncation)]

use super::kernel::HashPair;

/// Standard double hashing over a [`HashPair`].
///
/// ```
/// use atombloom::hash::{DoubleHashing, HashPair};
///
/// let pair = HashPair { h1: 10, h2: 7 };
/// let probes: Vec<usize> = DoubleHashing.probes(pair, 4, 20).collect();
/// assert_eq!(probes, vec![10, 17, 4, 11]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleHashing;

impl DoubleHashing {
    /// Lazily yield `k` bit positions in `[0, m)`.
    ///
    /// An empty range (`m == 0`) has no positions, so the iterator is empty.
    #[inline]
    pub fn probes(self, pair: HashPair, k: usize, m: usize) -> Probes {
        Probes {
            h1: u64::from(pair.h1),
            h2: u64::from(pair.h2),
            m: m as u64,
            i: 0,
            k: if m == 0 { 0 } else { k as u64 },
        }
    }
}

/// Iterator over the probe positions of one key.
#[derive(Debug, Clone)]
pub struct Probes {
    h1: u64,
    h2: u64,
    m: u64,
    i: u64,
    k: u64,
}

impl Iterator for Probes {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.i >= self.k {
            return None;
        }

        let hash = self.h1.wrapping_add(self.h2.wrapping_mul(self.i));
        self.i += 1;

        Some((hash % self.m) as usize)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.k - self.i) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Probes {}
