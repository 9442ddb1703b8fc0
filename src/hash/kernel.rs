//! Key to probe-position pipeline.
//!
//! [`HashKernel`] owns a [`HasherPool`] of FNV-1a states. Hashing a key
//! borrows one state, feeds it the key bytes, splits the 64-bit digest into
//! two 32-bit bases and hands the state back to the pool.
//!
//! ```text
//! key ─► FNV-1a 64 ─► [ high 32 | low 32 ] ─► (h1, h2) ─► gᵢ = (h1 + i·h2) mod m
//! ```

use super::fnv::Fnv64;
use super::pool::HasherPool;
use super::strategies::{DoubleHashing, Probes};
use std::hash::Hasher;

/// The two 32-bit bases of one key's digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashPair {
    /// High 32 bits of the digest.
    pub h1: u32,
    /// Low 32 bits of the digest.
    pub h2: u32,
}

impl From<u64> for HashPair {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from(digest: u64) -> Self {
        Self {
            h1: (digest >> 32) as u32,
            h2: digest as u32,
        }
    }
}

/// Pooled FNV-1a hashing plus double-hashing probe generation.
#[derive(Debug, Default)]
pub struct HashKernel {
    pool: HasherPool<Fnv64>,
}

impl HashKernel {
    /// Kernel with the default pool size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Kernel whose pool keeps at most `max_idle` idle hashers.
    #[must_use]
    pub fn with_max_idle(max_idle: usize) -> Self {
        Self {
            pool: HasherPool::with_max_idle(max_idle),
        }
    }

    /// Digest `key` and split it into `(h1, h2)`.
    ///
    /// ```
    /// use atombloom::hash::HashKernel;
    ///
    /// let kernel = HashKernel::new();
    /// let pair = kernel.hash_pair(b"a");
    /// assert_eq!(pair.h1, 0xaf63_dc4c);
    /// assert_eq!(pair.h2, 0x8601_ec8c);
    /// ```
    #[inline]
    #[must_use]
    pub fn hash_pair(&self, key: &[u8]) -> HashPair {
        let mut hasher = self.pool.acquire();
        hasher.write(key);
        HashPair::from(hasher.finish())
    }

    /// The `k` probe positions of `key` in a filter of `m` bits.
    #[inline]
    pub fn probes(&self, key: &[u8], k: usize, m: usize) -> Probes {
        DoubleHashing.probes(self.hash_pair(key), k, m)
    }

    /// The underlying hasher pool.
    #[must_use]
    pub fn pool(&self) -> &HasherPool<Fnv64> {
        &self.pool
    }
}

impl Clone for HashKernel {
    /// A fresh kernel; pooled hasher states are never shared between filters.
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_high_low() {
        let pair = HashPair::from(0x0123_4567_89ab_cdef);
        assert_eq!(pair.h1, 0x0123_4567);
        assert_eq!(pair.h2, 0x89ab_cdef);
    }

    #[test]
    fn test_hash_pair_reference() {
        let kernel = HashKernel::new();
        let pair = kernel.hash_pair(b"a");
        assert_eq!(
            pair,
            HashPair {
                h1: 0xaf63_dc4c,
                h2: 0x8601_ec8c,
            }
        );
    }

    #[test]
    fn test_empty_key() {
        let kernel = HashKernel::new();
        let pair = kernel.hash_pair(b"");
        assert_eq!(pair, HashPair::from(0xcbf2_9ce4_8422_2325));
    }

    #[test]
    fn test_repeated_hashing_stable() {
        let kernel = HashKernel::new();
        let first = kernel.hash_pair(b"stable");
        for _ in 0..100 {
            assert_eq!(kernel.hash_pair(b"stable"), first);
        }
        assert_eq!(kernel.pool().allocated(), 1);
    }

    #[test]
    fn test_probes_match_strategy() {
        let kernel = HashKernel::new();
        let direct: Vec<_> = kernel.probes(b"key", 4, 480).collect();
        let manual: Vec<_> = DoubleHashing
            .probes(kernel.hash_pair(b"key"), 4, 480)
            .collect();
        assert_eq!(direct, manual);
    }

    #[test]
    fn test_clone_has_own_pool() {
        let kernel = HashKernel::new();
        let _ = kernel.hash_pair(b"x");
        let copy = kernel.clone();
        assert_eq!(copy.pool().allocated(), 0);
        assert_eq!(copy.hash_pair(b"x"), kernel.hash_pair(b"x"));
    }
}
