//! FNV-1a 64-bit streaming hasher.
//!
//! Deterministic across processes and platforms, which keeps probe positions
//! stable for a given key. State is a single `u64`, reset to the offset basis
//! before the hasher goes back into a [`HasherPool`](super::pool::HasherPool).

use std::hash::Hasher;

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A hasher whose state can be wiped for reuse.
///
/// After `reset`, hashing a key must give the same result as a freshly
/// constructed hasher, so no bytes of the previous key leak into the next one.
pub trait ResettableHasher: Hasher {
    /// Return to the initial state.
    fn reset(&mut self);
}

/// FNV-1a over raw bytes.
///
/// ```
/// use atombloom::hash::Fnv64;
/// use std::hash::Hasher;
///
/// let mut hasher = Fnv64::new();
/// hasher.write(b"a");
/// assert_eq!(hasher.finish(), 0xaf63_dc4c_8601_ec8c);
/// ```
#[derive(Debug, Clone)]
pub struct Fnv64 {
    state: u64,
}

impl Fnv64 {
    /// Create a hasher at the offset basis.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl Default for Fnv64 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv64 {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}

impl ResettableHasher for Fnv64 {
    #[inline]
    fn reset(&mut self) {
        self.state = FNV_OFFSET_BASIS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fnv(bytes: &[u8]) -> u64 {
        let mut hasher = Fnv64::new();
        hasher.write(bytes);
        hasher.finish()
    }

    #[test]
    fn test_reference_vectors() {
        assert_eq!(fnv(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let mut hasher = Fnv64::new();
        hasher.write(b"foo");
        hasher.write(b"bar");
        assert_eq!(hasher.finish(), fnv(b"foobar"));
    }

    #[test]
    fn test_reset_forgets_previous_input() {
        let mut hasher = Fnv64::new();
        hasher.write(b"some earlier key");
        hasher.reset();
        hasher.write(b"a");
        assert_eq!(hasher.finish(), fnv(b"a"));
    }

    #[test]
    fn test_different_inputs_differ() {
        assert_ne!(fnv(b"input1"), fnv(b"input2"));
        assert_ne!(fnv(b"a"), fnv(b"b"));
    }
}
