//! Pool of reusable hasher states.
//!
//! Callers borrow a hasher with [`HasherPool::acquire`] and get back a
//! [`PooledHasher`] guard. Dropping the guard resets the hasher and returns it
//! to the idle list, so release happens on every exit path, unwinding
//! included. The idle list sits behind a `parking_lot::Mutex` that is held
//! only for a push or a pop, never while hashing.
//!
//! ```
//! use atombloom::hash::{Fnv64, HasherPool};
//! use std::hash::Hasher;
//!
//! let pool: HasherPool<Fnv64> = HasherPool::new();
//!
//! let first = {
//!     let mut hasher = pool.acquire();
//!     hasher.write(b"key");
//!     hasher.finish()
//! };
//!
//! // The same state object comes back, already reset.
//! let mut hasher = pool.acquire();
//! hasher.write(b"key");
//! assert_eq!(hasher.finish(), first);
//! assert_eq!(pool.allocated(), 1);
//! ```

use super::fnv::ResettableHasher;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Idle hashers kept by default; extras are dropped on release.
pub const DEFAULT_MAX_IDLE: usize = 64;

/// Thread-safe pool of hasher states.
#[derive(Debug)]
pub struct HasherPool<H> {
    idle: Mutex<Vec<H>>,
    max_idle: usize,
    allocated: AtomicUsize,
}

impl<H: ResettableHasher + Default> HasherPool<H> {
    /// Pool keeping up to [`DEFAULT_MAX_IDLE`] idle hashers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_idle(DEFAULT_MAX_IDLE)
    }

    /// Pool keeping up to `max_idle` idle hashers.
    ///
    /// `max_idle` is an upper bound only; the idle list grows as hashers are
    /// released.
    #[must_use]
    pub fn with_max_idle(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
            allocated: AtomicUsize::new(0),
        }
    }

    /// Borrow a clean hasher, constructing one only if none is idle.
    #[must_use]
    pub fn acquire(&self) -> PooledHasher<'_, H> {
        let hasher = self.idle.lock().pop().unwrap_or_else(|| {
            self.allocated.fetch_add(1, Ordering::Relaxed);
            H::default()
        });

        PooledHasher { pool: self, hasher }
    }

    fn release(&self, mut hasher: H) {
        hasher.reset();

        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(hasher);
        }
    }

    /// Hashers currently idle in the pool.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    /// Hashers constructed over the pool's lifetime.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }
}

impl<H: ResettableHasher + Default> Default for HasherPool<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped loan of a hasher; returns it to the pool on drop.
#[derive(Debug)]
pub struct PooledHasher<'a, H: ResettableHasher + Default> {
    pool: &'a HasherPool<H>,
    hasher: H,
}

impl<H: ResettableHasher + Default> Deref for PooledHasher<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        &self.hasher
    }
}

impl<H: ResettableHasher + Default> DerefMut for PooledHasher<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        &mut self.hasher
    }
}

impl<H: ResettableHasher + Default> Drop for PooledHasher<'_, H> {
    fn drop(&mut self) {
        let hasher = std::mem::take(&mut self.hasher);
        self.pool.release(hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::fnv::Fnv64;
    use std::hash::Hasher;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;
    use std::thread;

    fn fresh(bytes: &[u8]) -> u64 {
        let mut hasher = Fnv64::new();
        hasher.write(bytes);
        hasher.finish()
    }

    #[test]
    fn test_acquire_reuses_released_hasher() {
        let pool: HasherPool<Fnv64> = HasherPool::new();
        assert_eq!(pool.idle(), 0);

        drop(pool.acquire());
        assert_eq!(pool.idle(), 1);

        drop(pool.acquire());
        assert_eq!(pool.idle(), 1);
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_released_hasher_is_reset() {
        let pool: HasherPool<Fnv64> = HasherPool::new();

        {
            let mut hasher = pool.acquire();
            hasher.write(b"first key");
        }

        let mut hasher = pool.acquire();
        hasher.write(b"second key");
        assert_eq!(hasher.finish(), fresh(b"second key"));
    }

    #[test]
    fn test_nested_acquire_allocates_second() {
        let pool: HasherPool<Fnv64> = HasherPool::new();

        let a = pool.acquire();
        let b = pool.acquire();
        assert_eq!(pool.allocated(), 2);

        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_max_idle_bounds_pool() {
        let pool: HasherPool<Fnv64> = HasherPool::with_max_idle(1);

        let a = pool.acquire();
        let b = pool.acquire();
        drop(a);
        drop(b);

        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_unbounded_max_idle_allocates_lazily() {
        let pool: HasherPool<Fnv64> = HasherPool::with_max_idle(usize::MAX);
        assert_eq!(pool.idle(), 0);

        {
            let mut hasher = pool.acquire();
            hasher.write(b"key");
            assert_eq!(hasher.finish(), fresh(b"key"));
        }

        assert_eq!(pool.idle(), 1);
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_hasher_returned_on_panic() {
        let pool: HasherPool<Fnv64> = HasherPool::new();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut hasher = pool.acquire();
            hasher.write(b"doomed");
            panic!("hashing failed");
        }));

        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);

        let mut hasher = pool.acquire();
        hasher.write(b"a");
        assert_eq!(hasher.finish(), fresh(b"a"));
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool: Arc<HasherPool<Fnv64>> = Arc::new(HasherPool::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for i in 0..1000 {
                        let key = format!("{t}-{i}");
                        let mut hasher = pool.acquire();
                        hasher.write(key.as_bytes());
                        assert_eq!(hasher.finish(), fresh(key.as_bytes()));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert!(pool.allocated() <= 8);
        assert_eq!(pool.idle(), pool.allocated());
    }
}
