//! Bloom filter implementations.
//!
//! # Available Filters
//!
//! | Filter | Bit updates | `test_and_add` under races |
//! |--------|-------------|----------------------------|
//! | [`LockFreeBloomFilter`] | Per-word CAS on bits; short pool lock per hash | At-least-once; racing callers may all see `false` |
//! | [`GuardedBloomFilter`] | `RwLock` around the whole word array | Linearizable; exactly one racing caller sees `false` |
//!
//! Both implement [`Filter`](crate::Filter) and use the same sizing, hashing
//! and offsets, so they set identical bits for identical inserts.
//!
//! # Examples
//!
//! ```
//! use atombloom::filters::LockFreeBloomFilter;
//!
//! let filter = LockFreeBloomFilter::new(10_000, 0.01).unwrap();
//! filter.add(b"hello");
//! assert!(filter.test(b"hello"));
//! ```

pub mod guarded;
pub mod lockfree;

pub use guarded::GuardedBloomFilter;
pub use lockfree::LockFreeBloomFilter;
