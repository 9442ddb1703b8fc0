//! atombloom: lock-free concurrent Bloom filter.
//!
//! A Bloom filter answers "definitely not present" or "probably present" for
//! byte-string keys in a fixed amount of memory. atombloom's filter is shared
//! between threads without any outer lock: bits are set with per-word
//! compare-and-swap, and every key is hashed once per operation no matter how
//! many probes the filter uses.
//!
//! - **False positives**: possible, at roughly the configured rate
//! - **False negatives**: never, for keys whose `add` has returned
//! - **Removal**: not supported; bits are only ever set
//!
//! # Quick Start
//!
//! ```
//! use atombloom::LockFreeBloomFilter;
//!
//! // 10,000 keys at a 1% false positive rate
//! let filter = LockFreeBloomFilter::new(10_000, 0.01).unwrap();
//!
//! filter.add(b"hello").add(b"world");
//!
//! assert!(filter.test(b"hello"));     // probably present
//! assert!(!filter.test(b"goodbye"));  // definitely not present
//!
//! // Check and insert in a single hash pass
//! assert!(!filter.test_and_add(b"new-key"));
//! assert!(filter.test_and_add(b"new-key"));
//! ```
//!
//! # Architecture
//!
//! ```text
//! hash::HashKernel     FNV-1a 64 from a pooled hasher, split into (h1, h2)
//!        │
//! hash::DoubleHashing  offset_i = (h1 + h2·i) mod m, i in [0, k)
//!        │
//! core::AtomicBitVec   ⌈m/32⌉ + 1 AtomicU32 words, CAS retry loop on set
//!        │
//! filters::*           test / add / test_and_add / capacity / k
//! ```
//!
//! # Sharing Across Threads
//!
//! ```
//! use atombloom::LockFreeBloomFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let filter = Arc::new(LockFreeBloomFilter::new(8_000, 0.01).unwrap());
//!
//! let workers: Vec<_> = (0..8)
//!     .map(|w| {
//!         let filter = Arc::clone(&filter);
//!         thread::spawn(move || {
//!             for i in 0..1000 {
//!                 filter.add(format!("{w}:{i}").as_bytes());
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for w in workers {
//!     w.join().unwrap();
//! }
//!
//! assert!(filter.test(b"7:999"));
//! ```
//!
//! # Choosing a Filter
//!
//! | Filter | Use Case |
//! |--------|----------|
//! | [`LockFreeBloomFilter`] | Default. Non-blocking everywhere; racing `test_and_add` calls on one new key may all return `false` |
//! | [`GuardedBloomFilter`] | Need exactly one `false` per new key from racing `test_and_add` calls |
//!
//! Both implement [`Filter`] and set the same bits for the same keys.
//!
//! # Configuration
//!
//! Construction fails fast on a false positive rate outside (0, 1) and
//! accepts an expected item count of zero by falling back to the minimum
//! capacity. See [`builder`] for the type-state builder and the
//! [`FilterConfig`] struct (serde support behind the `serde` feature).
//!
//! # Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `serde` | `Serialize`/`Deserialize` for [`FilterConfig`] |
//! | `trace` | A `tracing::trace!` event per `test` / `add` / `test_and_add` |
//!
//! Construction always emits a `tracing::debug!` event with the chosen `m`
//! and `k`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

/// Filter trait, bit store and sizing
pub mod core;

/// Error types and result aliases
pub mod error;

/// Filter implementations
pub mod filters;

/// Hashing: FNV-1a, hasher pool, double hashing
pub mod hash;

/// Utility types
pub mod util;

/// Builders and configuration
pub mod builder;

pub use builder::{BloomFilterBuilder, FilterConfig};
pub use crate::core::filter::Filter;
pub use crate::core::params::FilterParams;
pub use error::{AtomBloomError, Result};
pub use filters::{GuardedBloomFilter, LockFreeBloomFilter};

/// Prelude for common imports.
///
/// ```
/// use atombloom::prelude::*;
///
/// let filter = LockFreeBloomFilter::new(100, 0.01).unwrap();
/// Filter::add(&filter, b"hello");
/// assert!(Filter::test(&filter, b"hello"));
/// ```
pub mod prelude {
    pub use crate::builder::{BloomFilterBuilder, FilterConfig};
    pub use crate::core::filter::Filter;
    pub use crate::core::params::FilterParams;
    pub use crate::error::{AtomBloomError, Result};
    pub use crate::filters::{GuardedBloomFilter, LockFreeBloomFilter};
}
