//! Hashing for Bloom filter probes.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── fnv.rs         - FNV-1a 64-bit hasher and the ResettableHasher trait
//! ├── pool.rs        - HasherPool and its RAII PooledHasher guard
//! ├── kernel.rs      - HashKernel: key -> (h1, h2) -> probe positions
//! ├── strategies.rs  - Double hashing probe iterator
//! └── mod.rs         - This file (public API)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use atombloom::hash::HashKernel;
//!
//! let kernel = HashKernel::new();
//! let positions: Vec<usize> = kernel.probes(b"hello", 4, 480).collect();
//!
//! assert_eq!(positions.len(), 4);
//! assert!(positions.iter().all(|&p| p < 480));
//! ```
//!
//! Probe positions depend only on the key bytes, `k` and `m`, so two filters
//! built with the same parameters set the same bits for the same key.

pub mod fnv;
pub mod kernel;
pub mod pool;
pub mod strategies;

pub use fnv::{Fnv64, ResettableHasher};
pub use kernel::{HashKernel, HashPair};
pub use pool::{HasherPool, PooledHasher, DEFAULT_MAX_IDLE};
pub use strategies::{DoubleHashing, Probes};
