//! Core types and traits.
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── filter.rs    - Filter capability trait
//! ├── bitvec.rs    - Lock-free bit store over AtomicU32 words
//! ├── params.rs    - Sizing utility (m, k, expected rate)
//! └── mod.rs       - This file (public API)
//! ```
//!
//! Dependency order, leaves first: hashing, then [`bitvec`], then the filters
//! built on top of both.

pub mod bitvec;
pub mod filter;
pub mod params;

pub use bitvec::AtomicBitVec;
pub use filter::Filter;
pub use params::{
    expected_fp_rate, optimal_k, optimal_m, validate_fp_rate, FilterParams, MAX_FILTER_SIZE,
    MIN_FILTER_SIZE, MIN_HASH_FUNCTIONS, WORD_BITS,
};
