//! Internal utility types.
//!
//! - [`atomic`] - Cache-line aligned atomic counter

pub mod atomic;

pub use atomic::{AtomicCounter, CACHE_LINE_SIZE};
