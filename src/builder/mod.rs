//! Builders and configuration for filter construction.
//!
//! # Type-State Builder
//!
//! ```
//! use atombloom::builder::BloomFilterBuilder;
//!
//! // Type-safe: can't build before both parameters are set
//! let filter = BloomFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .build_lock_free()
//!     .unwrap();
//! ```
//!
//! # Plain Configuration
//!
//! [`FilterConfig`] carries the same two inputs as a plain struct, suitable
//! for embedding in a service's configuration (serde support behind the
//! `serde` feature).
//!
//! # Error Handling
//!
//! - **Compile-time errors**: missing required parameters
//! - **Runtime errors**: a false positive rate outside (0, 1)
//!
//! An item count of zero is not an error; it yields the minimum capacity.

#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod standard;

pub use config::FilterConfig;
pub use standard::BloomFilterBuilder;

/// Prelude for builder imports.
pub mod prelude {
    pub use super::{BloomFilterBuilder, FilterConfig};
}
