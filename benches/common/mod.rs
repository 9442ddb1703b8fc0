//! Shared data generators and constants for benchmarks.
#![allow(dead_code)]

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Filter sizes exercised by the single-threaded benches.
pub const SIZES: &[usize] = &[1_000, 100_000, 1_000_000];

/// Thread counts exercised by the concurrent benches.
pub const THREAD_COUNTS: &[usize] = &[1, 2, 4, 8];

/// Target false positive rate used throughout.
pub const FP_RATE: f64 = 0.01;

/// Random alphanumeric string of `len` bytes.
#[inline]
pub fn random_string(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// `count` independent random keys of `len` bytes each.
pub fn generate_keys(count: usize, len: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| random_string(len).into_bytes())
        .collect()
}

/// Sequential keys: "item_00000000", "item_00000001", ...
pub fn generate_sequential_keys(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("item_{i:08}").into_bytes())
        .collect()
}

/// URL-like keys, a typical crawler dedup workload.
pub fn generate_urls(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| format!("https://example.com/path/{}", random_string(16)).into_bytes())
        .collect()
}
