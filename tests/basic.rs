//! Basic test - just to prove the filter works

use atombloom::{Filter, GuardedBloomFilter, LockFreeBloomFilter};

#[test]
fn test_basic_add_and_find() {
    let filter = LockFreeBloomFilter::new(100, 0.01).unwrap();

    filter.add(b"test-item");

    assert!(
        filter.test(b"test-item"),
        "Should find the item we just added"
    );
}

#[test]
fn test_batch_operations() {
    let filter = LockFreeBloomFilter::new(1000, 0.01).unwrap();

    let items: Vec<String> = vec!["apple", "banana", "cherry"]
        .into_iter()
        .map(String::from)
        .collect();

    filter.add_batch(&items);

    for item in &items {
        assert!(filter.test(item.as_bytes()), "Should find {}", item);
    }
    assert_eq!(filter.test_batch(&items), vec![true; 3]);
}

#[test]
fn test_no_false_negatives() {
    let filter = LockFreeBloomFilter::new(1000, 0.01).unwrap();

    for i in 0..100u64 {
        filter.add(&i.to_le_bytes());
    }

    for i in 0..100u64 {
        assert!(filter.test(&i.to_le_bytes()), "False negative for {}", i);
    }
}

#[test]
fn test_reference_capacity_and_k() {
    let filter = LockFreeBloomFilter::new(100, 0.1).unwrap();
    assert_eq!(filter.capacity(), 480);
    assert_eq!(filter.k(), 4);
}

#[test]
fn test_test_and_add_sequence() {
    let filter = LockFreeBloomFilter::new(100, 0.01).unwrap();

    assert!(!filter.test_and_add(b"a"), "a was not present yet");
    assert!(filter.test(b"a"));
    assert!(filter.test_and_add(b"a"), "a is present the second time");

    assert!(!filter.test_and_add(b"b"), "b was never added");
    assert!(filter.test(b"a"));
    assert!(filter.test(b"b"));
    assert!(!filter.test(b"c"));
}

#[test]
fn test_empty_filter_rejects_everything() {
    let filter = LockFreeBloomFilter::new(10_000, 0.01).unwrap();

    for i in 0..10_000 {
        assert!(!filter.test(format!("never-added-{i}").as_bytes()));
    }
}

#[test]
fn test_false_positive_rate_near_target() {
    let filter = LockFreeBloomFilter::new(10_000, 0.01).unwrap();

    for i in 0..10_000 {
        filter.add(format!("member-{i}").as_bytes());
    }

    let false_positives = (0..100_000)
        .filter(|i| filter.test(format!("outsider-{i}").as_bytes()))
        .count();
    let rate = false_positives as f64 / 100_000.0;

    assert!(rate < 0.03, "false positive rate {rate} far above 1% target");
}

#[test]
fn test_saturated_filter_reports_unseen_key() {
    let filter = LockFreeBloomFilter::new(100, 0.01).unwrap();

    for i in 0..1_000_000 {
        filter.add(i.to_string().as_bytes());
    }

    assert!(filter.test(b"x"), "a saturated filter accepts every key");
}

#[test]
fn test_variants_share_bits() {
    let lock_free = LockFreeBloomFilter::new(2000, 0.01).unwrap();
    let guarded = GuardedBloomFilter::new(2000, 0.01).unwrap();

    for i in 0..2000 {
        let key = format!("shared-{i}");
        lock_free.add(key.as_bytes());
        guarded.add(key.as_bytes());
    }

    assert_eq!(lock_free.raw_words(), guarded.raw_words());
    for i in 0..2000 {
        let key = format!("probe-{i}");
        assert_eq!(lock_free.test(key.as_bytes()), guarded.test(key.as_bytes()));
    }
}

#[test]
fn test_generic_over_filter_trait() {
    fn dedupe<F: Filter>(filter: &F, events: &[&str]) -> Vec<String> {
        events
            .iter()
            .filter(|e| !filter.test_and_add(e.as_bytes()))
            .map(|e| e.to_string())
            .collect()
    }

    let events = ["login", "click", "login", "logout", "click"];

    let unique = dedupe(&LockFreeBloomFilter::new(100, 0.001).unwrap(), &events);
    assert_eq!(unique, vec!["login", "click", "logout"]);

    let unique = dedupe(&GuardedBloomFilter::new(100, 0.001).unwrap(), &events);
    assert_eq!(unique, vec!["login", "click", "logout"]);
}
