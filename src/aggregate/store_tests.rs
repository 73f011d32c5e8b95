//! Tests for aggregate/store

use super::*;
use proptest::prelude::*;

#[test]
fn test_first_update_creates_entry() {
    let mut store = Store::new();
    store.update(b"Hamburg", 12.0);

    let stats = store.get(b"Hamburg").unwrap();
    assert_eq!(*stats, KeyStats::new(12.0));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_repeated_updates_fold_in_place() {
    let mut store = Store::new();
    store.update(b"Hamburg", 12.0);
    store.update(b"Bulawayo", 8.9);
    store.update(b"Hamburg", 10.0);

    let hamburg = store.get(b"Hamburg").unwrap();
    assert_eq!(hamburg.min, 10.0);
    assert_eq!(hamburg.max, 12.0);
    assert_eq!(hamburg.sum, 22.0);
    assert_eq!(hamburg.count, 2);
    assert_eq!(store.len(), 2);
    assert_eq!(store.observations(), 3);
}

#[test]
fn test_repeated_value_mean_equals_value() {
    let mut store = Store::new();
    for _ in 0..7 {
        store.update(b"k", -99.85);
    }
    let stats = store.get(b"k").unwrap();
    assert_eq!(stats.mean(), stats.min);
    assert_eq!(stats.mean(), stats.max);
}

#[test]
fn test_empty_key_is_its_own_entry() {
    let mut store = Store::new();
    store.update(b"", 1.0);
    store.update(b"", 3.0);

    assert_eq!(store.get(b"").unwrap().count, 2);
}

#[test]
fn test_sorted_keys_are_bytewise_ascending() {
    let mut store = Store::new();
    for key in [&b"b"[..], &b"B"[..], &b"a"[..], &b"ab"[..], &b"\xc3\xa9"[..], &b""[..]] {
        store.update(key, 0.0);
    }

    let keys = store.sorted_keys();
    assert_eq!(
        keys,
        vec![&b""[..], &b"B"[..], &b"a"[..], &b"ab"[..], &b"b"[..], &b"\xc3\xa9"[..]]
    );
}

#[test]
fn test_insert_replaces_entry() {
    let mut store = Store::new();
    store.update(b"a", 1.0);
    let previous = store.insert(
        b"a",
        KeyStats {
            min: -5.0,
            max: 5.0,
            sum: 0.0,
            count: 10,
        },
    );

    assert_eq!(previous, Some(KeyStats::new(1.0)));
    assert_eq!(store.get(b"a").unwrap().count, 10);
}

/// Strategy for a stream of observations over a small key space
fn arb_observations() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec(("[a-e]{0,2}", -999i32..=999), 1..200).prop_map(|obs| {
        obs.into_iter()
            .map(|(key, tenths)| (key, f64::from(tenths) / 10.0))
            .collect()
    })
}

// Feature: aggregation-store, Property: bounds and counts
// For any stream of observations, every entry satisfies min <= mean <= max,
// and the counts add up to the number of updates.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_mean_within_bounds(observations in arb_observations()) {
        let mut store = Store::new();
        for (key, value) in &observations {
            store.update(key.as_bytes(), *value);
        }

        prop_assert_eq!(store.observations(), observations.len() as u64);

        for (key, stats) in store.iter() {
            let mean = stats.mean();
            prop_assert!(stats.min <= mean, "mean below min for {:?}", key);
            prop_assert!(mean <= stats.max, "mean above max for {:?}", key);

            for (k, v) in &observations {
                if k.as_bytes() == key {
                    prop_assert!(stats.min <= *v && *v <= stats.max);
                }
            }
        }
    }
}
