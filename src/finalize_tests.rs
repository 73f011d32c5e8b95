//! Tests for finalize

use super::*;
use proptest::prelude::*;

fn sample_store() -> Store {
    let mut store = Store::new();
    store.update(b"Hamburg", 12.0);
    store.update(b"Bulawayo", 8.9);
    store.update(b"Hamburg", 10.0);
    store.update(b"Abha", -3.5);
    store
}

#[test]
fn test_finalize_store_in_key_order() {
    let store = sample_store();
    let finalized = finalize_store(&store, 2);

    let keys: Vec<&[u8]> = finalized.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![&b"Abha"[..], &b"Bulawayo"[..], &b"Hamburg"[..]]);
    assert_eq!(finalized.len(), 3);

    let hamburg = finalized.get(b"Hamburg").unwrap();
    assert_eq!(
        *hamburg,
        Summary {
            min: 10.0,
            mean: 11.0,
            max: 12.0
        }
    );
}

#[test]
fn test_pool_size_does_not_change_results() {
    let store = sample_store();
    let single: Vec<_> = finalize_store(&store, 1).iter().collect();
    let many: Vec<_> = finalize_store(&store, 30).iter().collect();
    assert_eq!(single, many);
}

#[test]
fn test_finalize_empty_store() {
    let store = Store::new();
    let finalized = finalize_store(&store, 4);
    assert!(finalized.is_empty());
    assert_eq!(finalized.iter().count(), 0);
}

#[test]
fn test_finalize_samples_matches_store() {
    let mut store = Store::new();
    let mut samples = SampleStore::new();
    for (key, value) in [("a", 1.5), ("b", -2.0), ("a", 3.5), ("c", 0.0), ("b", 4.0)] {
        store.update(key.as_bytes(), value);
        samples.record(key.as_bytes(), value);
    }

    let from_store: Vec<_> = finalize_store(&store, 3).iter().collect();
    let from_samples: Vec<_> = finalize_samples(&samples, 3).iter().collect();
    assert_eq!(from_store, from_samples);
}

#[test]
fn test_verify_agreeing_sources() {
    let mut store = Store::new();
    let mut samples = SampleStore::new();
    for value in [1.0, 2.0, 3.0] {
        store.update(b"k", value);
        samples.record(b"k", value);
    }
    assert!(verify(&store, &samples, 4).is_empty());
}

#[test]
fn test_verify_reports_disagreement_and_missing_keys() {
    let mut store = Store::new();
    store.update(b"both", 1.0);
    store.update(b"both", 2.0);
    store.update(b"store_only", 5.0);

    let mut samples = SampleStore::new();
    samples.record(b"both", 1.0);
    samples.record(b"samples_only", 7.0);

    let mismatches = verify(&store, &samples, 2);
    let keys: Vec<&[u8]> = mismatches.iter().map(|m| m.key.as_slice()).collect();
    assert_eq!(
        keys,
        vec![&b"both"[..], &b"samples_only"[..], &b"store_only"[..]]
    );

    let both = &mismatches[0];
    assert_eq!(both.running.map(|s| s.count), Some(2));
    assert_eq!(both.recomputed.map(|s| s.count), Some(1));
    assert_eq!(mismatches[1].running, None);
    assert_eq!(mismatches[2].recomputed, None);
}

// Feature: parallel-finalizer, Property: partitioned results equal sequential ones
// For any store and pool size, the finalized view holds one summary per key, in
// ascending order, equal to the summary computed on the calling thread.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_finalize_matches_sequential(
        observations in prop::collection::vec(("[a-z]{0,3}", -999i32..=999), 0..300),
        pool_size in 1usize..40,
    ) {
        let mut store = Store::new();
        for (key, tenths) in &observations {
            store.update(key.as_bytes(), f64::from(*tenths) / 10.0);
        }

        let finalized = finalize_store(&store, pool_size);
        let produced: Vec<_> = finalized.iter().collect();

        prop_assert_eq!(produced.len(), store.len());
        for pair in produced.windows(2) {
            prop_assert!(pair[0].0 < pair[1].0);
        }
        for (key, summary) in produced {
            let expected = Summary::from_stats(store.get(key).unwrap());
            prop_assert_eq!(summary, expected);
            prop_assert!(summary.min <= summary.mean && summary.mean <= summary.max);
        }
    }
}
