//! Parallel Finalizer
//!
//! Derives per-key summaries from an already populated store on a fixed-size
//! worker pool. Keys are sorted once and split into contiguous partitions, so
//! each worker owns a disjoint set of keys; the caller blocks until all of
//! them have joined, and only then reads the merged results.

mod partition;
mod pool;
mod summary;

pub use partition::partition;
pub use pool::run_partitioned;
pub use summary::{Summary, stats_from_samples};

use rustc_hash::FxHashMap;

use crate::aggregate::{KeyStats, SampleStore, Store};

/// Default worker count
pub const DEFAULT_POOL_SIZE: usize = 30;

/// Read-only view over finalized summaries, in ascending key order
#[derive(Debug)]
pub struct Finalized<'a> {
    keys: Vec<&'a [u8]>,
    results: FxHashMap<&'a [u8], Summary>,
}

impl<'a> Finalized<'a> {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, key: &[u8]) -> Option<&Summary> {
        self.results.get(key)
    }

    /// Summaries in ascending byte-wise key order
    pub fn iter(&self) -> impl Iterator<Item = (&'a [u8], Summary)> + '_ {
        self.keys
            .iter()
            .filter_map(|&key| self.results.get(key).map(|summary| (key, *summary)))
    }
}

/// Summaries derived from the store's running statistics
pub fn finalize_store(store: &Store, pool_size: usize) -> Finalized<'_> {
    let keys = store.sorted_keys();
    let results = run_partitioned(&keys, pool_size, |key| {
        store.get(key).map_or(Summary::ZERO, Summary::from_stats)
    });
    Finalized { keys, results }
}

/// Summaries recomputed from every retained sample
pub fn finalize_samples(samples: &SampleStore, pool_size: usize) -> Finalized<'_> {
    let keys = samples.sorted_keys();
    let results = run_partitioned(&keys, pool_size, |key| {
        Summary::from_samples(samples.get(key).unwrap_or_default())
    });
    Finalized { keys, results }
}

/// A key whose running stats disagree with its retained samples
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub key: Vec<u8>,
    pub running: Option<KeyStats>,
    pub recomputed: Option<KeyStats>,
}

/// Cross-check running stats against stats recomputed from raw samples.
///
/// Keys present on only one side are reported too. Sums are compared with a
/// relative tolerance; min, max and count must match exactly.
pub fn verify(store: &Store, samples: &SampleStore, pool_size: usize) -> Vec<Mismatch> {
    let mut keys = store.sorted_keys();
    keys.extend(
        samples
            .sorted_keys()
            .into_iter()
            .filter(|key| store.get(key).is_none()),
    );
    keys.sort_unstable();

    let checked = run_partitioned(&keys, pool_size, |key| {
        let running = store.get(key).copied();
        let recomputed = samples.get(key).map(stats_from_samples);
        let agrees = match (&running, &recomputed) {
            (Some(a), Some(b)) => stats_agree(a, b),
            _ => false,
        };
        (agrees, running, recomputed)
    });

    let mismatches: Vec<Mismatch> = keys
        .iter()
        .filter_map(|key| match checked.get(key) {
            Some((false, running, recomputed)) => Some(Mismatch {
                key: key.to_vec(),
                running: *running,
                recomputed: *recomputed,
            }),
            _ => None,
        })
        .collect();

    if !mismatches.is_empty() {
        log::warn!("{} keys failed verification", mismatches.len());
    }

    mismatches
}

fn stats_agree(a: &KeyStats, b: &KeyStats) -> bool {
    let tolerance = 1e-9 * a.sum.abs().max(b.sum.abs()).max(1.0);
    a.count == b.count && a.min == b.min && a.max == b.max && (a.sum - b.sum).abs() <= tolerance
}

#[cfg(test)]
#[path = "finalize_tests.rs"]
mod finalize_tests;
