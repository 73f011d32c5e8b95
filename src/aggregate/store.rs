use rustc_hash::FxHashMap;

use super::key_stats::KeyStats;

/// Initial capacity; the measurement files carry a few hundred keys
const INITIAL_CAPACITY: usize = 1024;

/// Mapping from raw key bytes to running statistics.
///
/// Keys are copied once, on their first observation. Every later update is a
/// hash lookup and an in-place fold with no allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    entries: FxHashMap<Box<[u8]>, KeyStats>,
}

impl Store {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Fold one observation into `key`'s entry, creating it on first sight
    #[inline]
    pub fn update(&mut self, key: &[u8], value: f64) {
        match self.entries.get_mut(key) {
            Some(stats) => stats.add(value),
            None => {
                self.entries.insert(key.into(), KeyStats::new(value));
            }
        }
    }

    /// Insert a complete entry, replacing any previous one.
    ///
    /// Used when restoring a snapshot.
    pub fn insert(&mut self, key: &[u8], stats: KeyStats) -> Option<KeyStats> {
        self.entries.insert(key.into(), stats)
    }

    pub fn get(&self, key: &[u8]) -> Option<&KeyStats> {
        self.entries.get(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of observations folded in across all keys
    pub fn observations(&self) -> u64 {
        self.entries.values().map(|s| s.count).sum()
    }

    /// Entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &KeyStats)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Keys in ascending byte-wise order
    pub fn sorted_keys(&self) -> Vec<&[u8]> {
        let mut keys: Vec<&[u8]> = self.entries.keys().map(|k| k.as_ref()).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
