//! Retained raw samples
//!
//! Optional companion to [`Store`](super::Store) that keeps every parsed
//! value per key, so statistics can be recomputed (or cross-checked) from the
//! raw observations after ingestion. Growth is amortized through `Vec`'s
//! capacity doubling.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: FxHashMap<Box<[u8]>, Vec<f64>>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation to `key`'s sample list
    #[inline]
    pub fn record(&mut self, key: &[u8], value: f64) {
        match self.samples.get_mut(key) {
            Some(values) => values.push(value),
            None => {
                self.samples.insert(key.into(), vec![value]);
            }
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&[f64]> {
        self.samples.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Keys in ascending byte-wise order
    pub fn sorted_keys(&self) -> Vec<&[u8]> {
        let mut keys: Vec<&[u8]> = self.samples.keys().map(|k| k.as_ref()).collect();
        keys.sort_unstable();
        keys
    }
}
