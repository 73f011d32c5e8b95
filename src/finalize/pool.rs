//! Fixed-size worker pool over a sorted key list

use std::sync::{Mutex, PoisonError};
use std::thread;

use rustc_hash::FxHashMap;

use super::partition::partition;

/// Run `derive` for every key, spread over `pool_size` scoped workers.
///
/// Each worker only touches the keys of its own partition and writes its
/// results into the shared map; no two workers ever write the same key.
/// Returns once every worker has joined.
pub fn run_partitioned<'a, T, F>(
    keys: &[&'a [u8]],
    pool_size: usize,
    derive: F,
) -> FxHashMap<&'a [u8], T>
where
    T: Send,
    F: Fn(&'a [u8]) -> T + Sync,
{
    let results = Mutex::new(FxHashMap::with_capacity_and_hasher(
        keys.len(),
        Default::default(),
    ));
    let ranges = partition(keys.len(), pool_size);

    #[cfg(debug_assertions)]
    log::debug!(
        "Finalizing {} keys across {} workers ({} per worker)",
        keys.len(),
        ranges.len(),
        ranges.first().map_or(0, |r| r.len())
    );

    thread::scope(|scope| {
        for range in ranges {
            let chunk = &keys[range];
            if chunk.is_empty() {
                continue;
            }

            let results = &results;
            let derive = &derive;
            scope.spawn(move || {
                let local: Vec<(&'a [u8], T)> = chunk.iter().map(|&key| (key, derive(key))).collect();
                results
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend(local);
            });
        }
    });

    results.into_inner().unwrap_or_else(PoisonError::into_inner)
}
