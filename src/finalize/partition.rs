use std::ops::Range;

/// Split `n_items` into `n_workers` contiguous ranges.
///
/// Every range holds `n_items / n_workers` items except the last, which
/// absorbs the remainder. Always returns exactly `n_workers` ranges (a worker
/// count of zero is treated as one), so with fewer items than workers all but
/// the last range are empty. Range lengths sum to `n_items`.
pub fn partition(n_items: usize, n_workers: usize) -> Vec<Range<usize>> {
    let n_workers = n_workers.max(1);
    let per_worker = n_items / n_workers;

    (0..n_workers)
        .map(|worker| {
            let start = worker * per_worker;
            let end = if worker == n_workers - 1 {
                n_items
            } else {
                start + per_worker
            };
            start..end
        })
        .collect()
}
