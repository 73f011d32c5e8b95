//! Result Formatter
//!
//! Renders `{key1=min/mean/max, key2=min/mean/max, ...}` with keys in
//! ascending byte-wise order and one decimal place per number.

use std::fmt::Write;

use crate::aggregate::Store;
use crate::finalize::{Finalized, Summary};

/// Render summaries, sorting them by key first
pub fn format_summaries<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a [u8], Summary)>,
{
    let mut entries: Vec<(&[u8], Summary)> = entries.into_iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut out = String::with_capacity(2 + entries.len() * 32);
    out.push('{');
    for (i, (key, summary)) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(
            out,
            "{}={:.1}/{:.1}/{:.1}",
            String::from_utf8_lossy(key),
            summary.min,
            summary.mean,
            summary.max
        );
    }
    out.push('}');
    out
}

/// Render straight from the store, computing each mean on the way out
pub fn format_store(store: &Store) -> String {
    format_summaries(
        store
            .iter()
            .map(|(key, stats)| (key, Summary::from_stats(stats))),
    )
}

/// Render the finalizer's merged view
pub fn format_finalized(finalized: &Finalized<'_>) -> String {
    format_summaries(finalized.iter())
}
