//! Snapshot Cache
//!
//! Persists a populated [`Store`](crate::aggregate::Store) so a later run can
//! skip parsing the input. The engine never depends on it: every run has a
//! complete path that ignores the cache.

mod cache;
mod codec;

pub use cache::SnapshotCache;
pub use codec::{FORMAT_VERSION, MAGIC, SnapshotError, load, save};
