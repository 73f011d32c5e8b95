//! Aggregation Store
//!
//! Per-key running statistics, updated once per parsed record. The store is
//! passed explicitly through the ingestion pipeline and owned by a single
//! call stack while records are folded in.

mod key_stats;
mod samples;
mod store;

pub use key_stats::KeyStats;
pub use samples::SampleStore;
pub use store::Store;
