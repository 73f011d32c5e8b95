//! brc library - single-pass min/mean/max aggregation over `<key>;<value>` files
//!
//! This library exposes the ingestion engine so it can be driven from tests
//! and benchmarks as well as from the `brc` binary.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod finalize;
pub mod format;
pub mod parse;
pub mod pipeline;
pub mod profile;
pub mod reader;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use aggregate::{KeyStats, SampleStore, Store};
pub use config::Config;
pub use error::BrcError;
pub use pipeline::{IngestStats, RunOutcome, ingest, run};
