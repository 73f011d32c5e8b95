//! Ingestion pipeline and run orchestration
//!
//! Chunk Reader → Record Parser → `Store::update`, strictly sequential on
//! the caller's stack, followed by the optional parallel finalization and
//! formatting of the summary line.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::ops::ControlFlow;
use std::path::Path;
use std::time::Duration;

use crate::aggregate::{SampleStore, Store};
use crate::config::{Config, IngestConfig};
use crate::error::BrcError;
use crate::finalize::{self, Mismatch};
use crate::format;
use crate::parse::parse_record;
use crate::profile::Profiler;
use crate::reader::ChunkReader;
use crate::snapshot::SnapshotCache;

/// Line accounting for one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Lines read, malformed ones included
    pub lines: u64,
    /// Lines folded into the store
    pub records: u64,
    /// Lines dropped for a missing delimiter or an unparsable value
    pub malformed: u64,
}

/// Where the aggregated data of a run came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Input,
    Cache,
}

/// Everything a run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: String,
    pub source: DataSource,
    /// `None` when the store came from the snapshot cache
    pub ingest: Option<IngestStats>,
    pub keys: usize,
    /// Values folded into the store, whether parsed now or restored
    pub observations: u64,
    /// Wall-clock time of ingestion and aggregation
    pub elapsed: Duration,
    pub mismatches: Vec<Mismatch>,
}

/// Stream `source` into `store` (and `samples`, when given).
///
/// Malformed lines are counted and dropped. Only read errors abort.
pub fn ingest<R: Read>(
    source: R,
    store: &mut Store,
    mut samples: Option<&mut SampleStore>,
    options: &IngestConfig,
) -> Result<IngestStats, BrcError> {
    let mut reader = ChunkReader::with_window_size(source, options.window_size);
    let mut stats = IngestStats::default();
    let max_rows = options.max_rows.unwrap_or(u64::MAX);

    if max_rows == 0 {
        return Ok(stats);
    }

    reader.for_each_line(|line| {
        stats.lines += 1;

        match parse_record(line) {
            Some((key, value)) => {
                store.update(key, value);
                if let Some(samples) = samples.as_deref_mut() {
                    samples.record(key, value);
                }
                stats.records += 1;
            }
            None => stats.malformed += 1,
        }

        if stats.lines >= max_rows {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    #[cfg(debug_assertions)]
    log::debug!(
        "Ingested {} lines ({} records, {} malformed) into {} keys",
        stats.lines,
        stats.records,
        stats.malformed,
        store.len()
    );

    Ok(stats)
}

/// Open `path` and ingest it
pub fn ingest_file(
    path: &Path,
    store: &mut Store,
    samples: Option<&mut SampleStore>,
    options: &IngestConfig,
) -> Result<IngestStats, BrcError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => BrcError::InputNotFound(path.to_path_buf()),
        _ => BrcError::Io(e),
    })?;
    ingest(file, store, samples, options)
}

/// Aggregate `input` (or restore it from the snapshot cache) and render the summary
pub fn run(
    input: &Path,
    config: &Config,
    profiler: &mut dyn Profiler,
) -> Result<RunOutcome, BrcError> {
    let cache = config
        .cache
        .enabled
        .then(|| SnapshotCache::new(&config.cache.path));

    if config.cache.clear_on_start {
        clear_cache(&SnapshotCache::new(&config.cache.path));
    }

    profiler.start();

    let mut samples = config.finalize.retain_samples.then(SampleStore::new);
    let (store, ingest_stats) = match cache.as_ref().and_then(load_cached) {
        Some(store) => {
            // Raw samples are not part of the snapshot
            samples = None;
            (store, None)
        }
        None => {
            let mut store = Store::new();
            let stats = ingest_file(input, &mut store, samples.as_mut(), &config.ingest)?;
            if let Some(cache) = &cache {
                save_cached(cache, &store, config);
            }
            (store, Some(stats))
        }
    };

    let elapsed = profiler.stop();

    let mut mismatches = Vec::new();
    let summary = if config.finalize.enabled {
        let pool_size = config.finalize.pool_size;
        match &samples {
            Some(samples) => {
                if config.finalize.verify {
                    mismatches = finalize::verify(&store, samples, pool_size);
                }
                format::format_finalized(&finalize::finalize_samples(samples, pool_size))
            }
            None => format::format_finalized(&finalize::finalize_store(&store, pool_size)),
        }
    } else {
        format::format_store(&store)
    };

    Ok(RunOutcome {
        summary,
        source: if ingest_stats.is_some() {
            DataSource::Input
        } else {
            DataSource::Cache
        },
        ingest: ingest_stats,
        keys: store.len(),
        observations: store.observations(),
        elapsed,
        mismatches,
    })
}

fn clear_cache(cache: &SnapshotCache) {
    match cache.clear() {
        Ok(true) => {
            #[cfg(debug_assertions)]
            log::debug!("Cache file {:?} removed", cache.path());
        }
        Ok(false) => {}
        Err(e) => log::warn!("Failed to remove cache file {:?}: {}", cache.path(), e),
    }
}

fn load_cached(cache: &SnapshotCache) -> Option<Store> {
    if !cache.exists() {
        #[cfg(debug_assertions)]
        log::debug!("Cache file {:?} not found, processing input", cache.path());
        return None;
    }

    match cache.load() {
        Ok(store) => {
            #[cfg(debug_assertions)]
            log::debug!("Loaded {} keys from cache {:?}", store.len(), cache.path());
            Some(store)
        }
        Err(e) => {
            log::warn!("Ignoring unreadable cache {:?}: {}", cache.path(), e);
            None
        }
    }
}

/// Save the store, but only for runs capped at or below the cache threshold
fn save_cached(cache: &SnapshotCache, store: &Store, config: &Config) {
    let within_threshold = config
        .ingest
        .max_rows
        .is_some_and(|max_rows| max_rows <= config.cache.threshold);

    if !within_threshold {
        #[cfg(debug_assertions)]
        log::debug!("Cache threshold not reached, skipping cache save");
        return;
    }

    if let Err(e) = cache.save(store) {
        log::warn!("Failed to save cache {:?}: {}", cache.path(), e);
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;
