// Configuration type definitions

use std::path::PathBuf;

use serde::Deserialize;

use crate::finalize::DEFAULT_POOL_SIZE;
use crate::reader::DEFAULT_WINDOW_SIZE;
use crate::snapshot::SnapshotCache;

/// Only runs capped at or below this many rows write a snapshot
pub const DEFAULT_CACHE_THRESHOLD: u64 = 250_000_000;

/// Ingestion configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Stop after this many lines (malformed ones included)
    #[serde(default)]
    pub max_rows: Option<u64>,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            window_size: DEFAULT_WINDOW_SIZE,
            max_rows: None,
        }
    }
}

/// Finalizer configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct FinalizeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Keep every raw value and derive summaries from them
    #[serde(default)]
    pub retain_samples: bool,
    /// Cross-check running stats against retained samples
    #[serde(default)]
    pub verify: bool,
}

fn default_true() -> bool {
    true
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

impl Default for FinalizeConfig {
    fn default() -> Self {
        FinalizeConfig {
            enabled: true,
            pool_size: DEFAULT_POOL_SIZE,
            retain_samples: false,
            verify: false,
        }
    }
}

/// Snapshot cache configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    #[serde(default = "default_cache_threshold")]
    pub threshold: u64,
    #[serde(default)]
    pub clear_on_start: bool,
}

fn default_cache_path() -> PathBuf {
    SnapshotCache::default().path().to_path_buf()
}

fn default_cache_threshold() -> u64 {
    DEFAULT_CACHE_THRESHOLD
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            enabled: false,
            path: default_cache_path(),
            threshold: DEFAULT_CACHE_THRESHOLD,
            clear_on_start: false,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub finalize: FinalizeConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub window_size: Option<usize>,
    pub pool_size: Option<usize>,
    pub max_rows: Option<u64>,
    pub no_finalize: bool,
    pub retain_samples: bool,
    pub verify: bool,
    pub cache_path: Option<PathBuf>,
    pub clear_cache: bool,
}

impl Config {
    /// Apply command-line overrides on top of the loaded file
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(window_size) = overrides.window_size {
            self.ingest.window_size = window_size;
        }
        if let Some(pool_size) = overrides.pool_size {
            self.finalize.pool_size = pool_size;
        }
        if overrides.max_rows.is_some() {
            self.ingest.max_rows = overrides.max_rows;
        }
        if overrides.no_finalize {
            self.finalize.enabled = false;
        }
        if overrides.retain_samples {
            self.finalize.retain_samples = true;
        }
        if overrides.verify {
            self.finalize.verify = true;
            self.finalize.retain_samples = true;
        }
        if let Some(path) = overrides.cache_path {
            self.cache.enabled = true;
            self.cache.path = path;
        }
        if overrides.clear_cache {
            self.cache.clear_on_start = true;
        }
        self.normalize();
        self
    }

    /// Bring settings the engine cannot run with back into range.
    ///
    /// Returns one message per adjusted setting.
    pub fn normalize(&mut self) -> Vec<String> {
        let mut adjusted = Vec::new();

        if self.ingest.window_size == 0 {
            self.ingest.window_size = 1;
            adjusted.push("ingest.window_size must be at least 1".to_string());
        }
        if self.finalize.pool_size == 0 {
            self.finalize.pool_size = 1;
            adjusted.push("finalize.pool_size must be at least 1".to_string());
        }
        if self.finalize.verify && !self.finalize.retain_samples {
            self.finalize.retain_samples = true;
            adjusted.push("finalize.verify requires retain_samples, enabling it".to_string());
        }
        if self.cache.enabled && self.cache.path.as_os_str().is_empty() {
            self.cache.path = default_cache_path();
            adjusted.push(format!(
                "cache.path is empty, using {}",
                self.cache.path.display()
            ));
        }

        adjusted
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
