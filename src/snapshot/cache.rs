use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use super::codec::{self, SnapshotError};
use crate::aggregate::Store;

/// Default cache file, relative to the working directory
pub const DEFAULT_CACHE_FILE: &str = "measurements_data_cache.bin";

/// On-disk snapshot of a populated store
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Store, SnapshotError> {
        let blob = fs::read(&self.path)?;

        #[cfg(debug_assertions)]
        log::debug!("Read {} byte snapshot from {:?}", blob.len(), self.path);

        codec::load(&blob)
    }

    pub fn save(&self, store: &Store) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let blob = codec::save(store);
        fs::write(&self.path, &blob)?;

        #[cfg(debug_assertions)]
        log::debug!(
            "Saved {} keys ({} bytes) to {:?}",
            store.len(),
            blob.len(),
            self.path
        );

        Ok(())
    }

    /// Remove the cache file. Returns whether a file was actually removed.
    pub fn clear(&self) -> io::Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_FILE)
    }
}
