use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::SnapshotError;

#[derive(Debug, Error)]
pub enum BrcError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}
