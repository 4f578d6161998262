pub mod app_config;
pub mod fingerprint;
pub mod snapshot_repo;
pub mod memory_repo;

use std::path::{Path, PathBuf};

pub use fingerprint::Blake3Hasher;
pub use snapshot_repo::{FileSnapshotRepository, SnapshotRecord};
pub use memory_repo::InMemoryTheaterRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid event name for snapshot storage: {0:?}")]
    InvalidEvent(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot failed validation: {0}")]
    Invalid(#[from] boxoffice_core::CoreError),

    #[error("Snapshot store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
