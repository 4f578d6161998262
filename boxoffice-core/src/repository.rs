use async_trait::async_trait;
use std::fmt;
use crate::theater::Theater;

/// Digest over a theater fingerprint. Any stable hash works; only
/// determinism matters.
pub trait FingerprintHasher: Send + Sync {
    fn digest(&self, fingerprint: &str) -> String;
}

/// Identifies one persisted theater: the event it belongs to and a digest of
/// its occupant-free layout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub event: String,
    pub digest: String,
}

impl SnapshotKey {
    pub fn for_theater(theater: &Theater, hasher: &dyn FingerprintHasher) -> Self {
        Self {
            event: theater.event.clone(),
            digest: hasher.digest(&theater.fingerprint()),
        }
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.event.is_empty() {
            write!(f, "{}", self.digest)
        } else {
            write!(f, "{}/{}", self.event, self.digest)
        }
    }
}

/// Repository trait for theater snapshots
#[async_trait]
pub trait TheaterRepository: Send + Sync {
    /// `Ok(None)` when nothing has been saved under `key` yet
    async fn load(
        &self,
        key: &SnapshotKey,
    ) -> Result<Option<Theater>, Box<dyn std::error::Error + Send + Sync>>;

    async fn save(
        &self,
        key: &SnapshotKey,
        theater: &Theater,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Human-readable location of the snapshot for `key`
    fn location(&self, key: &SnapshotKey) -> String;
}
