use async_trait::async_trait;
use boxoffice_core::{SnapshotKey, Theater, TheaterRepository};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;
use crate::StoreError;

/// What is written to disk for one theater
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub saved_at: DateTime<Utc>,
    pub run_id: Uuid,
    pub theater: Theater,
}

/// Stores snapshots as JSON under `<data_dir>/<event>/<digest>.json`
#[derive(Debug, Clone)]
pub struct FileSnapshotRepository {
    data_dir: PathBuf,
    run_id: Uuid,
}

impl FileSnapshotRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            run_id: Uuid::new_v4(),
        }
    }

    /// Id stamped on every record this repository writes
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Directory for an event's snapshots. The event must be a single plain
    /// path component so it cannot escape `data_dir`.
    fn event_dir(&self, event: &str) -> Result<PathBuf, StoreError> {
        if event.is_empty() {
            return Ok(self.data_dir.clone());
        }

        let mut components = Path::new(event).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !event.contains(['/', '\\', '\0']) => {
                Ok(self.data_dir.join(event))
            }
            _ => Err(StoreError::InvalidEvent(event.to_string())),
        }
    }

    pub fn snapshot_path(&self, key: &SnapshotKey) -> Result<PathBuf, StoreError> {
        Ok(self.event_dir(&key.event)?.join(format!("{}.json", key.digest)))
    }

    async fn read_record(&self, key: &SnapshotKey) -> Result<Option<SnapshotRecord>, StoreError> {
        let dir = self.event_dir(&key.event)?;
        if !tokio::fs::try_exists(&dir).await.map_err(|e| StoreError::io(&dir, e))? {
            info!("No snapshot directory at {}, starting fresh", dir.display());
            return Ok(None);
        }

        let path = self.snapshot_path(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No snapshot at {}, starting fresh", path.display());
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let record: SnapshotRecord = serde_json::from_slice(&bytes)?;
        record.theater.validate()?;

        debug!(
            path = %path.display(),
            run_id = %record.run_id,
            saved_at = %record.saved_at,
            "Snapshot read"
        );
        Ok(Some(record))
    }

    async fn write_record(&self, key: &SnapshotKey, theater: &Theater) -> Result<PathBuf, StoreError> {
        let dir = self.event_dir(&key.event)?;
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::io(&dir, e))?;

        let record = SnapshotRecord {
            saved_at: Utc::now(),
            run_id: self.run_id,
            theater: theater.clone(),
        };
        let json = serde_json::to_vec_pretty(&record)?;

        // Write beside the target and rename so a crash never leaves half a file
        let path = self.snapshot_path(key)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        Ok(path)
    }
}

#[async_trait]
impl TheaterRepository for FileSnapshotRepository {
    async fn load(
        &self,
        key: &SnapshotKey,
    ) -> Result<Option<Theater>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.read_record(key).await?.map(|record| record.theater))
    }

    async fn save(
        &self,
        key: &SnapshotKey,
        theater: &Theater,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = self.write_record(key, theater).await?;
        info!("Snapshot saved to {}", path.display());
        Ok(())
    }

    fn location(&self, key: &SnapshotKey) -> String {
        match self.snapshot_path(key) {
            Ok(path) => path.display().to_string(),
            Err(_) => format!("<invalid event '{}'>", key.event),
        }
    }
}
