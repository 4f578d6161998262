use async_trait::async_trait;
use boxoffice_core::{SnapshotKey, Theater, TheaterRepository};
use std::collections::HashMap;
use std::sync::Mutex;
use crate::StoreError;

/// In-memory snapshot store, used for dry runs and tests
#[derive(Debug, Default)]
pub struct InMemoryTheaterRepository {
    snapshots: Mutex<HashMap<SnapshotKey, Theater>>,
}

impl InMemoryTheaterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TheaterRepository for InMemoryTheaterRepository {
    async fn load(
        &self,
        key: &SnapshotKey,
    ) -> Result<Option<Theater>, Box<dyn std::error::Error + Send + Sync>> {
        let snapshots = self.snapshots.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(snapshots.get(key).cloned())
    }

    async fn save(
        &self,
        key: &SnapshotKey,
        theater: &Theater,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut snapshots = self.snapshots.lock().map_err(|_| StoreError::Poisoned)?;
        snapshots.insert(key.clone(), theater.clone());
        Ok(())
    }

    fn location(&self, key: &SnapshotKey) -> String {
        format!("memory://{}", key)
    }
}
