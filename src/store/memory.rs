use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{LogStore, StoreError, StoreResult};
use crate::models::activity::ActivityFlags;
use crate::models::activity_log::{ActivityLog, NewActivityLog};

/// Process-local store. Logs are kept sorted by `date`.
#[derive(Clone, Default)]
pub struct MemoryLogStore {
    logs: Arc<RwLock<Vec<ActivityLog>>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.logs.read().await.is_empty()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Option<ActivityLog>> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .find(|log| log.date >= start && log.date < end)
            .cloned())
    }

    async fn insert(&self, log: NewActivityLog) -> StoreResult<ActivityLog> {
        let mut logs = self.logs.write().await;
        let pos = match logs.binary_search_by(|existing| existing.date.cmp(&log.date)) {
            Ok(_) => return Err(StoreError::DuplicateDay(log.date)),
            Err(pos) => pos,
        };

        let now = Utc::now();
        let inserted = ActivityLog {
            id: Uuid::new_v4(),
            date: log.date,
            flags: log.flags,
            created_at: now,
            updated_at: now,
        };
        logs.insert(pos, inserted.clone());
        Ok(inserted)
    }

    async fn replace_flags(&self, id: Uuid, flags: ActivityFlags) -> StoreResult<ActivityLog> {
        let mut logs = self.logs.write().await;
        let log = logs
            .iter_mut()
            .find(|log| log.id == id)
            .ok_or(StoreError::Missing(id))?;
        log.flags = flags;
        log.updated_at = Utc::now();
        Ok(log.clone())
    }

    async fn list_all(&self) -> StoreResult<Vec<ActivityLog>> {
        Ok(self.logs.read().await.clone())
    }

    async fn list_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<ActivityLog>> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|log| start.map_or(true, |s| log.date >= s))
            .filter(|log| end.map_or(true, |e| log.date < e))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
