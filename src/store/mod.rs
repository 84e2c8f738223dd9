//! Log persistence.
//!
//! [`LogStore`] is the only owner of activity logs. Handlers and services see
//! it as `Arc<dyn LogStore>`, so the PostgreSQL store and the in-memory store
//! are interchangeable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::activity::ActivityFlags;
use crate::models::activity_log::{ActivityLog, NewActivityLog};

pub mod memory;
pub mod postgres;

pub use memory::MemoryLogStore;
pub use postgres::PgLogStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("A log already exists for {0}")]
    DuplicateDay(DateTime<Utc>),

    #[error("Log {0} does not exist")]
    Missing(Uuid),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait LogStore: Send + Sync {
    /// First log whose `date` lies in `[start, end)`.
    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Option<ActivityLog>>;

    async fn insert(&self, log: NewActivityLog) -> StoreResult<ActivityLog>;

    /// Overwrites all five flags of an existing log.
    async fn replace_flags(&self, id: Uuid, flags: ActivityFlags) -> StoreResult<ActivityLog>;

    /// Every log, oldest day first.
    async fn list_all(&self) -> StoreResult<Vec<ActivityLog>>;

    /// Logs with `start <= date < end`, oldest day first. Open on a side when
    /// that bound is `None`.
    async fn list_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<ActivityLog>>;

    /// Reachability check backing `/readyz`.
    async fn ping(&self) -> StoreResult<()>;
}
