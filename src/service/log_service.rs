//! Day-log use cases on top of a [`LogStore`].
//!
//! # Invariants
//! - Every lookup and write is keyed by the `[start, start + 24h)` interval
//!   of a [`DayKey`], never by an exact instant.
//! - A second check-in for a day replaces all five flags of the existing log.

use std::sync::Arc;

use crate::day::DayKey;
use crate::models::activity::ActivityFlags;
use crate::models::activity_log::{ActivityLog, NewActivityLog, RecordOutcome, RecordStatus};
use crate::store::{LogStore, StoreResult};

#[derive(Clone)]
pub struct LogService {
    store: Arc<dyn LogStore>,
}

impl LogService {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn LogStore> {
        &self.store
    }

    /// Creates the log for `day`, or overwrites its flags if one exists.
    pub async fn record_day(&self, day: DayKey, flags: ActivityFlags) -> StoreResult<RecordOutcome> {
        let (start, end) = day.bounds();

        let outcome = match self.store.find_in_range(start, end).await? {
            Some(existing) => {
                let log = self.store.replace_flags(existing.id, flags).await?;
                RecordOutcome {
                    status: RecordStatus::Updated,
                    log,
                }
            }
            None => {
                let log = self.store.insert(NewActivityLog::for_day(day, flags)).await?;
                RecordOutcome {
                    status: RecordStatus::Created,
                    log,
                }
            }
        };

        tracing::info!(
            day = %day,
            status = ?outcome.status,
            log_id = %outcome.log.id,
            completed = outcome.log.flags.completed_count(),
            "Recorded day"
        );

        Ok(outcome)
    }

    pub async fn get_by_date(&self, day: DayKey) -> StoreResult<Option<ActivityLog>> {
        let (start, end) = day.bounds();
        self.store.find_in_range(start, end).await
    }

    pub async fn get_all(&self) -> StoreResult<Vec<ActivityLog>> {
        self.store.list_all().await
    }

    /// Logs from `from` through `to`, both days inclusive.
    pub async fn get_range(
        &self,
        from: Option<DayKey>,
        to: Option<DayKey>,
    ) -> StoreResult<Vec<ActivityLog>> {
        if from.is_none() && to.is_none() {
            return self.get_all().await;
        }
        let start = from.map(|day| day.start_of_day());
        let end = to.map(|day| day.bounds().1);
        self.store.list_between(start, end).await
    }
}
