use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{LogStore, StoreError, StoreResult};
use crate::models::activity::ActivityFlags;
use crate::models::activity_log::{ActivityLog, NewActivityLog};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgLogStore {
    pool: PgPool,
}

impl PgLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogStore for PgLogStore {
    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Option<ActivityLog>> {
        let log = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT * FROM activity_logs
            WHERE date >= $1 AND date < $2
            ORDER BY date ASC
            LIMIT 1
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    async fn insert(&self, log: NewActivityLog) -> StoreResult<ActivityLog> {
        let flags = log.flags;
        let inserted = sqlx::query_as::<_, ActivityLog>(
            r#"
            INSERT INTO activity_logs
                (id, date, physical_activity, reading, coding_learning, writing_tweeting, protein)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(log.date)
        .bind(flags.physical_activity)
        .bind(flags.reading)
        .bind(flags.coding_learning)
        .bind(flags.writing_tweeting)
        .bind(flags.protein)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == UNIQUE_VIOLATION);
            if duplicate {
                StoreError::DuplicateDay(log.date)
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(inserted)
    }

    async fn replace_flags(&self, id: Uuid, flags: ActivityFlags) -> StoreResult<ActivityLog> {
        sqlx::query_as::<_, ActivityLog>(
            r#"
            UPDATE activity_logs SET
                physical_activity = $2,
                reading = $3,
                coding_learning = $4,
                writing_tweeting = $5,
                protein = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(flags.physical_activity)
        .bind(flags.reading)
        .bind(flags.coding_learning)
        .bind(flags.writing_tweeting)
        .bind(flags.protein)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::Missing(id))
    }

    async fn list_all(&self) -> StoreResult<Vec<ActivityLog>> {
        let logs =
            sqlx::query_as::<_, ActivityLog>("SELECT * FROM activity_logs ORDER BY date ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(logs)
    }

    async fn list_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<ActivityLog>> {
        let logs = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT * FROM activity_logs
            WHERE ($1::timestamptz IS NULL OR date >= $1)
              AND ($2::timestamptz IS NULL OR date < $2)
            ORDER BY date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
