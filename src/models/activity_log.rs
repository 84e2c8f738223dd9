use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::day::DayKey;
use crate::models::activity::ActivityFlags;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: Uuid,
    /// UTC midnight of the logged day.
    pub date: DateTime<Utc>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub flags: ActivityFlags,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActivityLog {
    pub fn day(&self) -> DayKey {
        DayKey::from_datetime(self.date)
    }
}

/// Row to insert for a day that has no log yet.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub date: DateTime<Utc>,
    pub flags: ActivityFlags,
}

impl NewActivityLog {
    pub fn for_day(day: DayKey, flags: ActivityFlags) -> Self {
        Self {
            date: day.start_of_day(),
            flags,
        }
    }
}

/// POST /api/logs
///
/// `physicalActivity` is required; the other flags default to `false`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDayRequest {
    pub date: Option<DayKey>,
    pub physical_activity: bool,
    #[serde(default)]
    pub reading: bool,
    #[serde(default)]
    pub coding_learning: bool,
    #[serde(default)]
    pub writing_tweeting: bool,
    #[serde(default)]
    pub protein: bool,
}

impl RecordDayRequest {
    pub fn flags(&self) -> ActivityFlags {
        ActivityFlags {
            physical_activity: self.physical_activity,
            reading: self.reading,
            coding_learning: self.coding_learning,
            writing_tweeting: self.writing_tweeting,
            protein: self.protein,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Created,
    Updated,
}

#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub status: RecordStatus,
    pub log: ActivityLog,
}

#[derive(Debug, Serialize)]
pub struct RecordDayResponse {
    pub message: String,
    pub log: ActivityLog,
}

impl From<RecordOutcome> for RecordDayResponse {
    fn from(outcome: RecordOutcome) -> Self {
        let verb = match outcome.status {
            RecordStatus::Created => "created",
            RecordStatus::Updated => "updated",
        };
        Self {
            message: format!("Activity log {verb} successfully"),
            log: outcome.log,
        }
    }
}

/// GET /api/logs
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub from: Option<DayKey>,
    pub to: Option<DayKey>,
}
