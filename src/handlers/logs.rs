use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::day::DayKey;
use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::models::activity_log::{
    ActivityLog, LogQuery, RecordDayRequest, RecordDayResponse, RecordStatus,
};
use crate::AppState;

pub async fn list_logs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LogQuery>,
) -> AppResult<Json<Vec<ActivityLog>>> {
    let logs = state.logs.get_range(query.from, query.to).await?;
    Ok(Json(logs))
}

/// Creates the day's log (201) or replaces its flags (200).
pub async fn record_log(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RecordDayRequest>,
) -> AppResult<(StatusCode, Json<RecordDayResponse>)> {
    let day = body.date.unwrap_or_else(DayKey::today);
    let outcome = state.logs.record_day(day, body.flags()).await?;

    let status = match outcome.status {
        RecordStatus::Created => StatusCode::CREATED,
        RecordStatus::Updated => StatusCode::OK,
    };
    Ok((status, Json(outcome.into())))
}

/// `null` when nothing was logged that day.
pub async fn get_log_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<Option<ActivityLog>>> {
    let day = DayKey::parse(&date)?;
    let log = state.logs.get_by_date(day).await?;
    Ok(Json(log))
}
