use axum::{extract::State, Json};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::stats::{self, CalendarDay, DashboardSummary, YearCalendar};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct YearQuery {
    #[validate(range(min = 1970, max = 9999, message = "year must be between 1970 and 9999"))]
    pub year: Option<i32>,
}

impl YearQuery {
    fn year_or_current(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }
}

pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardSummary>> {
    let logs = state.logs.get_all().await?;
    Ok(Json(stats::dashboard(&logs)))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> AppResult<Json<YearCalendar>> {
    query.validate()?;
    let logs = state.logs.get_all().await?;
    Ok(Json(stats::year_calendar(query.year_or_current(), &logs)))
}

pub async fn get_history(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> AppResult<Json<Vec<CalendarDay>>> {
    query.validate()?;
    let logs = state.logs.get_all().await?;
    let today = Utc::now().date_naive();
    Ok(Json(stats::history(query.year_or_current(), today, &logs)))
}
