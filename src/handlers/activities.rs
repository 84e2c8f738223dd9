use axum::Json;

use crate::models::activity::{Activity, ActivityInfo};

pub async fn list_activities() -> Json<Vec<ActivityInfo>> {
    Json(Activity::ALL.into_iter().map(ActivityInfo::from).collect())
}
