use axum::{
  extract::{Path, Query, State},
  Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::try_lock;
use crate::error::ApiResult;
use crate::report::{generate_weekly_report, WeeklyReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
}

/// GET /api/v1/report/student/{student_id}/period?start_date=..&end_date=..
pub async fn period_report(
  State(state): State<AppState>,
  Path(student_id): Path<String>,
  Query(period): Query<PeriodQuery>,
) -> ApiResult<Json<WeeklyReport>> {
  let conn = try_lock(&state.db)?;
  let report = generate_weekly_report(&conn, &student_id, period.start_date, period.end_date)?;
  Ok(Json(report))
}
