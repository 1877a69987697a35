use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  Json,
};
use chrono::Utc;

use crate::config::DEFAULT_STUDENT_LIMIT;
use crate::db::{self, try_lock};
use crate::domain::{Student, StudentCreate, StudentSettingsUpdate};
use crate::error::{ApiError, ApiResult};
use crate::services;
use crate::state::AppState;

use super::Paging;

/// POST /api/v1/student
pub async fn create_student(
  State(state): State<AppState>,
  Json(request): Json<StudentCreate>,
) -> ApiResult<(StatusCode, Json<Student>)> {
  let conn = try_lock(&state.db)?;
  let student = services::create_student(&conn, &request, Utc::now())?;
  Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/student
pub async fn list_students(
  State(state): State<AppState>,
  Query(paging): Query<Paging>,
) -> ApiResult<Json<Vec<Student>>> {
  let (skip, limit) = paging.resolve(DEFAULT_STUDENT_LIMIT);
  let conn = try_lock(&state.db)?;
  Ok(Json(db::list_students(&conn, skip, limit)?))
}

/// GET /api/v1/student/{student_id}
pub async fn get_student(
  State(state): State<AppState>,
  Path(student_id): Path<String>,
) -> ApiResult<Json<Student>> {
  let conn = try_lock(&state.db)?;
  Ok(Json(services::require_student(&conn, &student_id)?))
}

/// PUT /api/v1/student/{student_id}/settings
///
/// Replaces the whole settings object.
pub async fn update_settings(
  State(state): State<AppState>,
  Path(student_id): Path<String>,
  Json(request): Json<StudentSettingsUpdate>,
) -> ApiResult<Json<Student>> {
  let conn = try_lock(&state.db)?;
  let student = db::update_student_settings(&conn, &student_id, &request.settings)?
    .ok_or(ApiError::NotFound("Student"))?;
  tracing::info!(
    "Updated settings for {} (budget {})",
    student_id,
    student.settings.budget_per_day()
  );
  Ok(Json(student))
}
