use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::config::DEFAULT_MEMO_LIMIT;
use crate::db::{self, try_lock};
use crate::domain::{CoachMemo, CoachMemoCreate};
use crate::error::ApiResult;
use crate::services;
use crate::state::AppState;

use super::Paging;

/// POST /api/v1/coach/memo
pub async fn create_memo(
  State(state): State<AppState>,
  Json(request): Json<CoachMemoCreate>,
) -> ApiResult<(StatusCode, Json<CoachMemo>)> {
  let conn = try_lock(&state.db)?;
  let memo = services::create_memo(&conn, &request, Utc::now())?;
  Ok((StatusCode::CREATED, Json(memo)))
}

#[derive(Debug, Deserialize)]
pub struct MemoQuery {
  pub coach_id: Option<String>,
  pub skip: Option<i64>,
  pub limit: Option<i64>,
}

/// GET /api/v1/coach/student/{student_id}/memos
pub async fn list_memos(
  State(state): State<AppState>,
  Path(student_id): Path<String>,
  Query(query): Query<MemoQuery>,
) -> ApiResult<Json<Vec<CoachMemo>>> {
  let (skip, limit) = Paging {
    skip: query.skip,
    limit: query.limit,
  }
  .resolve(DEFAULT_MEMO_LIMIT);

  let conn = try_lock(&state.db)?;
  services::require_student(&conn, &student_id)?;
  let memos = db::list_memos(
    &conn,
    &student_id,
    query.coach_id.as_deref(),
    skip,
    limit,
  )?;
  Ok(Json(memos))
}
