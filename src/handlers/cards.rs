use axum::{
  extract::{Path, State},
  Json,
};
use chrono::Utc;

use crate::db::{self, try_lock};
use crate::domain::{CardReviewRequest, Quality, ReviewCard};
use crate::error::{ApiError, ApiResult};
use crate::services;
use crate::srs::ReviewDeck;
use crate::state::AppState;

use super::today;

/// GET /api/v1/student/{student_id}/daily_review_deck
pub async fn daily_review_deck(
  State(state): State<AppState>,
  Path(student_id): Path<String>,
) -> ApiResult<Json<ReviewDeck>> {
  let conn = try_lock(&state.db)?;
  Ok(Json(services::daily_deck(&conn, &student_id, today())?))
}

/// GET /api/v1/student/{student_id}/cards
pub async fn student_cards(
  State(state): State<AppState>,
  Path(student_id): Path<String>,
) -> ApiResult<Json<Vec<ReviewCard>>> {
  let conn = try_lock(&state.db)?;
  services::require_student(&conn, &student_id)?;
  Ok(Json(db::get_student_cards(&conn, &student_id)?))
}

/// GET /api/v1/cards/{card_id}
pub async fn get_card(
  State(state): State<AppState>,
  Path(card_id): Path<i64>,
) -> ApiResult<Json<ReviewCard>> {
  let conn = try_lock(&state.db)?;
  let card = db::get_card_by_id(&conn, card_id)?.ok_or(ApiError::NotFound("Card"))?;
  Ok(Json(card))
}

/// POST /api/v1/cards/{card_id}/review
pub async fn review_card(
  State(state): State<AppState>,
  Path(card_id): Path<i64>,
  Json(request): Json<CardReviewRequest>,
) -> ApiResult<Json<ReviewCard>> {
  // Reject bad quality before touching storage
  let quality = Quality::try_from(request.quality)?;

  let conn = try_lock(&state.db)?;
  let card = services::review_card(&conn, card_id, quality, today(), Utc::now())?;
  Ok(Json(card))
}
