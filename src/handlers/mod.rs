pub mod cards;
pub mod coach;
pub mod filter;
pub mod report;
pub mod students;

use axum::{
  routing::{get, post, put},
  Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Offset/limit pair shared by list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct Paging {
  pub skip: Option<i64>,
  pub limit: Option<i64>,
}

impl Paging {
  pub fn resolve(&self, default_limit: i64) -> (i64, i64) {
    (self.skip.unwrap_or(0).max(0), self.limit.unwrap_or(default_limit).max(0))
  }
}

/// Calendar date used for scheduling decisions made during this request
pub(crate) fn today() -> NaiveDate {
  Utc::now().date_naive()
}

pub async fn index() -> Json<serde_json::Value> {
  Json(serde_json::json!({ "message": "Pacer learning backend is running" }))
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(index))
    .route(
      "/api/v1/student",
      post(students::create_student).get(students::list_students),
    )
    .route("/api/v1/student/{student_id}", get(students::get_student))
    .route(
      "/api/v1/student/{student_id}/settings",
      put(students::update_settings),
    )
    .route(
      "/api/v1/student/{student_id}/daily_review_deck",
      get(cards::daily_review_deck),
    )
    .route("/api/v1/student/{student_id}/cards", get(cards::student_cards))
    .route("/api/v1/cards/{card_id}", get(cards::get_card))
    .route("/api/v1/cards/{card_id}/review", post(cards::review_card))
    .route("/api/v1/ai/analyze", post(filter::analyze))
    .route("/api/v1/submission", post(filter::submit))
    .route("/api/v1/filter/judge", post(filter::judge))
    .route("/api/v1/filter/logs", get(filter::list_logs))
    .route("/api/v1/filter/feedback", post(filter::feedback))
    .route("/api/v1/coach/memo", post(coach::create_memo))
    .route(
      "/api/v1/coach/student/{student_id}/memos",
      get(coach::list_memos),
    )
    .route(
      "/api/v1/report/student/{student_id}/period",
      get(report::period_report),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
