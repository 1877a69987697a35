//! Submission analysis and the mistake decision layer.

use axum::{
  extract::{Query, State},
  Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

use crate::config::{DEFAULT_LOG_LIMIT, DEFAULT_LOG_WINDOW_DAYS};
use crate::db::{self, try_lock, LogFilter};
use crate::domain::{DecisionLog, FeedbackRequest, JudgeRequest, JudgeResponse};
use crate::error::{ApiError, ApiResult};
use crate::filter::{analyze_submission, AnalysisReport, AnalyzeRequest};
use crate::services::{self, SubmissionRequest, SubmissionResult};
use crate::state::AppState;

use super::{today, Paging};

/// POST /api/v1/ai/analyze
pub async fn analyze(Json(request): Json<AnalyzeRequest>) -> Json<AnalysisReport> {
  let report = analyze_submission(&request);
  tracing::debug!(
    "Analyzed submission {}: score {:.1}, {} mistakes",
    request.submission_id,
    report.score,
    report.error_contexts.len()
  );
  Json(report)
}

/// POST /api/v1/submission
pub async fn submit(
  State(state): State<AppState>,
  Json(request): Json<SubmissionRequest>,
) -> ApiResult<Json<SubmissionResult>> {
  let conn = try_lock(&state.db)?;
  let result = services::submit(&conn, state.judge.as_ref(), request, today(), Utc::now())?;
  Ok(Json(result))
}

/// POST /api/v1/filter/judge
pub async fn judge(
  State(state): State<AppState>,
  Json(request): Json<JudgeRequest>,
) -> ApiResult<Json<JudgeResponse>> {
  let conn = try_lock(&state.db)?;
  let response = services::judge_mistake(&conn, state.judge.as_ref(), &request, today(), Utc::now())?;
  Ok(Json(response))
}

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
  pub skip: Option<i64>,
  pub limit: Option<i64>,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub student_id: Option<String>,
}

impl LogQuery {
  fn into_filter(self, today: NaiveDate) -> ApiResult<LogFilter> {
    let end_date = self.end_date.unwrap_or(today);
    let start_date = match self.start_date {
      Some(start) => start,
      None => end_date
        .checked_sub_signed(Duration::days(DEFAULT_LOG_WINDOW_DAYS - 1))
        .ok_or_else(|| {
          ApiError::InvalidInput(format!("end_date {} is too early for a default window", end_date))
        })?,
    };
    if end_date < start_date {
      return Err(ApiError::InvalidInput(format!(
        "end_date {} is before start_date {}",
        end_date, start_date
      )));
    }

    let (skip, limit) = Paging {
      skip: self.skip,
      limit: self.limit,
    }
    .resolve(DEFAULT_LOG_LIMIT);

    Ok(LogFilter {
      skip,
      limit,
      start_date,
      end_date,
      student_id: self.student_id,
    })
  }
}

/// GET /api/v1/filter/logs
pub async fn list_logs(
  State(state): State<AppState>,
  Query(query): Query<LogQuery>,
) -> ApiResult<Json<Vec<DecisionLog>>> {
  let filter = query.into_filter(today())?;
  let conn = try_lock(&state.db)?;
  Ok(Json(db::list_decision_logs(&conn, &filter)?))
}

/// POST /api/v1/filter/feedback
pub async fn feedback(
  State(state): State<AppState>,
  Json(request): Json<FeedbackRequest>,
) -> ApiResult<Json<DecisionLog>> {
  let conn = try_lock(&state.db)?;
  Ok(Json(services::record_feedback(&conn, &request)?))
}
