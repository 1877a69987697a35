//! Request-level errors and their HTTP mapping.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::db::DbLockError;
use crate::domain::SrsError;

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("{0}")]
  InvalidInput(String),

  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("{0}")]
  AlreadyExists(String),

  #[error("{0}")]
  InvalidState(String),

  /// Optimistic write lost against a concurrent update
  #[error("{0}")]
  Conflict(String),

  #[error("Database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error(transparent)]
  DatabaseUnavailable(#[from] DbLockError),
}

impl From<SrsError> for ApiError {
  fn from(e: SrsError) -> Self {
    match e {
      SrsError::InvalidInput(_) => Self::InvalidInput(e.to_string()),
      SrsError::DateOutOfRange { .. } => Self::InvalidState(e.to_string()),
    }
  }
}

impl ApiError {
  pub fn status_code(&self) -> StatusCode {
    match self {
      Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::AlreadyExists(_) | Self::InvalidState(_) => StatusCode::BAD_REQUEST,
      Self::Conflict(_) => StatusCode::CONFLICT,
      Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
      Self::DatabaseUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!("{}", self);
    } else {
      tracing::debug!("Request rejected ({}): {}", status, self);
    }
    (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
  }
}

pub type ApiResult<T> = Result<T, ApiError>;
