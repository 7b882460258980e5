//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The feature exists but the server was started without the
  /// configuration it needs.
  #[error("not configured: {0}")]
  Unavailable(&'static str),

  /// An upstream service (roster or summary provider) failed.
  #[error("upstream error: {0}")]
  Upstream(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(error: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(error))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unavailable(m) => {
        (StatusCode::SERVICE_UNAVAILABLE, (*m).to_owned())
      }
      ApiError::Upstream(m) => (StatusCode::BAD_GATEWAY, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    if status.is_server_error() {
      tracing::warn!(%status, %message, "request failed");
    }
    (status, Json(json!({ "error": message }))).into_response()
  }
}
