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

  #[error(transparent)]
  Core(#[from] psc_core::Error),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    use psc_core::Error as E;
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) | ApiError::Core(E::BadInput(_)) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Core(E::Serialization(_)) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Core(E::StoreUnavailable(_) | E::Downstream(_)) => {
        StatusCode::SERVICE_UNAVAILABLE
      }
      ApiError::Core(E::StoreTimeout(_)) => StatusCode::GATEWAY_TIMEOUT,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
