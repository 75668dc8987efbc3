//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by a trigger handler.
///
/// Only raised before a round starts; once a round runs, the handler always
/// answers 200 with its outcome.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The body was not a JSON document.
  #[error("malformed trigger body: {}", .0.body_text())]
  Malformed(#[from] JsonRejection),
  #[error("invalid trigger payload: {0}")]
  InvalidPayload(#[from] carelink_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Malformed(_) | ApiError::InvalidPayload(_) => {
        StatusCode::BAD_REQUEST
      }
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
