//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use nexgen_core::{DomainFailure, FieldErrors};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("validation failed: {0}")]
  Validation(FieldErrors),

  #[error("conflict: {0}")]
  Conflict(FieldErrors),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store failure: domain rejections keep their field messages,
  /// everything else becomes an opaque 500.
  pub fn from_store<E>(err: E) -> Self
  where
    E: std::error::Error + DomainFailure + Send + Sync + 'static,
  {
    match err.domain() {
      Some(nexgen_core::Error::NotFound { entity, id }) => {
        Self::NotFound(format!("{entity} {id} not found"))
      }
      Some(nexgen_core::Error::Validation(fields)) => Self::Validation(fields.clone()),
      Some(nexgen_core::Error::Conflict(fields)) => Self::Conflict(fields.clone()),
      None => Self::Store(Box::new(err)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::Validation(fields) => (
        StatusCode::BAD_REQUEST,
        json!({ "error": "validation failed", "fields": fields }),
      ),
      ApiError::Conflict(fields) => (
        StatusCode::CONFLICT,
        json!({ "error": "conflict", "fields": fields }),
      ),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
      }
    };
    (status, Json(body)).into_response()
  }
}
