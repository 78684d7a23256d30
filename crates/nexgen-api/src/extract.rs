//! A JSON body extractor whose failures share the validation error shape.
//!
//! Deserialization errors (missing fields, out-of-range enum codes,
//! malformed dates) are reported per field the same way store-side
//! validation failures are, as `400 {"error", "fields"}`.

use axum::{
  Json,
  extract::{FromRequest, Request, rejection::JsonRejection},
};
use nexgen_core::FieldErrors;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// Field used when a failure cannot be pinned to a single field.
const BODY_FIELD: &str = "body";

/// Like [`Json`], but rejects with [`ApiError::Validation`] and runs the
/// body's declared `#[validate]` rules before the handler sees it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
  T: DeserializeOwned + Validate,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(|rejection| ApiError::Validation(rejection_fields(&rejection)))?;

    value
      .validate()
      .map_err(|errors| ApiError::Validation(FieldErrors::from(&errors)))?;

    Ok(Self(value))
  }
}

fn rejection_fields(rejection: &JsonRejection) -> FieldErrors {
  match rejection {
    JsonRejection::JsonDataError(_) => data_error_fields(&rejection.body_text()),
    JsonRejection::JsonSyntaxError(_) => {
      FieldErrors::single(BODY_FIELD, "Malformed JSON.")
    }
    JsonRejection::MissingJsonContentType(_) => FieldErrors::single(
      BODY_FIELD,
      "Expected request with `Content-Type: application/json`.",
    ),
    _ => FieldErrors::single(BODY_FIELD, rejection.body_text()),
  }
}

/// Split a serde data error of the form `path: message at line L column C`
/// into a field and message.
fn data_error_fields(text: &str) -> FieldErrors {
  let detail = text.split_once(": ").map_or(text, |(_, rest)| rest);
  let detail = detail
    .rsplit_once(" at line ")
    .map_or(detail, |(head, _)| head);

  if let Some(rest) = detail.strip_prefix("missing field `")
    && let Some((field, _)) = rest.split_once('`')
  {
    return FieldErrors::single(field, "This field is required.");
  }

  match detail.split_once(": ") {
    Some((path, message)) if is_field_path(path) => {
      FieldErrors::single(path, message)
    }
    _ => FieldErrors::single(BODY_FIELD, detail),
  }
}

fn is_field_path(path: &str) -> bool {
  !path.is_empty()
    && path
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}
