//! Error types for `nexgen-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: Uuid },

  /// Input was rejected; messages are keyed by the offending field.
  #[error("validation failed: {0}")]
  Validation(FieldErrors),

  /// A uniqueness or role-slot rule was violated.
  #[error("conflict: {0}")]
  Conflict(FieldErrors),
}

impl Error {
  pub fn not_found(entity: &'static str, id: Uuid) -> Self {
    Self::NotFound { entity, id }
  }

  /// A single-field conflict, e.g. a duplicate identifier.
  pub fn conflict(field: &str, message: impl Into<String>) -> Self {
    Self::Conflict(FieldErrors::single(field, message))
  }

  /// A single-field validation failure.
  pub fn invalid(field: &str, message: impl Into<String>) -> Self {
    Self::Validation(FieldErrors::single(field, message))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Implemented by backend error types so that outer layers can recover the
/// domain-level failure (if any) without depending on a concrete backend.
pub trait DomainFailure {
  fn domain(&self) -> Option<&Error>;
}

impl DomainFailure for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}
