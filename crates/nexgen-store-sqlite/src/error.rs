//! Error type for `nexgen-store-sqlite`.

use nexgen_core::DomainFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain rule rejected the write; carried through to callers unchanged.
  #[error(transparent)]
  Core(#[from] nexgen_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown {column} value in database: {value:?}")]
  UnknownDiscriminant { column: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl DomainFailure for Error {
  fn domain(&self) -> Option<&nexgen_core::Error> {
    match self {
      Self::Core(e) => Some(e),
      _ => None,
    }
  }
}
