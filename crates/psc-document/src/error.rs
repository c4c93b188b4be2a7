//! Error types for the psc-document codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An extended date node of the wrong shape, or a string that does not
  /// match the fixed pattern.
  #[error("bad extended date: {0}")]
  BadDate(String),

  #[error("malformed document at {path}: {reason}")]
  Malformed { path: String, reason: String },

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for psc_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::BadDate(msg) => Self::BadInput(msg),
      other => Self::Serialization(other.to_string()),
    }
  }
}
