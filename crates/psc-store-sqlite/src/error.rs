//! Error type for `psc-store-sqlite`.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("document error: {0}")]
  Document(#[from] psc_document::Error),

  #[error("store call timed out after {0:?}")]
  Timeout(Duration),

  #[error("corrupt stored row: {0}")]
  CorruptRow(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for psc_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Database(e) => Self::StoreUnavailable(Box::new(e)),
      Error::Document(e) => Self::Serialization(e.to_string()),
      Error::Timeout(after) => Self::StoreTimeout(after),
      Error::CorruptRow(reason) => Self::Serialization(reason),
    }
  }
}
