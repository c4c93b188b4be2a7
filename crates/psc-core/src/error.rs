//! Error types for `psc-core`.
//!
//! Every failure that crosses a crate boundary is folded into one of these
//! kinds. A stale delta is not an error; see [`crate::delta::DeltaOutcome`].

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed caller input: an unparsable payload, a bad timestamp, an
  /// empty link list.
  #[error("bad input: {0}")]
  BadInput(String),

  /// A stored document could not be converted to or from the object model.
  #[error("serialization error: {0}")]
  Serialization(String),

  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store round trip timed out after {0:?}")]
  StoreTimeout(Duration),

  /// Publishing a change event to the downstream sink failed.
  #[error("downstream publication failed: {0}")]
  Downstream(String),
}

impl Error {
  pub fn bad_input(msg: impl Into<String>) -> Self { Self::BadInput(msg.into()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
