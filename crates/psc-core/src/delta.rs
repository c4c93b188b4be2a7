//! Delta recency: the strict `delta_at` timestamp and the staleness rule.
//!
//! A delta is stale when its `delta_at` is strictly earlier than the stored
//! one. Equal timestamps apply. The comparison here is pure; backends must
//! evaluate it atomically with the write (see
//! [`crate::store::PscStore::conditional_upsert`]).

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{Error, Result};

/// `yyyyMMddHHmmssSSSSSS`, always UTC.
pub const DELTA_AT_FORMAT: &str = "%Y%m%d%H%M%S%6f";

const DELTA_AT_LEN: usize = 20;

/// A parsed delta timestamp with microsecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeltaAt(NaiveDateTime);

impl DeltaAt {
  pub fn parse(s: &str) -> Result<Self> {
    if s.len() != DELTA_AT_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
      return Err(Error::bad_input(format!("malformed delta_at: {s:?}")));
    }
    NaiveDateTime::parse_from_str(s, DELTA_AT_FORMAT)
      .map(Self)
      .map_err(|e| Error::bad_input(format!("malformed delta_at {s:?}: {e}")))
  }

  pub fn as_naive(&self) -> NaiveDateTime { self.0 }
}

impl FromStr for DeltaAt {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl fmt::Display for DeltaAt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format(DELTA_AT_FORMAT))
  }
}

/// Whether `incoming` must be skipped given what is stored.
///
/// An absent or blank `stored` value is never stale. Both values are parsed
/// strictly; a malformed timestamp is an error, not "oldest possible".
pub fn is_stale(incoming: &str, stored: Option<&str>) -> Result<bool> {
  let incoming = DeltaAt::parse(incoming)?;
  match stored.map(str::trim).filter(|s| !s.is_empty()) {
    None => Ok(false),
    Some(stored) => Ok(incoming < DeltaAt::parse(stored)?),
  }
}

/// The result of offering a delta to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaOutcome {
  Applied,
  /// The stored record is newer; nothing changed.
  Stale,
}

impl DeltaOutcome {
  pub fn from_applied(applied: bool) -> Self {
    if applied { Self::Applied } else { Self::Stale }
  }
}
