//! Per-request context, passed explicitly into every ingestion call.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
  /// Correlation id for logs and change events.
  pub request_id: String,
}

impl RequestContext {
  pub fn new(request_id: impl Into<String>) -> Self {
    Self {
      request_id: request_id.into(),
    }
  }

  /// Use the caller-supplied id when present and non-blank, otherwise mint
  /// one.
  pub fn from_header(value: Option<&str>) -> Self {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
      Some(id) => Self::new(id),
      None => Self::generated(),
    }
  }

  pub fn generated() -> Self { Self::new(Uuid::new_v4().to_string()) }
}
