//! Change events emitted after a record is applied or deleted.
//!
//! Publication itself belongs to a downstream collaborator behind
//! [`ChangeSink`]. This module only decides what the event says.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
  Result,
  context::RequestContext,
  psc::{PscData, PscDocument},
  resource_kind::{ResourceKind, map_resource_kind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
  Changed,
  Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
  #[serde(rename = "type")]
  pub kind:         EventType,
  pub published_at: DateTime<Utc>,
}

/// A resource-changed notification for one PSC record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceChanged {
  pub resource_kind: &'static str,
  pub resource_uri:  String,
  pub resource_id:   String,
  pub context_id:    String,
  pub event:         ChangeEvent,
  /// The public partition of a deleted record.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub deleted_data:  Option<PscData>,
}

impl ResourceChanged {
  /// Build the event for `document`, or `None` when its kind has no resource
  /// kind downstream.
  pub fn for_document(
    ctx: &RequestContext,
    document: &PscDocument,
    kind: EventType,
    now: DateTime<Utc>,
  ) -> Option<Self> {
    let ResourceKind::Mapped(resource_kind) =
      map_resource_kind(&document.data.kind)
    else {
      return None;
    };

    Some(Self {
      resource_kind,
      resource_uri: document.data.links.self_link.clone(),
      resource_id: document.notification_id.clone(),
      context_id: ctx.request_id.clone(),
      event: ChangeEvent {
        kind,
        published_at: now,
      },
      deleted_data: match kind {
        EventType::Deleted => Some(document.data.clone()),
        EventType::Changed => None,
      },
    })
  }
}

/// Destination for change events. Implementations own delivery; there is no
/// retry here.
pub trait ChangeSink: Send + Sync {
  fn publish(&self, event: &ResourceChanged) -> Result<()>;
}
