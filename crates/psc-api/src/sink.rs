//! A [`ChangeSink`] that writes change events to the log.

use psc_core::{
  Error, Result,
  changes::{ChangeSink, ResourceChanged},
};

/// Emits each event as a structured `info` line under the `psc::changes`
/// target, for a log shipper to forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ChangeSink for TracingSink {
  fn publish(&self, event: &ResourceChanged) -> Result<()> {
    let payload = serde_json::to_string(event)
      .map_err(|e| Error::Downstream(format!("cannot render change event: {e}")))?;
    tracing::info!(
      target: "psc::changes",
      context_id = %event.context_id,
      resource_kind = event.resource_kind,
      resource_uri = %event.resource_uri,
      payload = %payload,
      "resource changed"
    );
    Ok(())
  }
}
