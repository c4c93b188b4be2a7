//! Conversion between [`PscDocument`] and the column values of a
//! `psc_records` row.

use chrono::{DateTime, Utc};
use psc_core::{delta::DeltaAt, psc::PscDocument};

use crate::Result;

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

/// Column values for one upsert.
pub struct RecordRow {
  pub notification_id: String,
  pub company_number:  String,
  pub kind:            String,
  pub delta_at:        String,
  pub updated_at:      String,
  pub document:        String,
}

impl RecordRow {
  pub fn new(id: &str, document: &PscDocument, delta_at: DeltaAt) -> Result<Self> {
    Ok(Self {
      notification_id: id.to_owned(),
      company_number:  document.company_number.clone(),
      kind:            document.data.kind.clone(),
      delta_at:        delta_at.to_string(),
      updated_at:      encode_dt(document.updated.at),
      document:        psc_document::to_document_string(document)?,
    })
  }
}

pub fn decode_document(text: &str) -> Result<PscDocument> {
  Ok(psc_document::from_document_str(text)?)
}
