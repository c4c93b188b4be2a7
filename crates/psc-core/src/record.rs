//! The inbound full-record delta as delivered by upstream.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::psc::{Address, Identification, Links, NameElements, PscSensitiveData};

/// A complete PSC record plus the delta metadata that establishes recency.
#[derive(Debug, Clone, Deserialize)]
pub struct FullRecord {
  pub external_data: ExternalData,
  pub internal_data: InternalData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalData {
  pub notification_id: String,
  pub company_number:  String,
  pub psc_id:          Option<String>,
  pub internal_id:     Option<String>,
  pub data:            Data,
  pub sensitive_data:  Option<PscSensitiveData>,
}

/// The public-facing half of the payload, still carrying the raw link list.
#[derive(Debug, Clone, Deserialize)]
pub struct Data {
  pub kind: String,
  pub etag: Option<String>,
  pub name: Option<String>,
  pub name_elements: Option<NameElements>,
  pub nationality: Option<String>,
  pub country_of_residence: Option<String>,
  pub address: Option<Address>,
  #[serde(default)]
  pub natures_of_control: Vec<String>,
  pub notified_on: Option<NaiveDate>,
  pub ceased_on: Option<NaiveDate>,
  pub identification: Option<Identification>,
  pub is_sanctioned: Option<bool>,
  pub description: Option<String>,
  pub principal_office_address: Option<Address>,
  pub service_address_same_as_registered_office_address: Option<bool>,
  /// Upstream sends a list; only the first entry is consulted.
  pub links: Option<Vec<Links>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InternalData {
  /// `yyyyMMddHHmmssSSSSSS`, UTC.
  pub delta_at:   String,
  pub updated_by: Option<String>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl FullRecord {
  /// Parse a wire payload. Any shape mismatch is bad input.
  pub fn from_json(body: &str) -> crate::Result<Self> {
    serde_json::from_str(body)
      .map_err(|e| crate::Error::bad_input(format!("unparsable full record: {e}")))
  }
}
