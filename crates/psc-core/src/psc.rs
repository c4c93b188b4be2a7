//! The stored object model: the public [`PscData`] partition, the restricted
//! [`PscSensitiveData`] partition and the [`PscDocument`] that holds both
//! under one identity.
//!
//! Field names are the stored document keys; nothing is case-transformed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::role::PscRole;

// ─── Shared sub-types ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address_line_1: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address_line_2: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub care_of:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub country:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub locality:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub po_box:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub postal_code:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub premises:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub region:         Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameElements {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub forename:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub other_forenames: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub middle_name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub surname:         Option<String>,
}

/// Registration details of a corporate entity or legal person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identification {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub legal_authority:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub legal_form:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub place_registered:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub registration_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub country_registered:  Option<String>,
}

/// A full date of birth. Only ever stored in the sensitive partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOfBirth {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub day:   Option<u8>,
  pub month: u8,
  pub year:  u16,
}

/// The publicly visible part of a date of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDateOfBirth {
  pub month: u8,
  pub year:  u16,
}

impl From<DateOfBirth> for PartialDateOfBirth {
  fn from(dob: DateOfBirth) -> Self {
    Self {
      month: dob.month,
      year:  dob.year,
    }
  }
}

/// Cross-reference links of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
  #[serde(rename = "self")]
  pub self_link:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub statements: Option<String>,
}

// ─── Partitions ──────────────────────────────────────────────────────────────

/// Fields visible to any consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PscData {
  /// Upstream kind, kept verbatim even when it is not a recognised role.
  pub kind: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub etag: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name_elements: Option<NameElements>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub nationality: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub country_of_residence: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address: Option<Address>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub natures_of_control: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notified_on: Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ceased_on: Option<NaiveDate>,
  #[serde(default)]
  pub ceased: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_of_birth: Option<PartialDateOfBirth>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub identification: Option<Identification>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_sanctioned: Option<bool>,
  /// Set for super-secure records in place of any identifying detail.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub principal_office_address: Option<Address>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub service_address_same_as_registered_office_address: Option<bool>,
  pub links: Links,
}

/// Fields that require elevated access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PscSensitiveData {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub usual_residential_address: Option<Address>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub residential_address_same_as_service_address: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_of_birth: Option<DateOfBirth>,
}

// ─── Document ────────────────────────────────────────────────────────────────

/// Audit stamp written on every applied delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Updated {
  pub at:   DateTime<Utc>,
  pub by:   String,
  #[serde(rename = "type")]
  pub kind: String,
}

/// One logical PSC record: both partitions under a single identity.
///
/// The partitions are never stored, replaced or deleted independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PscDocument {
  #[serde(rename = "_id")]
  pub id:              String,
  pub notification_id: String,
  pub company_number:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub psc_id:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub internal_id:     Option<String>,
  /// Recency of the delta that produced this state, in
  /// [`crate::delta::DELTA_AT_FORMAT`].
  pub delta_at:        String,
  /// Absent when `data.kind` is not a recognised role.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role:            Option<PscRole>,
  pub updated:         Updated,
  pub data:            PscData,
  #[serde(default)]
  pub sensitive_data:  PscSensitiveData,
}
