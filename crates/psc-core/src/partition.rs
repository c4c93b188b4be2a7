//! Splitting an inbound full record into its public and sensitive partitions.
//!
//! Pure field projection plus the derived fields (links, role, ceased flag,
//! public month/year of birth). Failures only come from the link builder.

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  context::RequestContext,
  links,
  psc::{PscData, PscDocument, PscSensitiveData, Updated},
  record::{ExternalData, FullRecord},
  role::{self, PscRole},
};

/// `updated.type` stamped on documents written from a delta.
pub const UPDATE_TYPE: &str = "psc_delta";

/// Project `external` into `(public, sensitive)`.
pub fn split(external: &ExternalData) -> Result<(PscData, PscSensitiveData)> {
  let links = links::build(external)?;
  let src = &external.data;
  let sensitive = external.sensitive_data.clone().unwrap_or_default();

  let date_of_birth = if role::is_individual(&src.kind) {
    sensitive.date_of_birth.map(Into::into)
  } else {
    None
  };

  let data = PscData {
    kind: src.kind.clone(),
    etag: src.etag.clone(),
    name: src.name.clone(),
    name_elements: src.name_elements.clone(),
    nationality: src.nationality.clone(),
    country_of_residence: src.country_of_residence.clone(),
    address: src.address.clone(),
    natures_of_control: src.natures_of_control.clone(),
    notified_on: src.notified_on,
    ceased_on: src.ceased_on,
    ceased: src.ceased_on.is_some(),
    date_of_birth,
    identification: src.identification.clone(),
    is_sanctioned: src.is_sanctioned,
    description: src.description.clone(),
    principal_office_address: src.principal_office_address.clone(),
    service_address_same_as_registered_office_address: src
      .service_address_same_as_registered_office_address,
    links,
  };

  Ok((data, sensitive))
}

/// Build the stored document for `record`: both partitions under one
/// identity, stamped as updated by this delta.
pub fn into_document(
  record: FullRecord,
  ctx: &RequestContext,
  now: DateTime<Utc>,
) -> Result<PscDocument> {
  let external = &record.external_data;
  if external.notification_id.trim().is_empty() {
    return Err(Error::bad_input("notification_id is blank"));
  }
  if external.company_number.trim().is_empty() {
    return Err(Error::bad_input("company_number is blank"));
  }

  let (data, sensitive_data) = split(external)?;
  let role = PscRole::from_kind(&data.kind);
  if role.is_none() {
    tracing::warn!(
      request_id = %ctx.request_id,
      notification_id = %external.notification_id,
      kind = %data.kind,
      "unrecognised PSC kind"
    );
  }

  let ExternalData {
    notification_id,
    company_number,
    psc_id,
    internal_id,
    ..
  } = record.external_data;

  Ok(PscDocument {
    id: notification_id.clone(),
    notification_id,
    company_number,
    psc_id,
    internal_id,
    delta_at: record.internal_data.delta_at,
    role,
    updated: Updated {
      at:   now,
      by:   record
        .internal_data
        .updated_by
        .unwrap_or_else(|| ctx.request_id.clone()),
      kind: UPDATE_TYPE.to_owned(),
    },
    data,
    sensitive_data,
  })
}
