//! Per-type schema descriptors for the document codec.

use psc_core::psc::{PscData, PscDocument, PscSensitiveData};
use serde::{Serialize, de::DeserializeOwned};

/// A type that can be written to and read from a stored document.
///
/// `DATE_FIELDS` lists the JSON pointers of date-only fields that are stored
/// as extended dates rather than plain `yyyy-mm-dd` strings.
pub trait DocumentShape: Serialize + DeserializeOwned {
  const DATE_FIELDS: &'static [&'static str];
}

impl DocumentShape for PscData {
  const DATE_FIELDS: &'static [&'static str] = &["/notified_on", "/ceased_on"];
}

impl DocumentShape for PscSensitiveData {
  const DATE_FIELDS: &'static [&'static str] = &[];
}

impl DocumentShape for PscDocument {
  const DATE_FIELDS: &'static [&'static str] =
    &["/data/notified_on", "/data/ceased_on"];
}
