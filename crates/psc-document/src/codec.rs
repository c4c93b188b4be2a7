//! Generic conversion between object-model types and stored documents.
//!
//! Writing serialises with serde (field names untouched, enums as their
//! labels) and then rewrites each declared date field into its extended form.
//! Reading reverses the date rewrite and deserialises into the requested
//! type.

use chrono::NaiveDate;
use serde_json::Value;

use crate::{DocumentShape, Error, Result, date};

/// Serialise `value` into a stored document.
pub fn to_document<T: DocumentShape>(value: &T) -> Result<Value> {
  let mut doc = serde_json::to_value(value)?;
  ensure_object(&doc)?;

  for &path in T::DATE_FIELDS {
    let Some(node) = doc.pointer_mut(path) else { continue };
    let encoded = match node {
      Value::Null => continue,
      Value::String(text) => date::encode(
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
          .map_err(|e| malformed(path, e))?,
      ),
      other => {
        return Err(malformed(path, format!("expected a date string, got {other}")));
      }
    };
    *node = encoded;
  }

  Ok(doc)
}

/// Deserialise a stored document into `T`.
pub fn from_document<T: DocumentShape>(mut doc: Value) -> Result<T> {
  ensure_object(&doc)?;

  for &path in T::DATE_FIELDS {
    let Some(node) = doc.pointer_mut(path) else { continue };
    if node.is_null() {
      continue;
    }
    let parsed = date::decode(node).map_err(|e| malformed(path, e))?;
    *node = Value::String(parsed.to_string());
  }

  Ok(serde_json::from_value(doc)?)
}

/// [`to_document`], rendered as compact JSON text.
pub fn to_document_string<T: DocumentShape>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(&to_document(value)?)?)
}

/// Parse JSON text and [`from_document`] it.
pub fn from_document_str<T: DocumentShape>(text: &str) -> Result<T> {
  from_document(serde_json::from_str(text)?)
}

fn ensure_object(doc: &Value) -> Result<()> {
  if doc.is_object() {
    Ok(())
  } else {
    Err(malformed("", "document root is not an object"))
  }
}

fn malformed(path: &str, reason: impl ToString) -> Error {
  Error::Malformed {
    path:   path.to_owned(),
    reason: reason.to_string(),
  }
}
