//! Derivation of a record's [`Links`] from the upstream link list.

use crate::{Error, Result, psc::Links, record::ExternalData};

/// Copy `self` and `statements` from the first upstream link entry.
///
/// Any further entries are ignored. An absent or empty list is bad input.
pub fn build(external: &ExternalData) -> Result<Links> {
  let first = external
    .data
    .links
    .as_deref()
    .and_then(<[Links]>::first)
    .ok_or_else(|| {
      Error::bad_input(format!(
        "record {} carries no links",
        external.notification_id
      ))
    })?;

  Ok(Links {
    self_link:  first.self_link.clone(),
    statements: first.statements.clone(),
  })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn external(links: serde_json::Value) -> ExternalData {
    serde_json::from_value(json!({
      "notification_id": "ZfTs9WeeqpXTqf6dc6FZ4C0H0Rk",
      "company_number": "34777772",
      "data": { "kind": "individual-person-with-significant-control", "links": links }
    }))
    .unwrap()
  }

  #[test]
  fn first_entry_wins() {
    let ext = external(json!([
      {
        "self": "/company/34777772/persons-with-significant-control/individual/ZfTs9WeeqpXTqf6dc6FZ4C0H0Rk",
        "statements": "/company/34777772/persons-with-significant-control-statements"
      },
      { "self": "/ignored" }
    ]));
    let links = build(&ext).unwrap();
    assert!(links.self_link.ends_with("/individual/ZfTs9WeeqpXTqf6dc6FZ4C0H0Rk"));
    assert_eq!(
      links.statements.as_deref(),
      Some("/company/34777772/persons-with-significant-control-statements")
    );
  }

  #[test]
  fn statements_are_optional() {
    let ext = external(json!([{ "self": "/company/1/persons-with-significant-control/x" }]));
    assert_eq!(build(&ext).unwrap().statements, None);
  }

  #[test]
  fn empty_list_is_bad_input() {
    let ext = external(json!([]));
    assert!(matches!(build(&ext), Err(Error::BadInput(_))));
  }

  #[test]
  fn missing_list_is_bad_input() {
    let ext = external(serde_json::Value::Null);
    assert!(matches!(build(&ext), Err(Error::BadInput(_))));
  }
}
