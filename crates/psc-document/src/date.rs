//! Extended-JSON dates.
//!
//! A stored date is `{"$date": "yyyy-MM-ddTHH:mm:ssZ"}` or
//! `{"$date": {"$numberLong": "<epoch millis>"}}`. Both decode to a UTC
//! calendar date; writing always produces the textual form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Value, json};

use crate::{Error, Result};

pub const DATE_KEY: &str = "$date";
pub const LONG_KEY: &str = "$numberLong";

/// The only accepted textual layout.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Decode an extended date node. Null or missing wrappers are errors.
pub fn decode(node: &Value) -> Result<NaiveDate> {
  let inner = node
    .get(DATE_KEY)
    .ok_or_else(|| Error::BadDate(format!("expected a {DATE_KEY} wrapper, got {node}")))?;

  if let Some(text) = inner.as_str() {
    return NaiveDateTime::parse_from_str(text, ISO_FORMAT)
      .map(|dt| dt.date())
      .map_err(|e| Error::BadDate(format!("{text:?}: {e}")));
  }

  let millis = match inner.get(LONG_KEY) {
    Some(Value::String(s)) => s
      .parse::<i64>()
      .map_err(|e| Error::BadDate(format!("{LONG_KEY} {s:?}: {e}")))?,
    Some(Value::Number(n)) => n
      .as_i64()
      .ok_or_else(|| Error::BadDate(format!("{LONG_KEY} {n} is not an integer")))?,
    _ => {
      return Err(Error::BadDate(format!(
        "expected a string or {LONG_KEY} wrapper, got {inner}"
      )));
    }
  };

  DateTime::from_timestamp_millis(millis)
    .map(|dt| dt.date_naive())
    .ok_or_else(|| Error::BadDate(format!("{millis} ms is out of range")))
}

/// Encode `date` in the textual form, at UTC midnight.
pub fn encode(date: NaiveDate) -> Value {
  let at = date.and_time(NaiveTime::MIN);
  json!({ DATE_KEY: at.format(ISO_FORMAT).to_string() })
}

/// Encode `date` in the epoch-millisecond form, at UTC midnight.
pub fn encode_millis(date: NaiveDate) -> Value {
  let millis = date.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
  json!({ DATE_KEY: { LONG_KEY: millis.to_string() } })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn textual_literal() {
    let node = json!({ "$date": "2023-01-09T00:00:00Z" });
    assert_eq!(decode(&node).unwrap(), ymd(2023, 1, 9));
  }

  #[test]
  fn negative_millis_literal() {
    let node = json!({ "$date": { "$numberLong": "-1431388800000" } });
    assert_eq!(decode(&node).unwrap(), ymd(1924, 8, 23));
  }

  #[test]
  fn numeric_long_is_accepted() {
    let node = json!({ "$date": { "$numberLong": 1673222400000_i64 } });
    assert_eq!(decode(&node).unwrap(), ymd(2023, 1, 9));
  }

  #[test]
  fn time_of_day_is_dropped() {
    let node = json!({ "$date": "2023-01-09T23:59:59Z" });
    assert_eq!(decode(&node).unwrap(), ymd(2023, 1, 9));
    let node = json!({ "$date": { "$numberLong": "-1" } });
    assert_eq!(decode(&node).unwrap(), ymd(1969, 12, 31));
  }

  #[test]
  fn both_encodings_round_trip() {
    for date in [ymd(2023, 1, 9), ymd(1924, 8, 23), ymd(1970, 1, 1), ymd(2099, 12, 31)] {
      assert_eq!(decode(&encode(date)).unwrap(), date);
      assert_eq!(decode(&encode_millis(date)).unwrap(), date);
    }
  }

  #[test]
  fn textual_encoding_is_bit_exact() {
    assert_eq!(
      encode(ymd(2023, 1, 9)).to_string(),
      r#"{"$date":"2023-01-09T00:00:00Z"}"#
    );
    assert_eq!(
      encode_millis(ymd(1924, 8, 23)).to_string(),
      r#"{"$date":{"$numberLong":"-1431388800000"}}"#
    );
  }

  #[test]
  fn bad_shapes_are_rejected() {
    for node in [
      Value::Null,
      json!("2023-01-09T00:00:00Z"),
      json!({ "$date": null }),
      json!({ "$date": 1673222400000_i64 }),
      json!({ "$date": "2023-01-09" }),
      json!({ "$date": "2023-01-09T00:00:00.000Z" }),
      json!({ "$date": "2023-01-09T00:00:00+01:00" }),
      json!({ "$date": { "$numberLong": "soon" } }),
      json!({ "$date": { "$numberInt": "1" } }),
    ] {
      assert!(matches!(decode(&node), Err(Error::BadDate(_))), "{node}");
    }
  }
}
