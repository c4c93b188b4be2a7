//! The ingestion service: apply a full-record delta or delete a record.
//!
//! Every call takes the [`RequestContext`] explicitly; it is used for log
//! correlation and as the change event's `context_id`.

use chrono::{DateTime, Utc};

use crate::{
  Result,
  changes::{ChangeSink, EventType, ResourceChanged},
  context::RequestContext,
  delta::{DeltaAt, DeltaOutcome},
  partition,
  psc::PscDocument,
  record::FullRecord,
  store::PscStore,
};

/// Offer `record` to the store.
///
/// A stale delta is `Ok(DeltaOutcome::Stale)`; store failures (including
/// timeouts) are errors and never reported as a skip.
///
/// The change event is published after the write commits. If the sink fails
/// the write stays in place and the call still returns
/// [`Error::Downstream`](crate::Error::Downstream); redelivering the same
/// delta carries an equal `delta_at`, so it applies again and republishes.
pub async fn apply_full_record<S>(
  store: &S,
  sink: &dyn ChangeSink,
  ctx: &RequestContext,
  record: FullRecord,
  now: DateTime<Utc>,
) -> Result<DeltaOutcome>
where
  S: PscStore,
{
  let delta_at = DeltaAt::parse(&record.internal_data.delta_at)?;
  let document = partition::into_document(record, ctx, now)?;

  let applied = store
    .conditional_upsert(&document.id, &document, delta_at)
    .await
    .map_err(|e| {
      let err: crate::Error = e.into();
      tracing::error!(
        request_id = %ctx.request_id,
        notification_id = %document.id,
        error = %err,
        "conditional upsert failed"
      );
      err
    })?;

  let outcome = DeltaOutcome::from_applied(applied);
  match outcome {
    DeltaOutcome::Applied => {
      tracing::info!(
        request_id = %ctx.request_id,
        notification_id = %document.id,
        company_number = %document.company_number,
        delta_at = %delta_at,
        "delta applied"
      );
      publish(sink, ctx, &document, EventType::Changed, now)?;
    }
    DeltaOutcome::Stale => {
      tracing::info!(
        request_id = %ctx.request_id,
        notification_id = %document.id,
        delta_at = %delta_at,
        "stale delta skipped"
      );
    }
  }

  Ok(outcome)
}

/// Delete a record regardless of its `delta_at`. Returns the removed
/// document, if any.
///
/// Records are keyed by company and notification id: a record filed under a
/// different company is treated as absent and left untouched.
pub async fn delete_record<S>(
  store: &S,
  sink: &dyn ChangeSink,
  ctx: &RequestContext,
  company_number: &str,
  notification_id: &str,
  now: DateTime<Utc>,
) -> Result<Option<PscDocument>>
where
  S: PscStore,
{
  let existing = store
    .find_by_id(notification_id)
    .await
    .map_err(Into::<crate::Error>::into)?;
  if existing.is_some_and(|doc| doc.company_number != company_number) {
    tracing::info!(
      request_id = %ctx.request_id,
      notification_id,
      company_number,
      "delete for record under another company ignored"
    );
    return Ok(None);
  }

  let removed = store
    .delete_by_id(notification_id)
    .await
    .map_err(Into::<crate::Error>::into)?;

  match &removed {
    Some(document) => {
      tracing::info!(
        request_id = %ctx.request_id,
        notification_id,
        company_number,
        "record deleted"
      );
      publish(sink, ctx, document, EventType::Deleted, now)?;
    }
    None => {
      tracing::info!(
        request_id = %ctx.request_id,
        notification_id,
        company_number,
        "delete of absent record ignored"
      );
    }
  }

  Ok(removed)
}

fn publish(
  sink: &dyn ChangeSink,
  ctx: &RequestContext,
  document: &PscDocument,
  kind: EventType,
  now: DateTime<Utc>,
) -> Result<()> {
  match ResourceChanged::for_document(ctx, document, kind, now) {
    Some(event) => sink.publish(&event),
    None => {
      tracing::warn!(
        request_id = %ctx.request_id,
        notification_id = %document.id,
        kind = %document.data.kind,
        "no resource kind for record; change event not published"
      );
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
  };

  use chrono::TimeZone;
  use serde_json::json;

  use super::*;
  use crate::{Error, delta::is_stale};

  // ── In-memory store ───────────────────────────────────────────────────────

  const TIMEOUT: Duration = Duration::from_millis(250);

  #[derive(Debug, thiserror::Error)]
  enum MemoryError {
    #[error("memory store offline")]
    Offline,
    #[error("memory store timed out")]
    TimedOut,
  }

  impl From<MemoryError> for Error {
    fn from(e: MemoryError) -> Self {
      match e {
        MemoryError::Offline => Error::StoreUnavailable(Box::new(e)),
        MemoryError::TimedOut => Error::StoreTimeout(TIMEOUT),
      }
    }
  }

  #[derive(Default)]
  struct MemoryStore {
    records:   Mutex<HashMap<String, PscDocument>>,
    offline:   bool,
    timed_out: bool,
  }

  impl MemoryStore {
    fn check(&self) -> Result<(), MemoryError> {
      if self.offline {
        return Err(MemoryError::Offline);
      }
      if self.timed_out {
        return Err(MemoryError::TimedOut);
      }
      Ok(())
    }
  }

  impl PscStore for MemoryStore {
    type Error = MemoryError;

    async fn find_by_id(&self, id: &str) -> Result<Option<PscDocument>, MemoryError> {
      self.check()?;
      Ok(self.records.lock().unwrap().get(id).cloned())
    }

    async fn conditional_upsert(
      &self,
      id: &str,
      document: &PscDocument,
      delta_at: DeltaAt,
    ) -> Result<bool, MemoryError> {
      self.check()?;
      let mut records = self.records.lock().unwrap();
      let stored = records.get(id).map(|d| d.delta_at.as_str());
      if is_stale(&delta_at.to_string(), stored).unwrap() {
        return Ok(false);
      }
      records.insert(id.to_owned(), document.clone());
      Ok(true)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<PscDocument>, MemoryError> {
      self.check()?;
      Ok(self.records.lock().unwrap().remove(id))
    }
  }

  #[derive(Default)]
  struct RecordingSink(Mutex<Vec<ResourceChanged>>);

  impl ChangeSink for RecordingSink {
    fn publish(&self, event: &ResourceChanged) -> Result<()> {
      self.0.lock().unwrap().push(event.clone());
      Ok(())
    }
  }

  // ── Fixtures ──────────────────────────────────────────────────────────────

  const ID: &str = "ZfTs9WeeqpXTqf6dc6FZ4C0H0Rk";

  fn record(kind: &str, delta_at: &str, name: &str) -> FullRecord {
    serde_json::from_value(json!({
      "external_data": {
        "notification_id": ID,
        "company_number": "34777772",
        "data": {
          "kind": kind,
          "name": name,
          "links": [{ "self": format!("/company/34777772/persons-with-significant-control/individual/{ID}") }]
        }
      },
      "internal_data": { "delta_at": delta_at }
    }))
    .unwrap()
  }

  fn individual(delta_at: &str, name: &str) -> FullRecord {
    record("individual-person-with-significant-control", delta_at, name)
  }

  fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap() }

  fn ctx() -> RequestContext { RequestContext::new("ctx-1") }

  // ── Tests ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn first_delta_applies_and_publishes() {
    let store = MemoryStore::default();
    let sink = RecordingSink::default();

    let outcome = apply_full_record(
      &store,
      &sink,
      &ctx(),
      individual("20240101000000000000", "Jo"),
      now(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, DeltaOutcome::Applied);
    assert!(store.find_by_id(ID).await.unwrap().is_some());
    let events = sink.0.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].resource_kind, "company-psc-individual");
    assert_eq!(events[0].context_id, "ctx-1");
    assert_eq!(events[0].event.kind, EventType::Changed);
  }

  #[tokio::test]
  async fn older_delta_is_skipped_without_event() {
    let store = MemoryStore::default();
    let sink = RecordingSink::default();
    apply_full_record(&store, &sink, &ctx(), individual("20240102000000000000", "New"), now())
      .await
      .unwrap();

    let outcome = apply_full_record(
      &store,
      &sink,
      &ctx(),
      individual("20240101000000000000", "Old"),
      now(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, DeltaOutcome::Stale);
    let stored = store.find_by_id(ID).await.unwrap().unwrap();
    assert_eq!(stored.data.name.as_deref(), Some("New"));
    assert_eq!(sink.0.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn equal_delta_applies() {
    let store = MemoryStore::default();
    let sink = RecordingSink::default();
    for name in ["First", "Second"] {
      let outcome = apply_full_record(
        &store,
        &sink,
        &ctx(),
        individual("20240101000000000000", name),
        now(),
      )
      .await
      .unwrap();
      assert_eq!(outcome, DeltaOutcome::Applied);
    }
    let stored = store.find_by_id(ID).await.unwrap().unwrap();
    assert_eq!(stored.data.name.as_deref(), Some("Second"));
  }

  #[tokio::test]
  async fn concurrent_deltas_converge_on_newest_in_both_orders() {
    let older = "20240101000000000000";
    let newer = "20240102000000000000";

    for (first, second) in [(older, newer), (newer, older)] {
      let store = Arc::new(MemoryStore::default());
      let sink = RecordingSink::default();
      let c = ctx();
      let (a, b) = tokio::join!(
        apply_full_record(store.as_ref(), &sink, &c, individual(first, first), now()),
        apply_full_record(store.as_ref(), &sink, &c, individual(second, second), now()),
      );
      a.unwrap();
      b.unwrap();

      let stored = store.find_by_id(ID).await.unwrap().unwrap();
      assert_eq!(stored.delta_at, newer);
      assert_eq!(stored.data.name.as_deref(), Some(newer));
    }
  }

  #[tokio::test]
  async fn malformed_delta_at_is_bad_input() {
    let store = MemoryStore::default();
    let sink = RecordingSink::default();
    let err = apply_full_record(&store, &sink, &ctx(), individual("yesterday", "Jo"), now())
      .await
      .unwrap_err();
    assert!(matches!(err, Error::BadInput(_)));
  }

  #[tokio::test]
  async fn store_failure_is_not_a_skip() {
    let store = MemoryStore {
      offline: true,
      ..Default::default()
    };
    let sink = RecordingSink::default();
    let err = apply_full_record(
      &store,
      &sink,
      &ctx(),
      individual("20240101000000000000", "Jo"),
      now(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)));
    assert!(sink.0.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn store_timeout_is_not_a_skip() {
    let store = MemoryStore {
      timed_out: true,
      ..Default::default()
    };
    let sink = RecordingSink::default();
    let err = apply_full_record(
      &store,
      &sink,
      &ctx(),
      individual("20240101000000000000", "Jo"),
      now(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::StoreTimeout(after) if after == TIMEOUT));
    assert!(sink.0.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn unknown_kind_is_stored_but_not_published() {
    let store = MemoryStore::default();
    let sink = RecordingSink::default();
    let outcome = apply_full_record(
      &store,
      &sink,
      &ctx(),
      record("not-a-real-kind", "20240101000000000000", "Jo"),
      now(),
    )
    .await
    .unwrap();
    assert_eq!(outcome, DeltaOutcome::Applied);
    assert!(sink.0.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn delete_is_idempotent_and_publishes_once() {
    let store = MemoryStore::default();
    let sink = RecordingSink::default();
    apply_full_record(&store, &sink, &ctx(), individual("20240101000000000000", "Jo"), now())
      .await
      .unwrap();

    let removed = delete_record(&store, &sink, &ctx(), "34777772", ID, now())
      .await
      .unwrap();
    assert!(removed.is_some());
    let again = delete_record(&store, &sink, &ctx(), "34777772", ID, now())
      .await
      .unwrap();
    assert!(again.is_none());

    let events = sink.0.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].event.kind, EventType::Deleted);
    assert_eq!(
      events[1].deleted_data.as_ref().and_then(|d| d.name.as_deref()),
      Some("Jo")
    );
  }

  #[tokio::test]
  async fn delete_under_another_company_leaves_record() {
    let store = MemoryStore::default();
    let sink = RecordingSink::default();
    apply_full_record(&store, &sink, &ctx(), individual("20240101000000000000", "Jo"), now())
      .await
      .unwrap();

    let removed = delete_record(&store, &sink, &ctx(), "00000001", ID, now())
      .await
      .unwrap();
    assert!(removed.is_none());
    assert!(store.find_by_id(ID).await.unwrap().is_some());

    let events = sink.0.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.kind, EventType::Changed);
  }
}
