//! [`SqliteStore`], the SQLite implementation of [`PscStore`].

use std::{path::Path, time::Duration};

use psc_core::{
  delta::{DeltaAt, is_stale},
  psc::PscDocument,
  store::PscStore,
};
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use crate::{
  Error, Result,
  encode::{RecordRow, decode_document},
  schema::SCHEMA,
};

/// Bound on a single store round trip unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

/// A PSC record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn:    tokio_rusqlite::Connection,
  pub(crate) timeout: Duration,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>, timeout: Duration) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, timeout };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self {
      conn,
      timeout: DEFAULT_TIMEOUT,
    };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
  }

  /// Run `f` on the connection thread, bounded by the configured timeout.
  ///
  /// A timed-out call reports [`Error::Timeout`]; the statement may still
  /// complete afterwards.
  async fn call<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R>
      + Send
      + 'static,
    R: Send + 'static,
  {
    match tokio::time::timeout(self.timeout, self.conn.call(f)).await {
      Ok(result) => Ok(result?),
      Err(_) => {
        tracing::warn!(timeout = ?self.timeout, "sqlite call timed out");
        Err(Error::Timeout(self.timeout))
      }
    }
  }
}

// ─── PscStore impl ───────────────────────────────────────────────────────────

impl PscStore for SqliteStore {
  type Error = Error;

  async fn find_by_id(&self, id: &str) -> Result<Option<PscDocument>> {
    let id = id.to_owned();

    let raw: Option<String> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT document FROM psc_records WHERE notification_id = ?1",
              rusqlite::params![id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(decode_document).transpose()
  }

  async fn conditional_upsert(
    &self,
    id:       &str,
    document: &PscDocument,
    delta_at: DeltaAt,
  ) -> Result<bool> {
    let row = RecordRow::new(id, document, delta_at)?;

    self
      .call(move |conn| {
        // IMMEDIATE takes the write lock before the read, so no other writer
        // can slip in between the recency check and the upsert.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stored: Option<String> = tx
          .query_row(
            "SELECT delta_at FROM psc_records WHERE notification_id = ?1",
            rusqlite::params![row.notification_id],
            |r| r.get(0),
          )
          .optional()?;

        // An unreadable stored delta_at is corrupt data, not a database
        // failure; the transaction rolls back on drop.
        let stale = match is_stale(&row.delta_at, stored.as_deref()) {
          Ok(stale) => stale,
          Err(e) => return Ok(Err(e.to_string())),
        };
        if stale {
          return Ok(Ok(false));
        }

        tx.execute(
          "INSERT INTO psc_records (
             notification_id, company_number, kind, delta_at,
             created_at, updated_at, document
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?6)
           ON CONFLICT (notification_id) DO UPDATE SET
             company_number = excluded.company_number,
             kind           = excluded.kind,
             delta_at       = excluded.delta_at,
             updated_at     = excluded.updated_at,
             document       = excluded.document",
          rusqlite::params![
            row.notification_id,
            row.company_number,
            row.kind,
            row.delta_at,
            row.updated_at,
            row.document,
          ],
        )?;
        tx.commit()?;
        Ok(Ok(true))
      })
      .await?
      .map_err(Error::CorruptRow)
  }

  async fn delete_by_id(&self, id: &str) -> Result<Option<PscDocument>> {
    let id = id.to_owned();

    let raw: Option<String> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "DELETE FROM psc_records WHERE notification_id = ?1 RETURNING document",
              rusqlite::params![id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(decode_document).transpose()
  }
}
