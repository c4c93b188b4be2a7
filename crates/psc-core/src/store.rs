//! The `PscStore` trait.
//!
//! Implemented by storage backends (e.g. `psc-store-sqlite`). The ingestion
//! service and the HTTP layer depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{delta::DeltaAt, psc::PscDocument};

/// Abstraction over a PSC record store backend.
///
/// Records for different ids are independent. For a single id, the recency
/// check and the write must be one atomic step: two concurrent deltas must
/// never both pass the check against the same old state.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PscStore: Send + Sync {
  /// Backend error; converts into the core taxonomy so callers can tell a
  /// timeout from an unavailable store from a corrupt document.
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  /// Retrieve a record by notification id. Returns `None` if absent.
  fn find_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<PscDocument>, Self::Error>> + Send + 'a;

  /// Insert or replace `document` under `id` unless the stored record's
  /// `delta_at` is strictly later than `delta_at`.
  ///
  /// Returns `true` if the write was applied, `false` if it was skipped as
  /// stale. The check and the write are atomic.
  fn conditional_upsert<'a>(
    &'a self,
    id: &'a str,
    document: &'a PscDocument,
    delta_at: DeltaAt,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Remove the record unconditionally, returning it if it existed.
  /// Deleting an absent id succeeds.
  fn delete_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<PscDocument>, Self::Error>> + Send + 'a;
}
