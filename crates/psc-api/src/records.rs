//! Handlers for PSC record endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `PUT`    | `/company/{company_number}/persons-with-significant-control/{notification_id}/full_record` | Body: full-record delta; `{"outcome":"applied"\|"stale"}` |
//! | `DELETE` | same | Idempotent |
//! | `GET`    | same | Both partitions |
//! | `GET`    | `/company/{company_number}/persons-with-significant-control/{notification_id}` | Public partition only |

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use chrono::Utc;
use psc_core::{
  context::RequestContext,
  delta::DeltaOutcome,
  ingest,
  psc::{PscData, PscDocument},
  record::FullRecord,
  store::PscStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Deserialize)]
pub struct RecordPath {
  pub company_number:  String,
  pub notification_id: String,
}

#[derive(Debug, Serialize)]
pub struct OutcomeBody {
  pub outcome: DeltaOutcome,
}

fn context(headers: &HeaderMap) -> RequestContext {
  RequestContext::from_header(
    headers
      .get(REQUEST_ID_HEADER)
      .and_then(|v| v.to_str().ok()),
  )
}

async fn find_in_company<S>(
  store: &S,
  path: &RecordPath,
) -> Result<PscDocument, ApiError>
where
  S: PscStore,
{
  store
    .find_by_id(&path.notification_id)
    .await
    .map_err(|e| ApiError::Core(e.into()))?
    .filter(|doc| doc.company_number == path.company_number)
    .ok_or_else(|| {
      ApiError::NotFound(format!(
        "no PSC {} for company {}",
        path.notification_id, path.company_number
      ))
    })
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

/// `PUT .../{notification_id}/full_record`
pub async fn put_full_record<S>(
  State(state): State<AppState<S>>,
  Path(path): Path<RecordPath>,
  headers: HeaderMap,
  body: String,
) -> Result<Json<OutcomeBody>, ApiError>
where
  S: PscStore + Clone + 'static,
{
  let ctx = context(&headers);
  let record = FullRecord::from_json(&body)?;

  let external = &record.external_data;
  if external.notification_id != path.notification_id
    || external.company_number != path.company_number
  {
    return Err(ApiError::BadRequest(format!(
      "body identity {}/{} does not match path {}/{}",
      external.company_number,
      external.notification_id,
      path.company_number,
      path.notification_id
    )));
  }

  let outcome = ingest::apply_full_record(
    state.store.as_ref(),
    state.sink.as_ref(),
    &ctx,
    record,
    Utc::now(),
  )
  .await?;

  Ok(Json(OutcomeBody { outcome }))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE .../{notification_id}/full_record`: 200 whether or not the record
/// existed.
pub async fn delete_full_record<S>(
  State(state): State<AppState<S>>,
  Path(path): Path<RecordPath>,
  headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
  S: PscStore + Clone + 'static,
{
  let ctx = context(&headers);
  ingest::delete_record(
    state.store.as_ref(),
    state.sink.as_ref(),
    &ctx,
    &path.company_number,
    &path.notification_id,
    Utc::now(),
  )
  .await?;
  Ok(StatusCode::OK)
}

// ─── Reads ───────────────────────────────────────────────────────────────────

/// `GET .../{notification_id}/full_record`
pub async fn get_full_record<S>(
  State(state): State<AppState<S>>,
  Path(path): Path<RecordPath>,
) -> Result<Json<PscDocument>, ApiError>
where
  S: PscStore + Clone + 'static,
{
  Ok(Json(find_in_company(state.store.as_ref(), &path).await?))
}

/// `GET .../{notification_id}`
pub async fn get_public<S>(
  State(state): State<AppState<S>>,
  Path(path): Path<RecordPath>,
) -> Result<Json<PscData>, ApiError>
where
  S: PscStore + Clone + 'static,
{
  let doc = find_in_company(state.store.as_ref(), &path).await?;
  Ok(Json(doc.data))
}
