//! JSON REST API for PSC records.
//!
//! Exposes an axum [`Router`] backed by any [`psc_core::store::PscStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = psc_api::api_router(AppState { store, sink });
//! ```

pub mod error;
pub mod records;
pub mod sink;

use std::sync::Arc;

use axum::{Router, routing::get};
use psc_core::{changes::ChangeSink, store::PscStore};

pub use error::ApiError;
pub use sink::TracingSink;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: PscStore> {
  pub store: Arc<S>,
  pub sink:  Arc<dyn ChangeSink>,
}

const RECORD: &str =
  "/company/{company_number}/persons-with-significant-control/{notification_id}";
const FULL_RECORD: &str = "/company/{company_number}/persons-with-significant-control/{notification_id}/full_record";

/// Build the API router for `state`.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: PscStore + Clone + 'static,
{
  Router::new()
    .route(RECORD, get(records::get_public::<S>))
    .route(
      FULL_RECORD,
      get(records::get_full_record::<S>)
        .put(records::put_full_record::<S>)
        .delete(records::delete_full_record::<S>),
    )
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
