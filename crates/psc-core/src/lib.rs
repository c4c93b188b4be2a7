//! Core types and trait definitions for the PSC record store.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the object model, the role taxonomy, the record partitioner, the delta
//! recency guard and the [`store::PscStore`] contract that backends
//! implement.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod changes;
pub mod context;
pub mod delta;
pub mod error;
pub mod ingest;
pub mod links;
pub mod partition;
pub mod psc;
pub mod record;
pub mod resource_kind;
pub mod role;
pub mod store;

pub use error::{Error, Result};
