//! Stored-document codec for PSC records.
//!
//! Converts between [`psc_core`] object-model types and the extended-JSON
//! documents kept by the store. Pure synchronous; no HTTP or database
//! dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use psc_core::psc::PscDocument;
//! use psc_document::{from_document_str, to_document_string};
//!
//! # fn demo(doc: &PscDocument) -> psc_document::Result<()> {
//! let text = to_document_string(doc)?;
//! let back: PscDocument = from_document_str(&text)?;
//! assert_eq!(&back, doc);
//! # Ok(())
//! # }
//! ```

mod codec;
pub mod date;
pub mod error;
mod shape;

pub use codec::{from_document, from_document_str, to_document, to_document_string};
pub use error::{Error, Result};
pub use shape::DocumentShape;
