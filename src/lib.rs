//! Quarry - unified full-text and vector search over document collections.
//!
//! One API, two storage backends: an embedded single-file SQLite store
//! (FTS5 + in-memory cosine ranking) and a PostgreSQL store (tsvector +
//! GIN, `vector` extension with server-side distance). Collections share
//! a single physical `documents` table and are isolated by a name tag; a
//! query combines text matching, metadata filters, multi-key ordering,
//! and pagination in one pass and returns the page together with the
//! total match count.
//!
//! # Architecture
//!
//! - [`collection`] - the engine behind [`Collection`]
//! - [`parser`] - user query → backend search syntax
//! - [`storage`] - the adapter over both backends
//! - [`embeddings`] - the [`Embedder`] contract and vector plumbing
//! - [`model`] - result envelopes and options
//! - [`error`] - error types and handling
//!
//! # Example
//!
//! ```no_run
//! use quarry::{Collection, CollectionOptions, QueryOptions};
//!
//! # fn main() -> quarry::Result<()> {
//! let docs = Collection::open(Some("sqlite:///search.db"), "articles", CollectionOptions::new())?;
//! docs.add(&["Lorem ipsum dolor".to_string()], None, None)?;
//! let hits = docs.query("lor*", &QueryOptions::default())?;
//! assert_eq!(hits.total, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collection;
pub mod embeddings;
pub mod error;
pub mod model;
pub mod parser;
pub mod storage;
pub mod validate;

pub use collection::Collection;
pub use embeddings::Embedder;
pub use error::{Error, Result};
pub use model::{CollectionOptions, DocumentHit, Metadata, QueryOptions, SearchResults};
