//! Storage layer: one contract over the two relational backends.
//!
//! - [`value`] - the neutral parameter/row value crossing both drivers
//! - [`backend`] - backend selection, placeholders, scoped transactions
//! - [`sqlite`] - embedded adapter (single-file SQLite)
//! - [`postgres`] - server adapter (PostgreSQL)
//! - [`schema`] - idempotent schema provisioning
//!
//! Everything above this layer (the collection engine) sees only
//! [`StorageBackend`], [`Scope`], and [`SqlValue`].

pub mod backend;
pub mod postgres;
pub mod schema;
pub mod sqlite;
pub mod value;

pub use backend::{Scope, StorageBackend};
pub use value::SqlValue;
