//! Error types for the search library.
//!
//! One `thiserror` enum covers the whole crate. Callers match on
//! `InvalidArgument` for precondition violations, `VectorExtension` for a
//! missing server-side vector extension, and the driver variants for
//! everything the backends surface.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in collection operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied input violated a precondition: malformed
    /// collection name, incomplete ids on `update`, vector search without
    /// an embedding function or combined with `order_by`, text search on
    /// an FTS-disabled collection, or an unrecognized metadata operator.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The `vector` extension is absent on the server and could not be
    /// created (typically a permissions problem).
    #[error("vector extension unavailable: {0}")]
    VectorExtension(String),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database error: {0}")]
    Postgres(#[from] postgres::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The embedding function failed or returned a batch whose length or
    /// dimensions do not match its inputs.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// A fetched row did not have the shape the engine asked for.
    #[error("Row decode error: {0}")]
    Decode(String),
}

impl Error {
    /// Whether this error came out of a storage driver.
    ///
    /// The read path (`query`/`get`) swallows exactly this family and
    /// returns an empty envelope; every other variant propagates.
    pub(crate) const fn is_backend(&self) -> bool {
        matches!(self, Self::Sqlite(_) | Self::Postgres(_))
    }

    /// Shorthand for an [`Error::InvalidArgument`] with a formatted message.
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
