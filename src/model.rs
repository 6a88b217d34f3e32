//! Data models for collections and query results.
//!
//! These are plain data carriers: the engine in [`crate::collection`]
//! produces them, callers consume them. Everything serializes cleanly so
//! results can be handed straight to an API layer.

use serde::{Deserialize, Serialize};

use crate::embeddings::Embedder;

/// Document metadata: string keys mapped to JSON scalar values.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One matching document returned by a search or retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentHit {
    /// Document id (caller-supplied or minted UUIDv4).
    pub id: String,

    /// Document text.
    pub content: String,

    /// Decoded metadata; `None` when the document was stored without any.
    pub metadata: Option<Metadata>,

    /// Match rank. Present on text search (backend rank) and vector
    /// search (cosine similarity); absent on plain retrieval.
    pub rank: Option<f64>,
}

/// The envelope returned by [`crate::Collection::query`] and
/// [`crate::Collection::get`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Number of matches across the full result set, before pagination.
    pub total: u64,

    /// The requested page of matches, in result order.
    pub results: Vec<DocumentHit>,
}

/// Knobs for a single `query`/`get` call.
///
/// `Default` gives an unpaginated, unfiltered retrieval:
///
/// ```
/// use quarry::QueryOptions;
///
/// let opts = QueryOptions { limit: 10, ..QueryOptions::default() };
/// assert_eq!(opts.offset, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Maximum number of results to return; `0` means unlimited.
    pub limit: usize,

    /// Number of leading matches to skip.
    pub offset: usize,

    /// Metadata filter: each key maps to either a scalar (equality) or an
    /// operator mapping using `$eq`, `$gt`, `$gte`, `$lt`, `$lte`, `$in`,
    /// `$nin`.
    pub filter: Option<Metadata>,

    /// Order keys, applied left to right. A `-` prefix sorts the key
    /// descending with nulls first; `+` (or no prefix) ascending with
    /// nulls last. Incompatible with `vector_search`.
    pub order_by: Vec<String>,

    /// Rank by cosine similarity to the embedded query text instead of
    /// lexical matching. Requires an embedding function on the collection.
    pub vector_search: bool,
}

/// Configuration for opening a [`crate::Collection`].
pub struct CollectionOptions {
    /// Embedding function used for vector search. When set, every
    /// document written through this handle gets an embedding.
    pub embedder: Option<Box<dyn Embedder>>,

    /// Whether to maintain the full-text index (embedded backend). Vector
    /// only collections can switch it off to skip the FTS table entirely.
    pub fts: bool,
}

impl Default for CollectionOptions {
    /// Full-text search enabled, no embedding function.
    fn default() -> Self {
        Self { embedder: None, fts: true }
    }
}

impl CollectionOptions {
    /// Options with full-text search enabled and no embedding function.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an embedding function.
    #[must_use]
    pub fn with_embedder(mut self, embedder: Box<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Disable the full-text index.
    #[must_use]
    pub fn without_fts(mut self) -> Self {
        self.fts = false;
        self
    }
}

impl std::fmt::Debug for CollectionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionOptions")
            .field("embedder", &self.embedder.is_some())
            .field("fts", &self.fts)
            .finish()
    }
}
