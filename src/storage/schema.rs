//! Idempotent schema provisioning for the shared `documents` table.
//!
//! Applied on every collection open, inside the caller's scope. All DDL
//! is `IF NOT EXISTS`, so re-opening a store is a no-op; the embedding
//! column is added lazily (and additively) the first time a collection
//! with an embedding function touches the store.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::storage::backend::Scope;
use crate::storage::value::SqlValue;

const SQLITE_DOCUMENTS: &str = "CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    content TEXT,
    name TEXT,
    metadata JSON
)";

const SQLITE_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_name_idx ON documents (name)";

const SQLITE_FTS: &str =
    "CREATE VIRTUAL TABLE IF NOT EXISTS documents_fts USING fts5(id, content)";

const POSTGRES_DOCUMENTS: &str = "CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    content TEXT,
    name TEXT,
    metadata JSONB,
    tsvector TSVECTOR
)";

const POSTGRES_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_name_idx ON documents (name)";

const POSTGRES_TSVECTOR_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_tsvector_idx ON documents USING GIN (tsvector)";

/// Ensure the document table, indexes, and (when requested) the lexical
/// and vector columns exist.
///
/// # Errors
///
/// Returns driver errors from the DDL, or [`Error::VectorExtension`] when
/// the server's vector extension is absent and cannot be created.
pub(crate) fn provision(scope: &mut Scope<'_, '_>, fts: bool, embeddings: bool) -> Result<()> {
    if scope.is_server() {
        provision_server(scope, embeddings)
    } else {
        provision_embedded(scope, fts, embeddings)
    }
}

fn provision_embedded(scope: &mut Scope<'_, '_>, fts: bool, embeddings: bool) -> Result<()> {
    scope.execute(SQLITE_DOCUMENTS, &[])?;
    scope.execute(SQLITE_NAME_INDEX, &[])?;
    if fts {
        scope.execute(SQLITE_FTS, &[])?;
    }
    if embeddings && !embedded_has_column(scope, "embedding")? {
        info!(column = "embedding", "adding embedding column to documents");
        scope.execute("ALTER TABLE documents ADD COLUMN embedding BLOB", &[])?;
    }
    debug!(fts, embeddings, "embedded schema ready");
    Ok(())
}

fn provision_server(scope: &mut Scope<'_, '_>, embeddings: bool) -> Result<()> {
    scope.execute(POSTGRES_DOCUMENTS, &[])?;
    scope.execute(POSTGRES_NAME_INDEX, &[])?;
    scope.execute(POSTGRES_TSVECTOR_INDEX, &[])?;
    if embeddings {
        ensure_vector_extension(scope)?;
        scope.execute("ALTER TABLE documents ADD COLUMN IF NOT EXISTS embedding vector", &[])?;
    }
    debug!(embeddings, "server schema ready");
    Ok(())
}

/// Probe `pg_extension` before `CREATE EXTENSION`: when the extension is
/// already installed the probe avoids tripping a permissions error for
/// roles that cannot create extensions.
fn ensure_vector_extension(scope: &mut Scope<'_, '_>) -> Result<()> {
    let installed = !scope
        .fetch_all("SELECT 1 FROM pg_extension WHERE extname = 'vector'", &[])?
        .is_empty();
    if installed {
        return Ok(());
    }
    info!("installing vector extension");
    scope
        .execute("CREATE EXTENSION IF NOT EXISTS vector", &[])
        .map_err(|e| Error::VectorExtension(e.to_string()))?;
    Ok(())
}

/// Column probe for additive evolution of the embedded table.
fn embedded_has_column(scope: &mut Scope<'_, '_>, column: &str) -> Result<bool> {
    let rows = scope.fetch_all(
        "SELECT 1 FROM pragma_table_info('documents') WHERE name = ?",
        &[SqlValue::Text(column.to_string())],
    )?;
    Ok(!rows.is_empty())
}
