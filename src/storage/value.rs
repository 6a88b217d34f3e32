//! The neutral SQL value passed between the engine and both drivers.
//!
//! Parameters and fetched cells both travel as [`SqlValue`], so the query
//! builder and row normalization stay backend-agnostic. Conversions
//! delegate to each driver's native implementations; the only local
//! encodings are the JSON-as-text and f32-blob forms the embedded backend
//! stores.

use bytes::BytesMut;
use postgres::types::{to_sql_checked, FromSql, IsNull, ToSql, Type};
use rusqlite::types::{ToSqlOutput, Value as SqliteValue, ValueRef};

use crate::embeddings::vector::encode_blob;

/// A bound parameter or fetched cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    /// A JSON document: JSONB on the server, JSON text on the embedded
    /// backend.
    Json(serde_json::Value),
    /// An embedding vector: `vector` on the server, little-endian f32
    /// blob on the embedded backend.
    Vector(Vec<f32>),
}

impl SqlValue {
    /// The cell as an integer, if it is one.
    pub(crate) const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The cell as a float, coercing integer cells.
    pub(crate) const fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The cell as text, if it is text.
    pub(crate) fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ── rusqlite conversions ─────────────────────────────────────

impl rusqlite::ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let out = match self {
            Self::Null => ToSqlOutput::Owned(SqliteValue::Null),
            Self::Integer(i) => ToSqlOutput::Owned(SqliteValue::Integer(*i)),
            Self::Real(f) => ToSqlOutput::Owned(SqliteValue::Real(*f)),
            Self::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Self::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            Self::Json(v) => ToSqlOutput::Owned(SqliteValue::Text(v.to_string())),
            Self::Vector(v) => ToSqlOutput::Owned(SqliteValue::Blob(encode_blob(v))),
        };
        Ok(out)
    }
}

impl From<SqliteValue> for SqlValue {
    fn from(value: SqliteValue) -> Self {
        match value {
            SqliteValue::Null => Self::Null,
            SqliteValue::Integer(i) => Self::Integer(i),
            SqliteValue::Real(f) => Self::Real(f),
            SqliteValue::Text(s) => Self::Text(s),
            SqliteValue::Blob(b) => Self::Blob(b),
        }
    }
}

// ── postgres conversions ─────────────────────────────────────

impl ToSql for SqlValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Integer(i) => {
                // Width-adjust so the wire value matches the inferred
                // parameter type.
                if *ty == Type::INT2 {
                    i16::try_from(*i)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*i)?.to_sql(ty, out)
                } else {
                    i.to_sql(ty, out)
                }
            }
            Self::Real(f) => {
                if *ty == Type::FLOAT4 {
                    (*f as f32).to_sql(ty, out)
                } else {
                    f.to_sql(ty, out)
                }
            }
            Self::Text(s) => s.to_sql(ty, out),
            Self::Blob(b) => b.to_sql(ty, out),
            Self::Json(v) => v.to_sql(ty, out),
            Self::Vector(v) => pgvector::Vector::from(v.clone()).to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // The value is dynamic; each variant's delegate validates the
        // concrete pairing at bind time.
        true
    }

    to_sql_checked!();
}

impl<'a> FromSql<'a> for SqlValue {
    fn from_sql(
        ty: &Type,
        raw: &'a [u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        let value = if *ty == Type::BOOL {
            Self::Integer(i64::from(bool::from_sql(ty, raw)?))
        } else if *ty == Type::INT2 {
            Self::Integer(i64::from(i16::from_sql(ty, raw)?))
        } else if *ty == Type::INT4 {
            Self::Integer(i64::from(i32::from_sql(ty, raw)?))
        } else if *ty == Type::INT8 {
            Self::Integer(i64::from_sql(ty, raw)?)
        } else if *ty == Type::FLOAT4 {
            Self::Real(f64::from(f32::from_sql(ty, raw)?))
        } else if *ty == Type::FLOAT8 {
            Self::Real(f64::from_sql(ty, raw)?)
        } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::NAME {
            Self::Text(String::from_sql(ty, raw)?)
        } else if *ty == Type::BYTEA {
            Self::Blob(Vec::<u8>::from_sql(ty, raw)?)
        } else if *ty == Type::JSON || *ty == Type::JSONB {
            Self::Json(serde_json::Value::from_sql(ty, raw)?)
        } else {
            return Err(format!("unsupported column type {ty}").into());
        };
        Ok(value)
    }

    fn from_sql_null(_ty: &Type) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(Self::Null)
    }

    fn accepts(ty: &Type) -> bool {
        [
            Type::BOOL,
            Type::INT2,
            Type::INT4,
            Type::INT8,
            Type::FLOAT4,
            Type::FLOAT8,
            Type::TEXT,
            Type::VARCHAR,
            Type::NAME,
            Type::BYTEA,
            Type::JSON,
            Type::JSONB,
        ]
        .contains(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_json_binds_as_text() {
        let value = SqlValue::Json(serde_json::json!({"k": 1}));
        let bound = rusqlite::ToSql::to_sql(&value).unwrap();
        assert_eq!(
            bound,
            ToSqlOutput::Owned(SqliteValue::Text("{\"k\":1}".to_string()))
        );
    }

    #[test]
    fn test_sqlite_vector_binds_as_blob() {
        let value = SqlValue::Vector(vec![1.0, -1.0]);
        let bound = rusqlite::ToSql::to_sql(&value).unwrap();
        assert_eq!(
            bound,
            ToSqlOutput::Owned(SqliteValue::Blob(encode_blob(&[1.0, -1.0])))
        );
    }

    #[test]
    fn test_roundtrip_from_sqlite_value() {
        assert_eq!(SqlValue::from(SqliteValue::Integer(7)), SqlValue::Integer(7));
        assert_eq!(SqlValue::from(SqliteValue::Null), SqlValue::Null);
        assert_eq!(
            SqlValue::from(SqliteValue::Text("x".into())),
            SqlValue::Text("x".into())
        );
    }

    #[test]
    fn test_cell_accessors() {
        assert_eq!(SqlValue::Integer(3).as_integer(), Some(3));
        assert_eq!(SqlValue::Integer(3).as_real(), Some(3.0));
        assert_eq!(SqlValue::Real(0.5).as_real(), Some(0.5));
        assert_eq!(SqlValue::Text("a".into()).as_text(), Some("a"));
        assert_eq!(SqlValue::Null.as_integer(), None);
    }
}
