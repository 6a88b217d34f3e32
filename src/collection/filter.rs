//! Metadata predicates: scalar equality and the `$`-operator set.
//!
//! Each filter entry maps a metadata key to either a scalar (equality) or
//! an operator mapping (`{"$gte": 3}`, `{"$in": ["a", "b"]}`). Keys reach
//! SQL as bound accessor parameters (`json_extract(doc.metadata, ?)` on
//! the embedded backend, `doc.metadata->>$n` on the server), so nothing
//! caller-controlled is ever spliced into the statement text.

use serde_json::Value;

use crate::collection::builder::SelectBuilder;
use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::storage::SqlValue;

/// The recognized operator names, for error messages.
const OPERATORS: &str = "$eq, $gt, $gte, $lt, $lte, $in, $nin";

/// Append one predicate per filter entry to `builder`.
pub(crate) fn apply(builder: &mut SelectBuilder, server: bool, filter: &Metadata) -> Result<()> {
    for (key, value) in filter {
        match value {
            Value::Object(ops) => {
                for (op, operand) in ops {
                    apply_operator(builder, server, key, op, operand)?;
                }
            }
            scalar => apply_comparison(builder, server, key, "=", scalar)?,
        }
    }
    Ok(())
}

/// The metadata accessor for string-valued comparisons, with the key
/// bound as a parameter.
pub(crate) fn text_accessor(builder: &mut SelectBuilder, server: bool, key: &str) -> String {
    if server {
        let ph = builder.bind(SqlValue::Text(key.to_string()));
        format!("doc.metadata->>{ph}")
    } else {
        let ph = builder.bind(SqlValue::Text(format!("$.{key}")));
        format!("json_extract(doc.metadata, {ph})")
    }
}

/// The metadata accessor for numeric comparisons. The server casts the
/// extracted text to a double; SQLite's JSON extraction already yields a
/// typed value that compares numerically.
fn numeric_accessor(builder: &mut SelectBuilder, server: bool, key: &str) -> String {
    if server {
        let ph = builder.bind(SqlValue::Text(key.to_string()));
        format!("(doc.metadata->>{ph})::double precision")
    } else {
        let ph = builder.bind(SqlValue::Text(format!("$.{key}")));
        format!("json_extract(doc.metadata, {ph})")
    }
}

fn apply_operator(
    builder: &mut SelectBuilder,
    server: bool,
    key: &str,
    op: &str,
    operand: &Value,
) -> Result<()> {
    let comparison = match op {
        "$eq" => "=",
        "$gt" => ">",
        "$gte" => ">=",
        "$lt" => "<",
        "$lte" => "<=",
        "$in" => return apply_membership(builder, server, key, false, operand),
        "$nin" => return apply_membership(builder, server, key, true, operand),
        other => {
            return Err(Error::invalid(format!(
                "unrecognized operator {other:?} for metadata key {key:?} \
                 (expected one of: {OPERATORS})"
            )));
        }
    };
    apply_comparison(builder, server, key, comparison, operand)
}

fn apply_comparison(
    builder: &mut SelectBuilder,
    server: bool,
    key: &str,
    comparison: &str,
    operand: &Value,
) -> Result<()> {
    match operand {
        Value::String(s) => {
            let accessor = text_accessor(builder, server, key);
            let ph = builder.bind(SqlValue::Text(s.clone()));
            builder.predicate(format!("{accessor} {comparison} {ph}"));
            Ok(())
        }
        Value::Number(n) => {
            let operand = n
                .as_f64()
                .ok_or_else(|| Error::invalid(format!("non-finite number for key {key:?}")))?;
            let accessor = numeric_accessor(builder, server, key);
            let ph = builder.bind(SqlValue::Real(operand));
            builder.predicate(format!("{accessor} {comparison} {ph}"));
            Ok(())
        }
        other => Err(Error::invalid(format!(
            "unsupported filter value {other} for metadata key {key:?} \
             (expected a string or number)"
        ))),
    }
}

fn apply_membership(
    builder: &mut SelectBuilder,
    server: bool,
    key: &str,
    negated: bool,
    operand: &Value,
) -> Result<()> {
    let Value::Array(items) = operand else {
        return Err(Error::invalid(format!(
            "{} for metadata key {key:?} expects an array",
            if negated { "$nin" } else { "$in" }
        )));
    };
    if items.is_empty() {
        // Empty membership: matches nothing / excludes nothing.
        if !negated {
            builder.predicate("1 = 0");
        }
        return Ok(());
    }

    let numeric = items.iter().all(Value::is_number);
    let textual = items.iter().all(Value::is_string);
    if !numeric && !textual {
        return Err(Error::invalid(format!(
            "mixed or unsupported element types in membership filter for key {key:?}"
        )));
    }

    let accessor = if numeric {
        numeric_accessor(builder, server, key)
    } else {
        text_accessor(builder, server, key)
    };
    let placeholders: Vec<String> = items
        .iter()
        .map(|item| {
            let value = match item {
                Value::String(s) => SqlValue::Text(s.clone()),
                Value::Number(n) => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
                _ => unreachable!("checked above"),
            };
            builder.bind(value)
        })
        .collect();
    let keyword = if negated { "NOT IN" } else { "IN" };
    builder.predicate(format!("{accessor} {keyword} ({})", placeholders.join(", ")));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filter(value: Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    fn render(server: bool, value: Value) -> Result<(String, Vec<SqlValue>)> {
        let mut builder = SelectBuilder::new(server, "documents doc");
        builder.column("doc.id");
        apply(&mut builder, server, &filter(value))?;
        Ok(builder.build())
    }

    #[test]
    fn test_scalar_string_equality() {
        let (sql, params) = render(false, json!({"k1": "a"})).unwrap();
        assert_eq!(
            sql,
            "SELECT doc.id FROM documents doc WHERE json_extract(doc.metadata, ?) = ?"
        );
        assert_eq!(
            params,
            vec![SqlValue::Text("$.k1".into()), SqlValue::Text("a".into())]
        );

        let (sql, params) = render(true, json!({"k1": "a"})).unwrap();
        assert_eq!(
            sql,
            "SELECT doc.id FROM documents doc WHERE doc.metadata->>$1 = $2"
        );
        assert_eq!(
            params,
            vec![SqlValue::Text("k1".into()), SqlValue::Text("a".into())]
        );
    }

    #[test]
    fn test_numeric_comparison_casts_on_server() {
        let (sql, params) = render(true, json!({"price": {"$gte": 10}})).unwrap();
        assert_eq!(
            sql,
            "SELECT doc.id FROM documents doc \
             WHERE (doc.metadata->>$1)::double precision >= $2"
        );
        assert_eq!(
            params,
            vec![SqlValue::Text("price".into()), SqlValue::Real(10.0)]
        );
    }

    #[test]
    fn test_membership() {
        let (sql, params) = render(false, json!({"k1": {"$in": ["a", "b"]}})).unwrap();
        assert_eq!(
            sql,
            "SELECT doc.id FROM documents doc \
             WHERE json_extract(doc.metadata, ?) IN (?, ?)"
        );
        assert_eq!(params.len(), 3);

        let (sql, _) = render(true, json!({"k1": {"$nin": ["a"]}})).unwrap();
        assert_eq!(
            sql,
            "SELECT doc.id FROM documents doc WHERE doc.metadata->>$1 NOT IN ($2)"
        );
    }

    #[test]
    fn test_empty_membership() {
        let (sql, params) = render(false, json!({"k1": {"$in": []}})).unwrap();
        assert_eq!(sql, "SELECT doc.id FROM documents doc WHERE 1 = 0");
        assert!(params.is_empty());

        let (sql, _) = render(false, json!({"k1": {"$nin": []}})).unwrap();
        assert_eq!(sql, "SELECT doc.id FROM documents doc");
    }

    #[test]
    fn test_unrecognized_operator_rejected() {
        let err = render(false, json!({"k1": {"$like": "a%"}})).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("$like"));
    }

    #[test]
    fn test_unsupported_operand_rejected() {
        assert!(matches!(
            render(false, json!({"k1": true})),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            render(false, json!({"k1": {"$in": ["a", 1]}})),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            render(false, json!({"k1": {"$in": "a"}})),
            Err(Error::InvalidArgument(_))
        ));
    }
}
