//! An explicit select-statement value.
//!
//! The engine assembles every retrieval from the same parts: a select
//! list, a from clause, conjoined predicates, order keys, and the
//! limit/offset tail. Parameters are bound through [`SelectBuilder::bind`]
//! in the order their placeholders appear in the final SQL, which is what
//! keeps `?` (embedded) and `$n` (server) binding equivalent.

use crate::storage::SqlValue;

/// Accumulates one select statement plus its bound parameters.
#[derive(Debug)]
pub(crate) struct SelectBuilder {
    server: bool,
    select: Vec<String>,
    from: String,
    predicates: Vec<String>,
    order_by: Vec<String>,
    tail: Vec<String>,
    params: Vec<SqlValue>,
}

impl SelectBuilder {
    pub(crate) fn new(server: bool, from: impl Into<String>) -> Self {
        Self {
            server,
            select: Vec::new(),
            from: from.into(),
            predicates: Vec::new(),
            order_by: Vec::new(),
            tail: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Bind a parameter, returning the placeholder token to splice into
    /// the clause under construction.
    pub(crate) fn bind(&mut self, value: SqlValue) -> String {
        self.params.push(value);
        if self.server {
            format!("${}", self.params.len())
        } else {
            "?".to_string()
        }
    }

    /// Append a select-list expression.
    pub(crate) fn column(&mut self, expr: impl Into<String>) {
        self.select.push(expr.into());
    }

    /// Append a predicate; all predicates join with `AND`.
    pub(crate) fn predicate(&mut self, expr: impl Into<String>) {
        self.predicates.push(expr.into());
    }

    /// Append an order key; keys join with commas in insertion order.
    pub(crate) fn order(&mut self, expr: impl Into<String>) {
        self.order_by.push(expr.into());
    }

    /// Append the pagination tail. Zero means "no bound" for both knobs;
    /// SQLite needs an explicit `LIMIT -1` to carry a bare offset.
    pub(crate) fn limit_offset(&mut self, limit: usize, offset: usize) {
        if limit > 0 {
            let ph = self.bind(SqlValue::Integer(limit as i64));
            self.tail.push(format!("LIMIT {ph}"));
        } else if offset > 0 && !self.server {
            self.tail.push("LIMIT -1".to_string());
        }
        if offset > 0 {
            let ph = self.bind(SqlValue::Integer(offset as i64));
            self.tail.push(format!("OFFSET {ph}"));
        }
    }

    /// Render the statement and hand back its parameters.
    pub(crate) fn build(self) -> (String, Vec<SqlValue>) {
        let mut sql = format!("SELECT {} FROM {}", self.select.join(", "), self.from);
        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicates.join(" AND "));
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        for part in &self.tail {
            sql.push(' ');
            sql.push_str(part);
        }
        (sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_placeholders_and_clauses() {
        let mut b = SelectBuilder::new(false, "documents doc");
        b.column("doc.id");
        b.column("count(*) OVER () AS total");
        let ph = b.bind(SqlValue::Text("x".into()));
        b.predicate(format!("doc.content = {ph}"));
        b.predicate("doc.name = 'c'");
        b.order("doc.id ASC NULLS LAST");
        b.limit_offset(3, 2);

        let (sql, params) = b.build();
        assert_eq!(
            sql,
            "SELECT doc.id, count(*) OVER () AS total FROM documents doc \
             WHERE doc.content = ? AND doc.name = 'c' \
             ORDER BY doc.id ASC NULLS LAST LIMIT ? OFFSET ?"
        );
        assert_eq!(
            params,
            vec![
                SqlValue::Text("x".into()),
                SqlValue::Integer(3),
                SqlValue::Integer(2)
            ]
        );
    }

    #[test]
    fn test_server_placeholders_are_numbered() {
        let mut b = SelectBuilder::new(true, "documents doc");
        b.column("doc.id");
        let p1 = b.bind(SqlValue::Text("a".into()));
        let p2 = b.bind(SqlValue::Text("b".into()));
        b.predicate(format!("doc.content IN ({p1}, {p2})"));
        b.limit_offset(5, 0);

        let (sql, _) = b.build();
        assert_eq!(
            sql,
            "SELECT doc.id FROM documents doc WHERE doc.content IN ($1, $2) LIMIT $3"
        );
    }

    #[test]
    fn test_offset_without_limit() {
        let mut b = SelectBuilder::new(false, "documents doc");
        b.column("doc.id");
        b.limit_offset(0, 4);
        let (sql, params) = b.build();
        assert_eq!(sql, "SELECT doc.id FROM documents doc LIMIT -1 OFFSET ?");
        assert_eq!(params, vec![SqlValue::Integer(4)]);

        let mut b = SelectBuilder::new(true, "documents doc");
        b.column("doc.id");
        b.limit_offset(0, 4);
        let (sql, _) = b.build();
        assert_eq!(sql, "SELECT doc.id FROM documents doc OFFSET $1");
    }

    #[test]
    fn test_zero_limit_and_offset_add_nothing() {
        let mut b = SelectBuilder::new(false, "documents doc");
        b.column("doc.id");
        b.limit_offset(0, 0);
        let (sql, params) = b.build();
        assert_eq!(sql, "SELECT doc.id FROM documents doc");
        assert!(params.is_empty());
    }
}
