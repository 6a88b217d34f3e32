//! Query text rewriting for the two backend search dialects.
//!
//! User queries use a small shared grammar: bare words, `and`/`or`
//! connectives in any case, and trailing `*` wildcards. The embedded
//! backend (SQLite FTS5) wants uppercase `AND`/`OR` and native `word*`
//! wildcards; the server backend (`to_tsquery`) wants explicit `&`/`|`
//! between every term and `word:*` prefixes.
//!
//! Rewriting is a single left-to-right token walk. It is deliberately not
//! idempotent for the server dialect: re-running it would insert a second
//! round of implicit conjunctions.

/// Which backend's search syntax to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// SQLite FTS5 `MATCH` syntax.
    Embedded,
    /// PostgreSQL `to_tsquery` syntax.
    Server,
}

/// Rewrite a raw user query into backend search syntax.
///
/// Leading/trailing whitespace is stripped. An empty result is a
/// non-match, not an error; callers route empty *input* to plain
/// retrieval before consulting the parser.
#[must_use]
pub fn rewrite(raw: &str, dialect: Dialect) -> String {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    match dialect {
        Dialect::Embedded => rewrite_embedded(&tokens),
        Dialect::Server => rewrite_server(&tokens),
    }
}

/// Uppercase whole-word `and`/`or`; pass everything else through.
fn rewrite_embedded(tokens: &[&str]) -> String {
    let mapped: Vec<&str> = tokens
        .iter()
        .map(|&tok| {
            if tok.eq_ignore_ascii_case("and") {
                "AND"
            } else if tok.eq_ignore_ascii_case("or") {
                "OR"
            } else {
                tok
            }
        })
        .collect();
    mapped.join(" ")
}

/// Insert implicit `&` conjunctions, map word operators to `&`/`|`, and
/// rewrite trailing `*` wildcards to `:*` prefixes.
fn rewrite_server(tokens: &[&str]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len() * 2);
    for (i, &tok) in tokens.iter().enumerate() {
        out.push(server_token(tok));
        if !is_operator(tok) {
            if let Some(next) = tokens.get(i + 1) {
                if !is_operator(next) {
                    out.push("&".to_string());
                }
            }
        }
    }
    out.join(" ")
}

/// Tokens recognized as Boolean connectives in the shared grammar.
fn is_operator(tok: &str) -> bool {
    tok == "&" || tok == "|" || tok.eq_ignore_ascii_case("and") || tok.eq_ignore_ascii_case("or")
}

fn server_token(tok: &str) -> String {
    if tok.eq_ignore_ascii_case("and") {
        return "&".to_string();
    }
    if tok.eq_ignore_ascii_case("or") {
        return "|".to_string();
    }
    // `word*` becomes the tsquery prefix form `word:*`; a bare `*` or an
    // interior star is left alone.
    if let Some(stem) = tok.strip_suffix('*') {
        if stem.chars().last().is_some_and(char::is_alphanumeric) {
            return format!("{stem}:*");
        }
    }
    tok.to_string()
}
