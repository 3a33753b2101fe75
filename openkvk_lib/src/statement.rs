//! Reading caller-written statements before they are paged.
//!
//! The only clause recognized is a trailing `LIMIT n`, which is lifted out so
//! the row count can go through the normal paging path.

use crate::error::OpenKvkError;

/// A caller statement with its trailing row limit split off.
#[derive(Debug, PartialEq, Eq)]
pub struct Statement {
    pub body: String,
    pub limit: Option<u64>,
}

fn split_last_token(s: &str) -> (&str, &str) {
    let s = s.trim_end();
    match s.rfind(char::is_whitespace) {
        Some(idx) => (s[..idx].trim_end(), s[idx..].trim_start()),
        None => ("", s),
    }
}

fn not_a_statement(text: &str) -> OpenKvkError {
    OpenKvkError::InvalidType(format!("'{}' is not a query statement", text))
}

/// Splits a trailing `LIMIT n` (any case, optional `;`) off `text`.
pub fn parse_statement(text: &str) -> Result<Statement, OpenKvkError> {
    let trimmed = text.trim().trim_end_matches(|c: char| c == ';' || c.is_whitespace());
    if trimmed.is_empty() {
        return Err(not_a_statement(text));
    }

    let (head, last) = split_last_token(trimmed);
    if last.eq_ignore_ascii_case("LIMIT") {
        return Err(OpenKvkError::InvalidType(
            "LIMIT is missing a row count".to_string(),
        ));
    }

    let (rest, keyword) = split_last_token(head);
    if !keyword.eq_ignore_ascii_case("LIMIT") {
        return Ok(Statement {
            body: trimmed.to_string(),
            limit: None,
        });
    }

    let limit = last.parse::<u64>().map_err(|_| {
        OpenKvkError::InvalidType(format!("LIMIT value '{}' is not an integer", last))
    })?;
    if rest.is_empty() {
        return Err(not_a_statement(text));
    }
    Ok(Statement {
        body: rest.to_string(),
        limit: Some(limit),
    })
}
