use openkvk_api::MAX_ROWS;

use crate::error::OpenKvkError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_SBI_LENGTH: usize = 10;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, OpenKvkError> {
    if input.len() > max_len {
        return Err(OpenKvkError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(OpenKvkError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a company name, city or court name used in an `ILIKE` pattern.
pub fn validate_search(input: &str) -> Result<String, OpenKvkError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate an SBI activity code: digits only, e.g. `6201` or `01131`.
pub fn validate_sbi_code(input: &str) -> Result<String, OpenKvkError> {
    let code = input.trim();
    if code.is_empty() || code.len() > MAX_SBI_LENGTH || !code.chars().all(|c| c.is_ascii_digit())
    {
        return Err(OpenKvkError::InvalidInput(format!(
            "invalid SBI code '{}'. Expected up to {} digits",
            input, MAX_SBI_LENGTH
        )));
    }
    Ok(code.to_string())
}

/// Validate a KVK number given as text: 8 digits, leading zeros allowed.
pub fn validate_kvk_number(input: &str) -> Result<u64, OpenKvkError> {
    let trimmed = input.trim();
    if trimmed.len() != 8 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(OpenKvkError::InvalidInput(format!(
            "invalid KVK number '{}'. Expected 8 digits",
            input
        )));
    }
    trimmed
        .parse::<u64>()
        .map_err(|e| OpenKvkError::InvalidInput(e.to_string()))
}

/// Validate a requested row count (must be in 1..=MAX_ROWS).
pub fn validate_limit(limit: u64) -> Result<u64, OpenKvkError> {
    if limit < 1 {
        return Err(OpenKvkError::InvalidInput(
            "limit must be >= 1".to_string(),
        ));
    }
    if limit > MAX_ROWS {
        return Err(OpenKvkError::InvalidInput(format!(
            "limit must be <= {}",
            MAX_ROWS
        )));
    }
    Ok(limit)
}

/// Validate selected columns and join them for a `SELECT` list.
/// An empty selection means every column.
pub fn validate_fields(fields: &[&str]) -> Result<String, OpenKvkError> {
    if fields.is_empty() {
        return Ok("*".to_string());
    }
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let field = field.trim();
        let ok = field == "*"
            || (!field.is_empty()
                && field
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.'));
        if !ok {
            return Err(OpenKvkError::InvalidInput(format!(
                "invalid field name '{}'",
                field
            )));
        }
        out.push(field);
    }
    Ok(out.join(","))
}

/// Read a boolean flag from text: true/false, yes/no, on/off, 1/0.
pub fn parse_bool(input: &str) -> Result<bool, OpenKvkError> {
    match input.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(OpenKvkError::InvalidType(format!(
            "'{}' is not a boolean value",
            input
        ))),
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
