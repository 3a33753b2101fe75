//! CLI subcommand implementations.

pub mod bankruptcies;
pub mod companies;
pub mod query;

use anyhow::{Context, Result};
use openkvk_lib::FilterSet;

/// Builds a filter set from repeated `--filter field=value` arguments.
pub fn parse_filters(pairs: &[String]) -> Result<FilterSet> {
    let mut filters = FilterSet::new();
    for pair in pairs {
        let (field, value) = pair
            .split_once('=')
            .with_context(|| format!("filter '{}' must look like field=value", pair))?;
        filters.insert(field, value)?;
    }
    Ok(filters)
}

/// Splits a comma separated `--fields` value. Empty means all columns.
pub fn parse_fields(fields: &Option<String>) -> Vec<&str> {
    match fields {
        Some(f) => f.split(',').map(str::trim).filter(|s| !s.is_empty()).collect(),
        None => Vec::new(),
    }
}
