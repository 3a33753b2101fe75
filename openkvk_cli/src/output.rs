use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use openkvk_lib::types::ResponseFormat;
use openkvk_lib::{KvkResult, Record};
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Table,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "table" => Ok(OutputFormat::Table),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => anyhow::bail!(
                "unsupported output format '{}'. Valid values: json, csv, table, markdown",
                value
            ),
        }
    }

    /// What the engine should return for this output. Tables are rendered
    /// from structured records.
    pub fn response_format(&self) -> ResponseFormat {
        match self {
            OutputFormat::Json => ResponseFormat::Json,
            OutputFormat::Csv => ResponseFormat::Csv,
            OutputFormat::Table | OutputFormat::Markdown => ResponseFormat::Structured,
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn records_table(records: &[Record], style: OutputFormat) -> String {
    let Some(first) = records.first() else {
        return "No results".to_string();
    };
    let mut builder = Builder::default();
    builder.push_record(first.keys().cloned());
    for record in records {
        builder.push_record(first.keys().map(|k| record.get(k).map(cell).unwrap_or_default()));
    }
    let mut table = builder.build();
    if style == OutputFormat::Markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

/// Renders a lookup result as the text written to the terminal or file.
pub fn render(result: KvkResult, format: OutputFormat) -> Result<String> {
    match (result, format) {
        (KvkResult::Structured(records), OutputFormat::Table | OutputFormat::Markdown) => {
            Ok(records_table(&records, format))
        }
        (result, _) => Ok(result.into_text()?),
    }
}

/// Writes `text` to `path`, or stdout when no path is given.
pub fn write_output(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote result to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
