//! Merging raw page bodies into one result in the selected format.
//!
//! Only the first page's header is used. Rows keep page order, then the order
//! they had within their page. A single page goes through the same merge as
//! many pages.

use std::io;

use openkvk_api::types::{Payload, ResponseFormat, ResultSet};
use serde::Serialize;
use serde_json::{ser::Formatter, Map, Value};

use crate::error::OpenKvkError;

/// One row keyed by header name, in header order.
pub type Record = Map<String, Value>;

/// A fully reassembled response.
#[derive(Debug, Clone, PartialEq)]
pub enum KvkResult {
    Structured(Vec<Record>),
    Json(String),
    Csv(String),
}

impl KvkResult {
    /// The records, if this result was requested in structured form.
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            KvkResult::Structured(records) => Some(records),
            _ => None,
        }
    }

    /// Renders the result as text. Structured records are written as JSON.
    pub fn into_text(self) -> Result<String, OpenKvkError> {
        match self {
            KvkResult::Structured(records) => to_json_text(&records),
            KvkResult::Json(text) | KvkResult::Csv(text) => Ok(text),
        }
    }
}

/// Merges `pages` according to `format`.
pub fn reassemble(format: ResponseFormat, pages: &[String]) -> Result<KvkResult, OpenKvkError> {
    match format {
        ResponseFormat::Structured => Ok(KvkResult::Structured(merge_records(pages)?)),
        ResponseFormat::Json => Ok(KvkResult::Json(to_json_text(&merge_records(pages)?)?)),
        ResponseFormat::Csv => Ok(KvkResult::Csv(merge_csv(pages))),
    }
}

fn parse_page(index: usize, body: &str) -> Result<ResultSet, OpenKvkError> {
    let payload: Payload =
        serde_json::from_str(body).map_err(|e| OpenKvkError::MalformedPage {
            page: index,
            reason: e.to_string(),
        })?;
    payload
        .into_iter()
        .next()
        .map(|envelope| envelope.result)
        .ok_or_else(|| OpenKvkError::MalformedPage {
            page: index,
            reason: "empty response array".to_string(),
        })
}

fn merge_records(pages: &[String]) -> Result<Vec<Record>, OpenKvkError> {
    let mut header: Option<Vec<String>> = None;
    let mut records = Vec::new();
    for (index, body) in pages.iter().enumerate() {
        let result = parse_page(index, body)?;
        let header = header.get_or_insert(result.header);
        for row in result.rows {
            let record: Record = header.iter().cloned().zip(row).collect();
            records.push(record);
        }
    }
    Ok(records)
}

/// Matches the service's own JSON output: `", "` and `": "` separators, and
/// non-ASCII characters written as `\uXXXX` escapes.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn to_json_text(records: &[Record]) -> Result<String, OpenKvkError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    records.serialize(&mut ser)?;
    // Non-ASCII is escaped, so the buffer is plain ASCII.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn split_fields(line: &str) -> Vec<&str> {
    line.trim_end_matches('\r')
        .split(',')
        .map(|field| field.trim_matches('"'))
        .collect()
}

fn merge_csv(pages: &[String]) -> String {
    let mut header: Option<Vec<&str>> = None;
    let mut records: Vec<Vec<&str>> = Vec::new();
    for body in pages {
        let mut lines = body.split('\n');
        if let Some(first) = lines.next() {
            if header.is_none() {
                header = Some(split_fields(first));
            }
        }
        for line in lines {
            let record = split_fields(line);
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            records.push(record);
        }
    }

    let mut out = Vec::with_capacity(records.len() + 1);
    out.push(header.unwrap_or_default().join(","));
    out.extend(records.iter().map(|record| record.join(",")));
    out.join("\n")
}
