use super::*;
use serde_json::json;

fn records() -> Vec<Record> {
    let rows = json!([
        {"kvks": 27312152, "bedrijfsnaam": "Kinkrsoftware", "status": null},
        {"kvks": 33012345, "bedrijfsnaam": "Bytefabriek", "status": "Opgeheven"}
    ]);
    serde_json::from_value(rows).unwrap()
}

// -- format parsing --

#[test]
fn test_parse_formats() {
    assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::parse("CSV").unwrap(), OutputFormat::Csv);
    assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
    assert_eq!(OutputFormat::parse("md").unwrap(), OutputFormat::Markdown);
}

#[test]
fn test_parse_unknown_format() {
    assert!(OutputFormat::parse("xml").is_err());
}

#[test]
fn test_response_format_mapping() {
    assert_eq!(OutputFormat::Json.response_format(), ResponseFormat::Json);
    assert_eq!(OutputFormat::Csv.response_format(), ResponseFormat::Csv);
    assert_eq!(
        OutputFormat::Table.response_format(),
        ResponseFormat::Structured
    );
}

// -- rendering --

#[test]
fn test_table_has_header_and_rows() {
    let out = render(KvkResult::Structured(records()), OutputFormat::Table).unwrap();
    let header = out.lines().nth(1).unwrap();
    assert!(header.contains("kvks"));
    assert!(header.contains("bedrijfsnaam"));
    assert!(out.contains("Kinkrsoftware"));
    assert!(out.contains("Opgeheven"));
}

#[test]
fn test_markdown_table() {
    let out = render(KvkResult::Structured(records()), OutputFormat::Markdown).unwrap();
    let header = out.lines().next().unwrap();
    assert!(header.starts_with('|'));
    assert!(header.contains("bedrijfsnaam"));
    assert!(out.lines().nth(1).unwrap().contains("---"));
}

#[test]
fn test_empty_table() {
    let out = render(KvkResult::Structured(Vec::new()), OutputFormat::Table).unwrap();
    assert_eq!(out, "No results");
}

#[test]
fn test_text_results_pass_through() {
    let out = render(
        KvkResult::Csv("bedrijfsnaam\nKinkrsoftware".to_string()),
        OutputFormat::Csv,
    )
    .unwrap();
    assert_eq!(out, "bedrijfsnaam\nKinkrsoftware");
}

#[test]
fn test_null_cell_is_blank() {
    assert_eq!(cell(&Value::Null), "");
    assert_eq!(cell(&json!("x")), "x");
    assert_eq!(cell(&json!(12)), "12");
}

// -- file output --

#[test]
fn test_write_output_to_file() {
    let path = std::env::temp_dir().join(format!("openkvk-output-{}.csv", std::process::id()));
    write_output("bedrijfsnaam\nKinkrsoftware", Some(&path)).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "bedrijfsnaam\nKinkrsoftware"
    );
    std::fs::remove_file(&path).unwrap();
}
