//! Table output formatting

use serde_json::Value;
use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::formatters::cell_text;

const EMPTY: &str = "No results found.";

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return EMPTY.to_string();
    }

    let mut table = Table::new(data);
    style(&mut table);
    table.to_string()
}

/// Format JSON records as a table with the given columns.
///
/// Accepts an array, a page object (`items` or `data`), or a single record.
/// With no columns configured, the keys of the first record are used.
pub fn format_records(value: &Value, columns: &[&str]) -> String {
    let rows = rows_of(value);
    if rows.is_empty() {
        return EMPTY.to_string();
    }

    let columns: Vec<String> = if columns.is_empty() {
        rows[0]
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    } else {
        columns.iter().map(|c| c.to_string()).collect()
    };

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.to_uppercase()));
    for row in rows {
        builder.push_record(
            columns
                .iter()
                .map(|c| cell_text(row.get(c.as_str()).unwrap_or(&Value::Null))),
        );
    }

    let mut table = builder.build();
    style(&mut table);
    table.to_string()
}

/// Two-column key/value table
pub fn format_pairs(pairs: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    for (key, value) in pairs {
        builder.push_record([key.to_string(), value.clone()]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn style(table: &mut Table) {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
}

fn rows_of(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("items").or_else(|| map.get("data")) {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![value],
        },
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Tabled)]
    struct TestRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "KIND")]
        kind: String,
    }

    #[test]
    fn test_format_table_empty() {
        let items: Vec<TestRow> = vec![];
        assert_eq!(format_table(&items), "No results found.");
    }

    #[test]
    fn test_format_table_uses_rounded_style() {
        let items = vec![TestRow {
            id: "7".to_string(),
            kind: "overstay".to_string(),
        }];

        let result = format_table(&items);

        assert!(result.contains("KIND"));
        assert!(result.contains("overstay"));
        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }

    #[test]
    fn test_format_records_selects_columns() {
        let value = json!([
            {"id": 1, "full_name": "Amina Yusuf", "nationality": "SO", "notes": "hidden"},
            {"id": 2, "full_name": "Jon Berg", "nationality": null}
        ]);

        let result = format_records(&value, &["id", "full_name", "nationality"]);

        assert!(result.contains("FULL_NAME"));
        assert!(result.contains("Amina Yusuf"));
        assert!(result.contains("N/A"));
        assert!(!result.contains("hidden"));
    }

    #[test]
    fn test_format_records_page_object() {
        let value = json!({"total": 1, "items": [{"id": 9, "status": "open"}]});
        let result = format_records(&value, &["id", "status"]);
        assert!(result.contains("open"));
        assert!(!result.contains("TOTAL"));
    }

    #[test]
    fn test_format_records_falls_back_to_keys() {
        let value = json!({"id": 3, "status": "pending"});
        let result = format_records(&value, &[]);
        assert!(result.contains("STATUS"));
        assert!(result.contains("pending"));
    }

    #[test]
    fn test_format_records_empty() {
        assert_eq!(format_records(&json!([]), &["id"]), "No results found.");
        assert_eq!(format_records(&Value::Null, &["id"]), "No results found.");
    }

    #[test]
    fn test_format_pairs() {
        let result = format_pairs(&[("Overstays", "4".to_string())]);
        assert!(result.contains("Overstays"));
        assert!(result.contains("4"));
    }
}
