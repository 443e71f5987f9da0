//! Response and request shape fixes applied by the domain functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Shown wherever the backend left a display field empty
pub const NOT_AVAILABLE: &str = "N/A";

const ISO_DATE: &str = "%Y-%m-%d";

/// Set each missing, null or blank field of every record to [`NOT_AVAILABLE`].
///
/// Accepts a single record, an array of records, or a page object carrying
/// its records under `items` or `data`.
pub fn fill_missing(value: &mut Value, fields: &[&str]) {
    if fields.is_empty() {
        return;
    }
    for record in records_mut(value) {
        if let Value::Object(map) = record {
            for field in fields {
                let empty = match map.get(*field) {
                    None | Some(Value::Null) => true,
                    Some(Value::String(s)) => s.trim().is_empty(),
                    _ => false,
                };
                if empty {
                    map.insert((*field).to_string(), Value::String(NOT_AVAILABLE.into()));
                }
            }
        }
    }
}

fn records_mut(value: &mut Value) -> Vec<&mut Value> {
    let page_key = match &*value {
        Value::Object(map) if map.contains_key("items") => Some("items"),
        Value::Object(map) if map.contains_key("data") => Some("data"),
        _ => None,
    };

    match (value, page_key) {
        (Value::Array(items), _) => items.iter_mut().collect(),
        (Value::Object(map), Some(key)) => match map.get_mut(key) {
            Some(Value::Array(items)) => items.iter_mut().collect(),
            Some(other) => vec![other],
            None => Vec::new(),
        },
        (other, _) => vec![other],
    }
}

/// Rewrite the named date fields of a request body as `YYYY-MM-DD`
pub fn normalize_dates(body: &mut Value, fields: &[&str]) {
    let Value::Object(map) = body else {
        return;
    };
    for field in fields {
        if let Some(value) = map.get_mut(*field)
            && let Some(date) = to_iso_date(value)
        {
            *value = Value::String(date);
        }
    }
}

/// Parse the date shapes the backend and users hand us.
///
/// Unknown formats return `None` and are left for the server to judge.
pub fn to_iso_date(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.date_naive().format(ISO_DATE).to_string());
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(dt.date().format(ISO_DATE).to_string());
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt.date().format(ISO_DATE).to_string());
            }
            ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.format(ISO_DATE).to_string())
        }
        // Epoch milliseconds
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive().format(ISO_DATE).to_string()),
        _ => None,
    }
}

/// Reject blank identifiers before building a path from them
pub fn require_id<'a>(
    id: &'a str,
    what: &'static str,
) -> std::result::Result<&'a str, crate::error::ApiError> {
    let id = id.trim();
    if id.is_empty() {
        Err(crate::error::ApiError::MissingIdentifier(what))
    } else {
        Ok(id)
    }
}
