//! Common display utilities and helpers

use serde_json::Value;

use crate::client::normalize::NOT_AVAILABLE;

/// Render a backend identifier, which may be numeric or a string
pub fn id_text(id: Option<&Value>) -> String {
    match id {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Optional text with the "N/A" placeholder
pub fn or_na(value: Option<&str>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}
