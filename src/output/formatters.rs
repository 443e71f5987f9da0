//! Reusable formatting utilities for CLI output

use colored::Colorize;
use serde_json::Value;

use crate::client::normalize::{NOT_AVAILABLE, to_iso_date};

/// Render one JSON value as a table cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) if s.trim().is_empty() => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Shorten a timestamp to its date; unknown shapes pass through
pub fn format_date(raw: &str) -> String {
    to_iso_date(&Value::String(raw.to_string())).unwrap_or_else(|| raw.to_string())
}

/// Days until a visa expires, colored by urgency.
///
/// # Example output
/// - `expired` (red)
/// - `3 days` (yellow, within a week)
/// - `45 days`
pub fn format_days_remaining(days: Option<i64>) -> String {
    match days {
        None => NOT_AVAILABLE.to_string(),
        Some(d) if d < 0 => "expired".red().to_string(),
        Some(1) => "1 day".yellow().to_string(),
        Some(d) if d <= 7 => format!("{} days", d).yellow().to_string(),
        Some(d) => format!("{} days", d),
    }
}

/// Truncate to `max` characters with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
