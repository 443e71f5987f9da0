//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// When the output was produced
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the metadata envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_carries_version() {
        let output = JsonOutput::new(json!({"id": 1}));
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
    }

    #[test]
    fn test_format_json_record_list() {
        let records = json!([{"id": 4, "visa_type": "work"}]);
        let result = format_json(&records).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["data"][0]["visa_type"], "work");
        assert!(parsed["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_format_json_empty() {
        let result = format_json(&json!([])).unwrap();
        assert!(result.contains("\"data\": []"));
    }
}
