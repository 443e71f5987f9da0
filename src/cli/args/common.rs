//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per record
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

impl OutputFormat {
    /// Parse a preference stored in the config file
    pub fn from_preference(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a `key=value` pair for query parameters
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
