//! Notifications and their display category

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coarse category used to pick how a notification is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Overstay,
    Expiry,
    General,
}

impl NotificationKind {
    /// Map an explicit server category onto a kind
    pub fn from_category(category: &str) -> Option<Self> {
        match category.trim().to_ascii_lowercase().as_str() {
            "overstay" => Some(Self::Overstay),
            "expiry" | "visa_expiry" | "expiring" => Some(Self::Expiry),
            "general" | "info" => Some(Self::General),
            _ => None,
        }
    }

    /// Keyword fallback when the server sends no usable category.
    ///
    /// Case-insensitive; "overstay" is checked before "expire".
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("overstay") {
            Self::Overstay
        } else if lower.contains("expire") {
            Self::Expiry
        } else {
            Self::General
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overstay => "overstay",
            Self::Expiry => "expiry",
            Self::General => "general",
        }
    }
}

/// A notification record with its derived kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub is_read: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Server-supplied category, when present
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Filled in by [`Notification::classify`]
    #[serde(default = "general")]
    pub kind: NotificationKind,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn general() -> NotificationKind {
    NotificationKind::General
}

impl Notification {
    /// Derive `kind`, preferring the explicit category over message keywords
    pub fn classify(mut self) -> Self {
        self.kind = self
            .category
            .as_deref()
            .or_else(|| self.extra.get("category").and_then(Value::as_str))
            .and_then(NotificationKind::from_category)
            .unwrap_or_else(|| NotificationKind::from_message(&self.message));
        self
    }
}
