//! Notification display model

use serde::Serialize;
use tabled::Tabled;

use super::common::id_text;
use crate::client::models::Notification;
use crate::output::formatters::{format_date, truncate};

const MESSAGE_WIDTH: usize = 60;

/// Notification display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NotificationDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    /// Derived kind (overstay, expiry, general)
    #[tabled(rename = "KIND")]
    pub kind: String,

    #[tabled(rename = "READ")]
    pub read: String,

    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "MESSAGE")]
    pub message: String,
}

impl From<&Notification> for NotificationDisplay {
    fn from(n: &Notification) -> Self {
        Self {
            id: id_text(n.id.as_ref()),
            kind: n.kind.as_str().to_string(),
            read: if n.is_read { "yes" } else { "no" }.to_string(),
            date: n
                .created_at
                .as_deref()
                .map(format_date)
                .unwrap_or_else(|| "--".to_string()),
            message: truncate(&n.message, MESSAGE_WIDTH),
        }
    }
}
