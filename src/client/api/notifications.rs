//! Notifications: listing with derived kind, mark-as-read

use reqwest::Method;
use serde_json::Value;

use super::Resource;
use crate::client::ApiClient;
use crate::client::models::Notification;
use crate::client::normalize::require_id;
use crate::error::{ApiError, Error, Result};

impl ApiClient {
    /// List notifications, newest first as the server returns them
    pub async fn list_notifications(&self, unread_only: bool) -> Result<Vec<Notification>> {
        let params: &[(&str, &str)] = if unread_only {
            &[("unread_only", "true")]
        } else {
            &[]
        };
        let value = self
            .get_cached(Resource::Notifications.path(), params)
            .await?
            .unwrap_or(Value::Array(Vec::new()));

        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value::<Notification>(item)
                    .map(Notification::classify)
                    .map_err(|e| {
                        Error::from(ApiError::InvalidResponse(format!(
                            "Failed to parse notification: {}",
                            e
                        )))
                    })
            })
            .collect()
    }

    /// `PATCH /notifications/{id}/mark-read`
    pub async fn mark_notification_read(&self, id: &str) -> Result<()> {
        let id = require_id(id, "notification id")?;
        let path = format!("/notifications/{}/mark-read", id);
        self.mutate(Method::PATCH, &path, None).await?;
        Ok(())
    }
}
