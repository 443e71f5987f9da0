//! Grievance status workflow

use reqwest::Method;
use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::client::normalize::require_id;
use crate::error::{ApiError, Result};

impl ApiClient {
    /// Move a grievance to a new status (`PATCH /grievances/{id}/status`)
    pub async fn update_grievance_status(&self, id: &str, status: &str) -> Result<Option<Value>> {
        let id = require_id(id, "grievance id")?;
        let status = status.trim();
        if status.is_empty() {
            return Err(ApiError::MissingIdentifier("grievance status").into());
        }

        let path = format!("/grievances/{}/status", id);
        self.mutate(Method::PATCH, &path, Some(&json!({ "status": status })))
            .await
    }
}
