//! Generic record operations over [`Resource`]

use log::debug;
use reqwest::Method;
use serde_json::Value;

use super::Resource;
use crate::client::ApiClient;
use crate::client::normalize::{fill_missing, normalize_dates, require_id};
use crate::error::{ApiError, Result};

impl ApiClient {
    /// List a resource; cached, with display fields defaulted
    pub async fn list(&self, resource: Resource, params: &[(&str, &str)]) -> Result<Value> {
        let mut value = self
            .get_cached(resource.path(), params)
            .await?
            .unwrap_or_else(|| Value::Array(Vec::new()));
        fill_missing(&mut value, resource.display_fields());
        Ok(value)
    }

    /// Fetch one record; cached
    pub async fn get(&self, resource: Resource, id: &str) -> Result<Value> {
        let id = require_id(id, resource.id_label())?;
        let mut value = self
            .get_cached(&resource.item_path(id), &[])
            .await?
            .ok_or_else(|| {
                ApiError::InvalidResponse(format!("Empty body for {}", resource.item_path(id)))
            })?;
        fill_missing(&mut value, resource.display_fields());
        Ok(value)
    }

    /// Create a record, returning whatever the backend echoes back
    pub async fn create(&self, resource: Resource, mut body: Value) -> Result<Option<Value>> {
        ensure_writable(resource)?;
        normalize_dates(&mut body, resource.date_fields());
        debug!("Creating {:?}", resource);
        self.mutate(Method::POST, resource.path(), Some(&body)).await
    }

    /// Replace a record (`PUT`)
    pub async fn update(
        &self,
        resource: Resource,
        id: &str,
        mut body: Value,
    ) -> Result<Option<Value>> {
        ensure_writable(resource)?;
        let id = require_id(id, resource.id_label())?;
        normalize_dates(&mut body, resource.date_fields());
        self.mutate(Method::PUT, &resource.item_path(id), Some(&body)).await
    }

    pub async fn delete(&self, resource: Resource, id: &str) -> Result<()> {
        ensure_writable(resource)?;
        let id = require_id(id, resource.id_label())?;
        self.mutate(Method::DELETE, &resource.item_path(id), None).await?;
        Ok(())
    }
}

fn ensure_writable(resource: Resource) -> Result<()> {
    if resource.is_read_only() {
        return Err(crate::error::Error::Other(format!(
            "{} is read-only",
            resource.path()
        )));
    }
    Ok(())
}
