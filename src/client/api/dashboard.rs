//! Dashboard batch read
//!
//! Four independent reads run concurrently. A part that fails keeps its
//! default value and is named in [`DashboardData::failed`]; the batch as a
//! whole never errors.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ApiClient;
use crate::client::models::DashboardData;
use crate::client::parallel::settle_all;
use crate::error::{ApiError, Result};

/// (part name, endpoint)
const DASHBOARD_PARTS: [(&str, &str); 4] = [
    ("stats", "/dashboard/stats"),
    ("visa_expiries", "/dashboard/visa-expiries"),
    ("case_trends", "/dashboard/case-trends"),
    ("nationalities", "/dashboard/nationalities"),
];

impl ApiClient {
    pub async fn dashboard(&self) -> DashboardData {
        let tasks = DASHBOARD_PARTS
            .iter()
            .map(|&(name, path)| (name, self.get_cached(path, &[])))
            .collect();

        let mut data = DashboardData::default();
        for (name, result) in settle_all(tasks, DASHBOARD_PARTS.len()).await {
            let applied = result.and_then(|body| apply_part(&mut data, name, body));
            if let Err(e) = applied {
                warn!("Dashboard part '{}' failed: {}", name, e);
                data.failed.push(name.to_string());
            }
        }
        data
    }
}

fn apply_part(data: &mut DashboardData, name: &str, body: Option<Value>) -> Result<()> {
    let Some(body) = body else {
        return Ok(());
    };
    match name {
        "stats" => data.stats = decode(body)?,
        "visa_expiries" => data.visa_expiries = decode(unwrap_items(body))?,
        "case_trends" => data.case_trends = decode(unwrap_items(body))?,
        "nationalities" => data.nationalities = decode(unwrap_items(body))?,
        _ => {}
    }
    Ok(())
}

/// Accept both a bare array and `{"items": [...]}`
fn unwrap_items(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("items") => {
            map.remove("items").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn decode<T: DeserializeOwned + Default>(body: Value) -> Result<T> {
    if body.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Unexpected dashboard shape: {}", e)).into())
}
