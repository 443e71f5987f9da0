//! Dashboard aggregate

use serde::{Deserialize, Serialize};

/// Headline counters from `/dashboard/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_foreigners: u64,
    pub active_visas: u64,
    pub overstays: u64,
    pub refugee_cases: u64,
    pub out_of_view_cases: u64,
    pub pending_grievances: u64,
    pub citizenship_requests: u64,
}

/// Entry of `/dashboard/visa-expiries`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiringVisa {
    pub foreigner_id: Option<serde_json::Value>,
    pub full_name: String,
    pub visa_type: Option<String>,
    pub expiry_date: Option<String>,
    pub days_remaining: Option<i64>,
}

/// Entry of `/dashboard/case-trends`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPoint {
    pub period: String,
    pub count: u64,
}

/// Entry of `/dashboard/nationalities`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NationalityCount {
    pub nationality: String,
    pub count: u64,
}

/// Best-effort aggregate; parts that failed hold defaults and are named in
/// `failed`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub visa_expiries: Vec<ExpiringVisa>,
    pub case_trends: Vec<TrendPoint>,
    pub nationalities: Vec<NationalityCount>,
    pub failed: Vec<String>,
}

impl DashboardData {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
