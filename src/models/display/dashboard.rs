//! Dashboard display models

use serde::Serialize;
use tabled::Tabled;

use super::common::or_na;
use crate::client::models::{ExpiringVisa, NationalityCount, TrendPoint};
use crate::output::formatters::format_days_remaining;

/// Upcoming visa expiry row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ExpiringVisaDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "VISA")]
    pub visa_type: String,

    #[tabled(rename = "EXPIRES")]
    pub expiry_date: String,

    #[tabled(rename = "REMAINING")]
    pub remaining: String,
}

impl From<&ExpiringVisa> for ExpiringVisaDisplay {
    fn from(v: &ExpiringVisa) -> Self {
        Self {
            name: or_na(Some(&v.full_name)),
            visa_type: or_na(v.visa_type.as_deref()),
            expiry_date: or_na(v.expiry_date.as_deref()),
            remaining: format_days_remaining(v.days_remaining),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TrendDisplay {
    #[tabled(rename = "PERIOD")]
    pub period: String,

    #[tabled(rename = "CASES")]
    pub count: u64,
}

impl From<&TrendPoint> for TrendDisplay {
    fn from(t: &TrendPoint) -> Self {
        Self {
            period: t.period.clone(),
            count: t.count,
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NationalityDisplay {
    #[tabled(rename = "NATIONALITY")]
    pub nationality: String,

    #[tabled(rename = "COUNT")]
    pub count: u64,
}

impl From<&NationalityCount> for NationalityDisplay {
    fn from(n: &NationalityCount) -> Self {
        Self {
            nationality: or_na(Some(&n.nationality)),
            count: n.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiring_visa_display_fills_gaps() {
        colored::control::set_override(false);
        let visa = ExpiringVisa {
            full_name: "Amina Yusuf".to_string(),
            expiry_date: Some("2024-05-01".to_string()),
            days_remaining: Some(30),
            ..ExpiringVisa::default()
        };

        let display = ExpiringVisaDisplay::from(&visa);

        assert_eq!(display.name, "Amina Yusuf");
        assert_eq!(display.visa_type, "N/A");
        assert_eq!(display.remaining, "30 days");
    }
}
