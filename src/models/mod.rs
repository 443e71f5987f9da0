//! Display models for CLI output
//!
//! Converts API response types into rows for table and JSON output.

pub mod display;

pub use display::{
    ExpiringVisaDisplay, NationalityDisplay, NotificationDisplay, TrendDisplay, UserDisplay,
};
