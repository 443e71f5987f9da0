//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod dashboard;
mod notification;
mod user;

pub use dashboard::{ExpiringVisaDisplay, NationalityDisplay, TrendDisplay};
pub use notification::NotificationDisplay;
pub use user::UserDisplay;
