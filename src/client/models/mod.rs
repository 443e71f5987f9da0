//! Typed views over backend responses
//!
//! Most resource records stay opaque `serde_json::Value`s; only the shapes
//! this client inspects get a struct.

mod auth;
mod dashboard;
mod export;
mod notification;
mod user;

pub use auth::TokenResponse;
pub use dashboard::{DashboardData, DashboardStats, ExpiringVisa, NationalityCount, TrendPoint};
pub use export::ExportFile;
pub use notification::{Notification, NotificationKind};
pub use user::UserProfile;
