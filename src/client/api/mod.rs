//! Domain API functions, one per backend resource or action
//!
//! - [`AuthApi`] - login, current user, logout
//! - [`records`] - generic list/get/create/update/delete over [`Resource`]
//! - [`grievances`], [`notifications`] - resource-specific actions
//! - [`export`] - CSV downloads
//! - [`dashboard`] - best-effort batch read

mod auth;
pub mod dashboard;
pub mod export;
pub mod grievances;
pub mod notifications;
pub mod records;
mod resource;

pub use auth::AuthApi;
pub use resource::Resource;
