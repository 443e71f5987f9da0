//! Backend API client
//!
//! [`ApiClient`] wraps HTTP, the bearer credential and the response cache.
//! Domain functions live in [`api`] as `impl ApiClient` blocks, one module
//! per resource group.

pub mod api;
pub mod http;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod normalize;
pub mod parallel;

pub use api::{AuthApi, Resource};
pub use http::ApiClient;
