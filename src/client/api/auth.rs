//! Authentication API trait

use async_trait::async_trait;
use log::debug;
use reqwest::Method;

use crate::client::ApiClient;
use crate::client::models::{TokenResponse, UserProfile};
use crate::config::SessionCredential;
use crate::error::{ApiError, Result};

/// Authentication operations against the backend
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange username/password for a bearer credential (`POST /token`)
    async fn login(&self, username: &str, password: &str) -> Result<SessionCredential>;

    /// Fetch the profile of the logged-in user (`GET /users/me`)
    async fn current_user(&self) -> Result<UserProfile>;

    /// Invalidate the session on the server (`POST /logout`)
    async fn logout(&self) -> Result<()>;

    /// Drop any state held for the session that just ended
    fn on_session_end(&self) {}
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<SessionCredential> {
        let body = self
            .post_form("/token", &[("username", username), ("password", password)])
            .await?
            .ok_or_else(|| ApiError::InvalidResponse("Empty token response".to_string()))?;

        let token: TokenResponse = serde_json::from_value(body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        if token.access_token.is_empty() {
            return Err(ApiError::InvalidResponse(
                "Token response has no access_token".to_string(),
            )
            .into());
        }
        Ok(token.into())
    }

    async fn current_user(&self) -> Result<UserProfile> {
        // Never cached: this is the liveness check for the session
        let body = self
            .request(Method::GET, "/users/me", &[], None)
            .await?
            .ok_or_else(|| ApiError::InvalidResponse("Empty profile response".to_string()))?;

        serde_json::from_value(body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse profile: {}", e)).into()
        })
    }

    async fn logout(&self) -> Result<()> {
        self.request(Method::POST, "/logout", &[], None).await?;
        Ok(())
    }

    fn on_session_end(&self) {
        let dropped = self.clear_cache();
        if dropped > 0 {
            debug!("Dropped {} cached responses", dropped);
        }
    }
}
