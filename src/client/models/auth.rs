//! Authentication models

use serde::Deserialize;

use crate::config::SessionCredential;

/// Body of a successful `POST /token`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,
}

impl From<TokenResponse> for SessionCredential {
    fn from(resp: TokenResponse) -> Self {
        Self {
            access_token: resp.access_token,
            token_type: resp
                .token_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "bearer".to_string()),
        }
    }
}
