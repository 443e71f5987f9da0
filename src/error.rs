//! Error types for the Visadesk client

use thiserror::Error;

/// Result type alias for Visadesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}

impl Error {
    /// HTTP status carried by the error, if it came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => api.status(),
            _ => None,
        }
    }

    /// Whether the server rejected the credential (HTTP 401)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(api) if api.is_unauthorized())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication token missing. Run `visadesk login` first.")]
    MissingToken,

    #[error("Missing required identifier: {0}")]
    MissingIdentifier(&'static str),

    /// Any non-2xx response, normalized to the server message and status code
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Session token is malformed or has no expiry")]
    InvalidToken,
}

impl ApiError {
    /// Numeric HTTP status for server-reported errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
