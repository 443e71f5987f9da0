//! Configuration management for Visadesk

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Backend origin used when neither the config file nor the CLI names one
pub const DEFAULT_API_HOST: &str = "https://api.visadesk.app";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend origin override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Persisted session credential
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionCredential>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Bearer credential returned by `POST /token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    pub access_token: String,

    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl SessionCredential {
    /// Value for the `Authorization` header, e.g. `bearer eyJ...`
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Freshness window for cached reads
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,

    /// Clear every cached read after a successful create/update/delete
    #[serde(default)]
    pub invalidate_on_write: bool,
}

fn default_true() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    5 * 60
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_cache_ttl_secs(),
            invalidate_on_write: false,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".visadesk").join("config.yaml"))
    }

    /// Resolve an optional `--config` override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file holds a bearer token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Resolve the backend origin: explicit override, then config, then default.
    ///
    /// Trailing slashes are stripped so paths can be appended directly.
    pub fn api_host(&self, override_host: Option<&str>) -> Result<String> {
        let host = override_host
            .or(self.api_host.as_deref())
            .unwrap_or(DEFAULT_API_HOST);

        if !(host.starts_with("https://") || host.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "API host must start with http:// or https://, got '{}'",
                host
            ))
            .into());
        }

        Ok(host.trim_end_matches('/').to_string())
    }

    fn validate(&self) -> Result<()> {
        if self.preferences.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "preferences.timeout_secs must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.preferences.timeout_secs)
    }
}
