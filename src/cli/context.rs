//! Command execution context
//!
//! Loads configuration once and wires the credential store, API client and
//! session manager that every command shares.

use std::sync::Arc;

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{ConfigCredentialStore, CredentialStore, SessionManager, SessionState};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    pub config: Config,
    /// Shared with the session manager
    pub client: Arc<ApiClient>,
    pub session: SessionManager<ApiClient>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Build the context and resume any stored session.
    ///
    /// A stored token whose expiry has already passed is cleared here, so
    /// the command then fails with the "login first" error.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_from(&path)?;

        let store: Arc<dyn CredentialStore> = Arc::new(ConfigCredentialStore::new(path));
        let client = Arc::new(ApiClient::from_config(
            &config,
            opts.api_host_ref(),
            Arc::clone(&store),
            opts.no_cache,
        )?);
        debug!("Using API host {}", client.base_url());

        let session = SessionManager::new(Arc::clone(&client), store);
        if session.restore() == SessionState::Authenticated {
            debug!("Resumed stored session");
        }

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_preference)
            })
            .unwrap_or_default();

        Ok(Self {
            config,
            client,
            session,
            format,
        })
    }

    /// Pass a domain result through the session guard (401 ends the session)
    pub fn guard<T>(&self, result: Result<T>) -> Result<T> {
        self.session.guard(result)
    }
}
