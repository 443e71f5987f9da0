//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file defaults are resolved later in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format; `None` defers to the config preference
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.visadesk/config.yaml)
    pub config: Option<String>,

    /// Bypass the response cache
    pub no_cache: bool,

    /// Custom API host
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            no_cache: cli.no_cache,
            api_host: cli.api_host.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}
