//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod auth;
pub mod context;
pub mod dashboard;
pub mod export;
pub mod notification;
pub mod records;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

use crate::client::Resource;

/// Visadesk - console client for the immigration case-management platform
#[derive(Parser, Debug)]
#[command(name = "visadesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, global = true, env = "VISADESK_FORMAT", hide_env = true)]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "VISADESK_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "VISADESK_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass the response cache
    #[arg(long, global = true, env = "VISADESK_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Override the backend origin
    #[arg(long, global = true, env = "VISADESK_API_HOST", hide_env = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session credential
    Login {
        /// Account name (prompted when omitted)
        #[arg(long, short)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "VISADESK_PASSWORD", hide_env = true)]
        password: Option<String>,
    },

    /// Log out on the server and clear the stored credential
    Logout,

    /// Show the logged-in user, validating the session
    Whoami,

    /// Show session and configuration status
    Status,

    /// Read and edit backend records
    Records {
        /// Resource to operate on
        #[arg(value_enum)]
        resource: Resource,

        #[command(subcommand)]
        action: RecordAction,
    },

    /// Grievance workflow
    #[command(subcommand)]
    Grievance(GrievanceCommands),

    /// View and acknowledge notifications
    #[command(subcommand)]
    Notification(NotificationCommands),

    /// Download a module export as CSV
    Export {
        /// Module to export (e.g. foreigners, visas)
        module: String,

        /// Output path (defaults to the server-suggested filename)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show the dashboard summary
    Dashboard,

    /// Block until the current session ends
    Watch {
        /// Seconds between server-side session checks
        #[arg(long, default_value_t = 60)]
        interval: u64,
    },
}

/// Operations on a resource
#[derive(Subcommand, Debug)]
pub enum RecordAction {
    /// List records
    List {
        /// Query parameter as key=value (repeatable)
        #[arg(long = "param", short = 'p', value_parser = args::parse_key_val)]
        params: Vec<(String, String)>,

        /// Show at most this many records
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one record
    Get { id: String },

    /// Create a record from JSON (inline or @file)
    Create {
        #[arg(long)]
        data: String,
    },

    /// Replace a record with JSON (inline or @file)
    Update {
        id: String,

        #[arg(long)]
        data: String,
    },

    /// Delete a record
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum GrievanceCommands {
    /// Set the workflow status of a grievance
    Status { id: String, status: String },
}

#[derive(Subcommand, Debug)]
pub enum NotificationCommands {
    /// List notifications with their derived kind
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },

    /// Mark a notification as read
    Read { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_records_list_params() {
        let cli = Cli::parse_from([
            "visadesk",
            "records",
            "out-of-view-cases",
            "list",
            "-p",
            "status=open",
            "--limit",
            "5",
        ]);
        match cli.command {
            Commands::Records {
                resource,
                action: RecordAction::List { params, limit },
            } => {
                assert_eq!(resource, Resource::OutOfViewCases);
                assert_eq!(params, vec![("status".to_string(), "open".to_string())]);
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_grievance_status() {
        let cli = Cli::parse_from(["visadesk", "grievance", "status", "12", "resolved"]);
        assert!(matches!(
            cli.command,
            Commands::Grievance(GrievanceCommands::Status { ref id, ref status })
                if id == "12" && status == "resolved"
        ));
    }

    #[test]
    fn test_unknown_resource_rejected() {
        assert!(Cli::try_parse_from(["visadesk", "records", "passports", "list"]).is_err());
    }
}
