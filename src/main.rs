//! Visadesk CLI - console client for the immigration case-management platform

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod session;

use cli::{Cli, Commands, GlobalOptions, GrievanceCommands, NotificationCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` wins; otherwise `RUST_LOG`, defaulting to warnings only
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { username, password } => cli::auth::login(&opts, username, password).await,
        Commands::Logout => cli::auth::logout(&opts).await,
        Commands::Whoami => cli::auth::whoami(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Records { resource, action } => cli::records::run(&opts, resource, action).await,
        Commands::Grievance(GrievanceCommands::Status { id, status }) => {
            cli::records::grievance_status(&opts, &id, &status).await
        }
        Commands::Notification(cmd) => match cmd {
            NotificationCommands::List { unread } => cli::notification::list(&opts, unread).await,
            NotificationCommands::Read { id } => cli::notification::read(&opts, &id).await,
        },
        Commands::Export { module, output } => cli::export::run(&opts, &module, output).await,
        Commands::Dashboard => cli::dashboard::run(&opts).await,
        Commands::Watch { interval } => cli::auth::watch(&opts, interval).await,
    }
}
