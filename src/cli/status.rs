//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::session::decode_expiry;

/// Show configuration and local session state without calling the server
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Visadesk Status".bold());

    let path = Config::resolve_path(opts.config_ref())?;
    println!("Config file: {}", path.display().to_string().cyan());
    if !path.exists() {
        println!("  {}", "(not created yet, defaults in use)".dimmed());
    }

    let config = Config::load_from(&path)?;
    println!("API host: {}", config.api_host(opts.api_host_ref())?.cyan());
    println!();

    match &config.session {
        Some(session) => match decode_expiry(&session.access_token) {
            Ok(expires_at) => {
                let remaining = expires_at.signed_duration_since(Utc::now());
                if remaining.num_seconds() <= 0 {
                    println!(
                        "{} Session expired (cleared on next command)",
                        "⚠".yellow()
                    );
                } else {
                    println!(
                        "{} Logged in (expires in {}h {}m)",
                        "✓".green(),
                        remaining.num_hours(),
                        remaining.num_minutes() % 60
                    );
                }
            }
            Err(_) => println!("{} Logged in (token has no expiry)", "✓".green()),
        },
        None => {
            println!("{} Not logged in", "✗".red());
            println!("  → Run '{}' to start a session", "visadesk login".cyan());
        }
    }

    if config.cache.enabled && !opts.no_cache {
        println!(
            "{} Response cache on (TTL {}s)",
            "○".dimmed(),
            config.cache.ttl_secs
        );
    } else {
        println!("{} Response cache off", "○".dimmed());
    }

    println!();
    Ok(())
}
