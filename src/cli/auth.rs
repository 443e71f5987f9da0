//! Session commands: login, logout, whoami, watch

use std::time::Duration;

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use log::debug;
use tokio::sync::broadcast::error::RecvError;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::{ApiError, Error, Result};
use crate::models::UserDisplay;
use crate::output::{Formattable, json::format_json};
use crate::session::{EndReason, ExpiryPlan, SessionEvent, SessionState, decode_expiry};

/// Log in, prompting for whatever was not supplied
pub async fn login(
    opts: &GlobalOptions,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let username = match username {
        Some(u) => u,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    let credential = ctx.session.login(&username, &password).await?;
    println!("{} Logged in as {}", "✓".green(), username.bold());

    match decode_expiry(&credential.access_token) {
        Ok(expires_at) => println!(
            "  Session expires {}",
            expires_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        ),
        Err(_) => debug!("Token carries no expiry"),
    }
    Ok(())
}

/// Log out; the local credential is cleared even if the server call fails
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let was_logged_in = ctx.session.state() == SessionState::Authenticated;

    ctx.session.logout().await;

    if was_logged_in {
        println!("{} Logged out", "✓".green());
    } else {
        println!("Not logged in");
    }
    Ok(())
}

/// Show the current user; any failure ends the local session
pub async fn whoami(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let user = ctx.session.check_session().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&user)?),
        OutputFormat::Table => vec![UserDisplay::from(&user)].print(ctx.format)?,
    }
    Ok(())
}

/// Block until the session ends, re-checking it with the server every
/// `interval` seconds
pub async fn watch(opts: &GlobalOptions, interval: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    if ctx.session.state() != SessionState::Authenticated {
        return Err(ApiError::MissingToken.into());
    }

    let mut events = ctx.session.subscribe();
    let credential = ctx.session.credential()?.ok_or(ApiError::MissingToken)?;
    match ctx.session.arm_expiry_timer(&credential.access_token) {
        ExpiryPlan::Scheduled(delay) => println!(
            "Watching session (auto-logout in {})",
            format_delay(delay).cyan()
        ),
        ExpiryPlan::Unmanaged => println!("Watching session (no expiry in token)"),
        ExpiryPlan::EndedNow => {}
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));
    // First tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(SessionEvent::Ended(reason)) => {
                    println!("{} Session ended: {}", "✗".red(), describe(reason));
                    return Ok(());
                }
                Ok(SessionEvent::Started) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return Ok(()),
            },
            _ = ticker.tick() => {
                // Failure ends the session and the Ended event follows
                match ctx.session.check_session().await {
                    Ok(_) => debug!("Session still valid"),
                    Err(Error::Api(ApiError::MissingToken)) => {
                        println!("{} Session ended: credential removed", "✗".red());
                        return Ok(());
                    }
                    Err(e) => debug!("Session check failed: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn describe(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Logout => "logged out",
        EndReason::Expired => "token expired",
        EndReason::Rejected => "rejected by server",
        EndReason::CheckFailed => "session check failed",
    }
}

fn format_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {}m", h, m)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(Duration::from_secs(3 * 3600 + 120)), "3h 2m");
        assert_eq!(format_delay(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_delay(Duration::from_secs(9)), "9s");
    }

    #[test]
    fn test_describe_reasons() {
        assert_eq!(describe(EndReason::Expired), "token expired");
        assert_eq!(describe(EndReason::Rejected), "rejected by server");
    }
}
