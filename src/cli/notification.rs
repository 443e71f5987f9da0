//! Notification commands

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::Result;
use crate::models::NotificationDisplay;
use crate::output::Formattable;

/// List notifications, newest as delivered by the server
pub async fn list(opts: &GlobalOptions, unread_only: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let notifications = ctx.guard(ctx.client.list_notifications(unread_only).await)?;

    let display: Vec<NotificationDisplay> =
        notifications.iter().map(NotificationDisplay::from).collect();
    display.print(ctx.format)
}

pub async fn read(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.guard(ctx.client.mark_notification_read(id).await)?;
    println!("{} Notification {} marked as read", "✓".green(), id.trim());
    Ok(())
}
