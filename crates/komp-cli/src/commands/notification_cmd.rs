//! Notification subcommands.

use std::io::{self, Write};

use komp_api::ApiClient;

use super::fmt::{notification_type_str, truncate};
use komp_core::timefmt;

/// Notification subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum NotificationAction {
    /// List all notifications.
    List,
    /// List unread notifications.
    Unread,
    /// Show the unread count.
    Count,
    /// Mark one notification as read.
    Read {
        /// Notification ID.
        id: i64,
    },
    /// Mark all notifications as read.
    ReadAll,
}

/// Execute a notification subcommand.
pub async fn run(client: &ApiClient, action: NotificationAction) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        NotificationAction::List | NotificationAction::Unread => {
            let notifications = if matches!(action, NotificationAction::List) {
                client.get_notifications().await?
            } else {
                client.get_unread_notifications().await?
            };
            if notifications.is_empty() {
                writeln!(out, "No notifications.")?;
            } else {
                writeln!(
                    out,
                    "{:<6} {:<18} {:<44} {:<6} {:<12}",
                    "ID", "TYPE", "MESSAGE", "READ", "WHEN"
                )?;
                for n in &notifications {
                    writeln!(
                        out,
                        "{:<6} {:<18} {:<44} {:<6} {:<12}",
                        n.id,
                        notification_type_str(n.kind),
                        truncate(&n.message, 44),
                        if n.is_read { "yes" } else { "no" },
                        timefmt::format_date(&n.created_at),
                    )?;
                }
                writeln!(out, "\n{} notification(s)", notifications.len())?;
            }
        }
        NotificationAction::Count => {
            let count = client.get_unread_count().await?;
            writeln!(out, "{count}")?;
        }
        NotificationAction::Read { id } => {
            client.mark_notification_read(id).await?;
            writeln!(out, "Notification {id} marked read.")?;
        }
        NotificationAction::ReadAll => {
            client.mark_all_notifications_read().await?;
            writeln!(out, "All notifications marked read.")?;
        }
    }
    Ok(())
}
