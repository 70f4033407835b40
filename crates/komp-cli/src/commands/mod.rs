//! Headless subcommands.
//!
//! Every TUI operation is also reachable as a scriptable subcommand. Output
//! goes to stdout as plain tables; errors bubble up as `anyhow` and exit
//! non-zero.

pub mod auth_cmd;
pub mod bot_cmd;
pub mod competition_cmd;
pub mod fmt;
pub mod friend_cmd;
pub mod match_cmd;
pub mod notification_cmd;

use komp_api::ApiClient;
use komp_core::AuthUser;

/// Top-level subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Login, signup, logout, whoami.
    Auth {
        #[command(subcommand)]
        action: auth_cmd::AuthAction,
    },
    /// Competition operations.
    Competition {
        #[command(subcommand)]
        action: competition_cmd::CompetitionAction,
    },
    /// Match operations.
    Match {
        #[command(subcommand)]
        action: match_cmd::MatchAction,
    },
    /// Friend and friend-request operations.
    Friend {
        #[command(subcommand)]
        action: friend_cmd::FriendAction,
    },
    /// Bot operations.
    Bot {
        #[command(subcommand)]
        action: bot_cmd::BotAction,
    },
    /// Notification operations.
    Notification {
        #[command(subcommand)]
        action: notification_cmd::NotificationAction,
    },
}

/// Execute a subcommand.
pub async fn run(client: &ApiClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Auth { action } => auth_cmd::run(client, action).await,
        Command::Competition { action } => competition_cmd::run(client, action).await,
        Command::Match { action } => match_cmd::run(client, action).await,
        Command::Friend { action } => friend_cmd::run(client, action).await,
        Command::Bot { action } => bot_cmd::run(client, action).await,
        Command::Notification { action } => notification_cmd::run(client, action).await,
    }
}

/// The logged-in identity, or a uniform error telling the user to log in.
pub fn require_user(client: &ApiClient) -> anyhow::Result<AuthUser> {
    client
        .session()
        .user()
        .ok_or_else(|| anyhow::anyhow!("Not logged in. Run `komp auth login` first."))
}
