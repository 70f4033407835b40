//! Friend subcommands.

use std::io::{self, Write};

use komp_api::ApiClient;

use super::fmt::truncate;
use super::require_user;

/// Friend subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum FriendAction {
    /// List your friends.
    List,
    /// Search users by username.
    Search {
        /// Username substring.
        username: String,
    },
    /// Send a friend request.
    Send {
        /// Receiver's username.
        username: String,
    },
    /// Accept or reject a received request.
    Respond {
        /// Request ID.
        request: i64,
        /// Accept instead of reject.
        #[arg(long)]
        accept: bool,
    },
    /// List received pending requests.
    Received,
    /// List sent pending requests.
    Sent,
    /// Cancel a sent request.
    Cancel {
        /// Request ID.
        request: i64,
    },
}

/// Execute a friend subcommand.
pub async fn run(client: &ApiClient, action: FriendAction) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        FriendAction::List => {
            let user = require_user(client)?;
            let friends = client.get_friends(user.id).await?;
            if friends.is_empty() {
                writeln!(out, "No friends yet.")?;
            } else {
                writeln!(out, "{:<6} {:<20}", "ID", "USERNAME")?;
                for f in &friends {
                    writeln!(out, "{:<6} {:<20}", f.id, truncate(&f.username, 20))?;
                }
                writeln!(out, "\n{} friend(s)", friends.len())?;
            }
        }
        FriendAction::Search { username } => {
            let results = client.search_users(&username).await?;
            if results.is_empty() {
                writeln!(out, "No users found.")?;
            } else {
                writeln!(out, "{:<6} {:<20}", "ID", "USERNAME")?;
                for u in &results {
                    writeln!(out, "{:<6} {:<20}", u.id, truncate(&u.username, 20))?;
                }
            }
        }
        FriendAction::Send { username } => {
            let user = require_user(client)?;
            if username == user.username {
                anyhow::bail!("You cannot send a friend request to yourself.");
            }
            client.send_friend_request(user.id, &username).await?;
            writeln!(out, "Friend request sent to {username}.")?;
        }
        FriendAction::Respond { request, accept } => {
            client.respond_to_friend_request(request, accept).await?;
            if accept {
                writeln!(out, "Request {request} accepted.")?;
            } else {
                writeln!(out, "Request {request} rejected.")?;
            }
        }
        FriendAction::Received => {
            let user = require_user(client)?;
            let requests = client.get_received_requests(user.id).await?;
            if requests.is_empty() {
                writeln!(out, "No pending requests.")?;
            } else {
                writeln!(out, "{:<10} {:<20}", "REQUEST", "FROM")?;
                for r in &requests {
                    writeln!(
                        out,
                        "{:<10} {:<20}",
                        r.request_id,
                        truncate(&r.sender_username, 20)
                    )?;
                }
                writeln!(out, "\n{} request(s)", requests.len())?;
            }
        }
        FriendAction::Sent => {
            let user = require_user(client)?;
            let requests = client.get_sent_requests(user.id).await?;
            if requests.is_empty() {
                writeln!(out, "No sent requests.")?;
            } else {
                writeln!(out, "{:<10} {:<20}", "REQUEST", "SENDER")?;
                for r in &requests {
                    writeln!(
                        out,
                        "{:<10} {:<20}",
                        r.request_id,
                        truncate(&r.sender_username, 20)
                    )?;
                }
                writeln!(out, "\n{} request(s)", requests.len())?;
            }
        }
        FriendAction::Cancel { request } => {
            let user = require_user(client)?;
            client.cancel_friend_request(request, user.id).await?;
            writeln!(out, "Request {request} cancelled.")?;
        }
    }
    Ok(())
}
