//! Bot subcommands.

use std::io::{self, Write};

use komp_api::ApiClient;

use super::fmt::truncate;

/// Bot subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum BotAction {
    /// List bots in a competition.
    List {
        /// Competition ID.
        competition: i64,
    },
    /// Add bots to a competition (at most three total).
    Create {
        /// Competition ID.
        competition: i64,
        /// Bot usernames (repeatable).
        #[arg(short, long = "name", required = true)]
        names: Vec<String>,
    },
    /// Remove all bots from a competition.
    Delete {
        /// Competition ID.
        competition: i64,
    },
}

/// Execute a bot subcommand.
pub async fn run(client: &ApiClient, action: BotAction) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        BotAction::List { competition } => {
            let bots = client.get_bots(competition).await?;
            if bots.is_empty() {
                writeln!(out, "No bots in this competition.")?;
            } else {
                writeln!(out, "{:<6} {:<20}", "ID", "USERNAME")?;
                for b in &bots {
                    writeln!(out, "{:<6} {:<20}", b.id, truncate(&b.username, 20))?;
                }
            }
        }
        BotAction::Create { competition, names } => {
            let bots = client.create_bots(competition, names).await?;
            writeln!(out, "Competition {competition} now has {} bot(s).", bots.len())?;
        }
        BotAction::Delete { competition } => {
            client.delete_bots(competition).await?;
            writeln!(out, "Bots removed from competition {competition}.")?;
        }
    }
    Ok(())
}
