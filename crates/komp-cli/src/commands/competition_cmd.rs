//! Competition subcommands.

use std::io::{self, Write};

use komp_api::ApiClient;

use super::fmt::{participant_names, truncate};
use super::require_user;
use komp_core::timefmt;

/// Competition subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum CompetitionAction {
    /// List competitions you participate in.
    List {
        /// Only competitions you created.
        #[arg(long)]
        created: bool,
    },
    /// Create a competition with friends.
    Create {
        /// Competition title.
        title: String,
        /// Icon (an emoji).
        #[arg(short, long, default_value = "🏆")]
        icon: String,
        /// Participant user IDs (repeatable).
        #[arg(short, long = "participant", required = true)]
        participants: Vec<i64>,
    },
    /// Show a single competition.
    Show {
        /// Competition ID.
        id: i64,
    },
    /// Show the leaderboard (server-computed stats).
    Participants {
        /// Competition ID.
        id: i64,
    },
    /// Add participants to a competition.
    Add {
        /// Competition ID.
        id: i64,
        /// Participant user IDs (repeatable).
        #[arg(short, long = "participant", required = true)]
        participants: Vec<i64>,
    },
    /// Delete a competition (creator only).
    Delete {
        /// Competition ID.
        id: i64,
    },
    /// Leave a competition you participate in.
    Leave {
        /// Competition ID.
        id: i64,
    },
}

/// Execute a competition subcommand.
pub async fn run(client: &ApiClient, action: CompetitionAction) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        CompetitionAction::List { created } => {
            let user = require_user(client)?;
            let competitions = if created {
                client.get_competitions_created_by(user.id).await?
            } else {
                client.get_user_competitions(user.id).await?
            };
            if competitions.is_empty() {
                writeln!(out, "No competitions found.")?;
            } else {
                writeln!(
                    out,
                    "{:<6} {:<4} {:<30} {:<12} {:<12}",
                    "ID", "ICON", "TITLE", "CREATOR", "CREATED"
                )?;
                for c in &competitions {
                    writeln!(
                        out,
                        "{:<6} {:<4} {:<30} {:<12} {:<12}",
                        c.id,
                        c.icon,
                        truncate(&c.title, 30),
                        truncate(&c.creator.username, 12),
                        timefmt::format_date(&c.created_at),
                    )?;
                }
                writeln!(out, "\n{} competition(s)", competitions.len())?;
            }
        }
        CompetitionAction::Create {
            title,
            icon,
            participants,
        } => {
            let c = client.create_competition(&title, &icon, participants).await?;
            writeln!(out, "Created competition {} (id {})", c.title, c.id)?;
        }
        CompetitionAction::Show { id } => {
            let c = client.get_competition(id).await?;
            writeln!(out, "  ID:           {}", c.id)?;
            writeln!(out, "  Title:        {} {}", c.icon, c.title)?;
            writeln!(out, "  Creator:      {}", c.creator.username)?;
            writeln!(out, "  Participants: {}", participant_names(&c.participants))?;
            writeln!(out, "  Created:      {}", timefmt::format_datetime(&c.created_at))?;
        }
        CompetitionAction::Participants { id } => {
            let mut participants = client.get_participants(id).await?;
            if participants.is_empty() {
                writeln!(out, "No participants found.")?;
            } else {
                // Display order only; the stats themselves come from the server.
                participants.sort_by(|a, b| b.wins.cmp(&a.wins));
                writeln!(
                    out,
                    "{:<16} {:>6} {:>6} {:>6} {:>8} {:>8}",
                    "PLAYER", "WINS", "DRAWS", "LOSSES", "PLAYED", "POINTS"
                )?;
                for p in &participants {
                    writeln!(
                        out,
                        "{:<16} {:>6} {:>6} {:>6} {:>8} {:>8}",
                        truncate(&p.username, 16),
                        p.wins,
                        p.draws,
                        p.losses,
                        p.matches_played,
                        p.points_scored,
                    )?;
                }
            }
        }
        CompetitionAction::Add { id, participants } => {
            let c = client.add_participants(id, participants).await?;
            writeln!(
                out,
                "Competition {} now has {} participant(s).",
                c.id,
                c.participants.len()
            )?;
        }
        CompetitionAction::Delete { id } => {
            client.delete_competition(id).await?;
            writeln!(out, "Competition {id} deleted.")?;
        }
        CompetitionAction::Leave { id } => {
            client.leave_competition(id).await?;
            writeln!(out, "Left competition {id}.")?;
        }
    }
    Ok(())
}
