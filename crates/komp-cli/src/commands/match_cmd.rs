//! Match subcommands.

use std::collections::HashMap;
use std::io::{self, Write};

use komp_api::ApiClient;

use super::fmt::{match_status_str, participant_names, truncate};
use komp_core::timefmt;

/// Match subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum MatchAction {
    /// List matches in a competition.
    List {
        /// Competition ID.
        competition: i64,
    },
    /// Create a match between competition participants.
    Create {
        /// Competition ID.
        competition: i64,
        /// Optional match title.
        #[arg(short, long)]
        title: Option<String>,
        /// Participant user IDs (repeatable, at least two).
        #[arg(short, long = "participant", required = true)]
        participants: Vec<i64>,
    },
    /// Show a single match with its scores.
    Show {
        /// Match ID.
        id: i64,
    },
    /// Start a pending match.
    Start {
        /// Match ID.
        id: i64,
    },
    /// Delete a match.
    Delete {
        /// Match ID.
        id: i64,
    },
    /// Submit scores as `userId=score` pairs, e.g. `komp match scores 9 1=3 2=1`.
    Scores {
        /// Match ID.
        id: i64,
        /// Score entries, `userId=score`.
        #[arg(required = true)]
        entries: Vec<String>,
    },
}

/// Parse `userId=score` pairs.
fn parse_score_entries(entries: &[String]) -> anyhow::Result<HashMap<i64, i64>> {
    let mut scores = HashMap::new();
    for entry in entries {
        let (user, score) = entry
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected userId=score, got `{entry}`"))?;
        let user: i64 = user
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid user id in `{entry}`"))?;
        let score: i64 = score
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid score in `{entry}`"))?;
        scores.insert(user, score);
    }
    Ok(scores)
}

/// Execute a match subcommand.
pub async fn run(client: &ApiClient, action: MatchAction) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        MatchAction::List { competition } => {
            let matches = client.get_matches_by_competition(competition).await?;
            if matches.is_empty() {
                writeln!(out, "No matches found.")?;
            } else {
                writeln!(
                    out,
                    "{:<6} {:<4} {:<24} {:<12} {:<30}",
                    "ID", "NO.", "TITLE", "STATUS", "PARTICIPANTS"
                )?;
                for m in &matches {
                    writeln!(
                        out,
                        "{:<6} {:<4} {:<24} {:<12} {:<30}",
                        m.id,
                        m.match_number,
                        truncate(&m.title, 24),
                        match_status_str(m.status),
                        truncate(&participant_names(&m.participants), 30),
                    )?;
                }
                writeln!(out, "\n{} match(es)", matches.len())?;
            }
        }
        MatchAction::Create {
            competition,
            title,
            participants,
        } => {
            let m = client
                .create_match(competition, title.as_deref(), participants)
                .await?;
            writeln!(out, "Created match {} (id {})", m.title, m.id)?;
        }
        MatchAction::Show { id } => {
            let m = client.get_match(id).await?;
            writeln!(out, "  Match:    {} (#{})", m.title, m.match_number)?;
            writeln!(out, "  Status:   {}", match_status_str(m.status))?;
            if let Some(started) = &m.started_at {
                writeln!(out, "  Started:  {}", timefmt::format_datetime(started))?;
            }
            writeln!(out, "  Created:  {}", timefmt::format_datetime(&m.created_at))?;
            for p in &m.participants {
                let score = m.scores.iter().find(|s| s.user_id == p.id);
                match score {
                    Some(s) if s.confirmed => {
                        writeln!(out, "    {:<16} {:>4}  (confirmed)", p.username, s.score)?;
                    }
                    Some(s) => writeln!(out, "    {:<16} {:>4}", p.username, s.score)?,
                    None => writeln!(out, "    {:<16}    -", p.username)?,
                }
            }
        }
        MatchAction::Start { id } => {
            let m = client.start_match(id).await?;
            writeln!(out, "Match {} is now {}.", m.id, match_status_str(m.status))?;
        }
        MatchAction::Delete { id } => {
            client.delete_match(id).await?;
            writeln!(out, "Match {id} deleted.")?;
        }
        MatchAction::Scores { id, entries } => {
            let scores = parse_score_entries(&entries)?;
            client.submit_scores(id, scores).await?;
            // Stats are recomputed server-side; show the fresh state.
            let m = client.get_match(id).await?;
            writeln!(
                out,
                "Scores submitted. Match {} is now {}.",
                m.id,
                match_status_str(m.status)
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_entries() {
        let entries = vec!["1=3".to_string(), "2=1".to_string()];
        let scores = parse_score_entries(&entries).unwrap();
        assert_eq!(scores.get(&1), Some(&3));
        assert_eq!(scores.get(&2), Some(&1));
    }

    #[test]
    fn rejects_malformed_entry() {
        assert!(parse_score_entries(&["oops".to_string()]).is_err());
        assert!(parse_score_entries(&["a=1".to_string()]).is_err());
        assert!(parse_score_entries(&["1=b".to_string()]).is_err());
    }

    #[test]
    fn later_duplicate_wins() {
        let entries = vec!["1=3".to_string(), "1=5".to_string()];
        let scores = parse_score_entries(&entries).unwrap();
        assert_eq!(scores.get(&1), Some(&5));
    }
}
