//! Output formatting helpers for headless subcommands.

use komp_api::types::{MatchStatus, NotificationType};

/// Truncate to `max` chars, appending an ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max - 1).collect::<String>())
    }
}

pub const fn match_status_str(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Pending => "pending",
        MatchStatus::InProgress => "in progress",
        MatchStatus::Completed => "completed",
    }
}

pub const fn notification_type_str(kind: NotificationType) -> &'static str {
    match kind {
        NotificationType::FriendRequest => "friend request",
        NotificationType::MatchCreated => "match created",
        NotificationType::FriendRequestAccepted => "request accepted",
        NotificationType::UserLeftCompetition => "user left",
    }
}

/// Join participant usernames for a one-line listing.
pub fn participant_names(participants: &[komp_api::types::UserRef]) -> String {
    participants
        .iter()
        .map(|p| p.username.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate("darts", 10), "darts");
    }

    #[test]
    fn truncate_long_string_gets_ellipsis() {
        assert_eq!(truncate("weekend football challenge", 10), "weekend f…");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("⚽⚽⚽", 3), "⚽⚽⚽");
        assert_eq!(truncate("⚽⚽⚽⚽", 3), "⚽⚽…");
    }

    #[test]
    fn status_strings() {
        assert_eq!(match_status_str(MatchStatus::Pending), "pending");
        assert_eq!(match_status_str(MatchStatus::Completed), "completed");
    }
}
