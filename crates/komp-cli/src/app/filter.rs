//! Competition list filtering and sorting.
//!
//! The home screen filters by a participant-username substring and sorts by
//! title or creation date. Sorting is stable, so equal keys keep their
//! backend order and desc is the exact reverse of asc for distinct keys.

use komp_api::types::CompetitionDto;
use komp_core::timefmt;

/// Sort key for the competition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Title,
    #[default]
    CreatedAt,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CreatedAt => "created",
        }
    }

    /// Cycle to the next key.
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::CreatedAt,
            Self::CreatedAt => Self::Title,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Filter and sort settings for the competition list.
#[derive(Debug, Clone, Default)]
pub struct CompetitionFilter {
    /// Case-insensitive substring matched against participant usernames.
    pub participant: String,
    pub key: SortKey,
    pub direction: SortDirection,
}

impl CompetitionFilter {
    /// Whether a competition passes the participant filter.
    fn matches(&self, competition: &CompetitionDto) -> bool {
        let needle = self.participant.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        competition
            .participants
            .iter()
            .any(|p| p.username.to_lowercase().contains(&needle))
    }

    /// Indices into `competitions` of the matching entries, sorted.
    pub fn apply(&self, competitions: &[CompetitionDto]) -> Vec<usize> {
        let mut indices: Vec<usize> = competitions
            .iter()
            .enumerate()
            .filter(|(_, c)| self.matches(c))
            .map(|(i, _)| i)
            .collect();

        // sort_by is stable; desc flips the comparator rather than reversing
        // the result so equal keys keep their backend order either way.
        let direction = self.direction;
        let ordered = |o: std::cmp::Ordering| match direction {
            SortDirection::Asc => o,
            SortDirection::Desc => o.reverse(),
        };
        match self.key {
            SortKey::Title => indices.sort_by(|&a, &b| {
                ordered(
                    competitions[a]
                        .title
                        .to_lowercase()
                        .cmp(&competitions[b].title.to_lowercase()),
                )
            }),
            SortKey::CreatedAt => indices.sort_by(|&a, &b| {
                let ta = timefmt::parse_timestamp(&competitions[a].created_at);
                let tb = timefmt::parse_timestamp(&competitions[b].created_at);
                ordered(ta.cmp(&tb))
            }),
        }
        indices
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use komp_api::types::UserRef;

    fn user(id: i64, name: &str) -> UserRef {
        UserRef {
            id,
            username: name.into(),
            email: None,
            role: None,
        }
    }

    fn competition(id: i64, title: &str, created: &str, names: &[&str]) -> CompetitionDto {
        let json = serde_json::json!({
            "id": id,
            "title": title,
            "icon": "🏆",
            "creator": {"id": 1, "username": "alice"},
            "createdAt": created,
        });
        let mut c: CompetitionDto = serde_json::from_value(json).unwrap();
        c.participants = names
            .iter()
            .enumerate()
            .map(|(i, n)| user(i as i64 + 1, n))
            .collect();
        c
    }

    fn sample() -> Vec<CompetitionDto> {
        vec![
            competition(1, "darts", "2026-01-03T10:00:00Z", &["alice", "bob"]),
            competition(2, "Football", "2026-01-01T10:00:00Z", &["alice", "carol"]),
            competition(3, "chess", "2026-01-02T10:00:00Z", &["dave"]),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = CompetitionFilter::default();
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn filter_matches_any_participant_case_insensitive() {
        let filter = CompetitionFilter {
            participant: "CAR".into(),
            ..Default::default()
        };
        let indices = filter.apply(&sample());
        assert_eq!(indices, vec![1]);
    }

    #[test]
    fn filter_only_returns_matching_competitions() {
        let filter = CompetitionFilter {
            participant: "alice".into(),
            key: SortKey::Title,
            direction: SortDirection::Asc,
        };
        let list = sample();
        let indices = filter.apply(&list);
        assert!(indices
            .iter()
            .all(|&i| list[i].participants.iter().any(|p| p.username == "alice")));
        assert_eq!(indices.len(), 2);
    }

    #[test]
    fn whitespace_only_filter_keeps_everything() {
        let filter = CompetitionFilter {
            participant: "   ".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let filter = CompetitionFilter {
            key: SortKey::Title,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        let list = sample();
        let indices = filter.apply(&list);
        let titles: Vec<&str> = indices.iter().map(|&i| list[i].title.as_str()).collect();
        assert_eq!(titles, vec!["chess", "darts", "Football"]);
    }

    #[test]
    fn created_at_sort_orders_by_timestamp() {
        let filter = CompetitionFilter {
            key: SortKey::CreatedAt,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        let list = sample();
        let indices = filter.apply(&list);
        assert_eq!(indices, vec![1, 2, 0]);
    }

    #[test]
    fn desc_is_reverse_of_asc_for_distinct_keys() {
        let asc = CompetitionFilter {
            key: SortKey::CreatedAt,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        let desc = CompetitionFilter {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        let list = sample();
        let mut reversed = asc.apply(&list);
        reversed.reverse();
        assert_eq!(reversed, desc.apply(&list));
    }

    #[test]
    fn desc_keeps_equal_keys_in_backend_order() {
        let list = vec![
            competition(1, "darts", "2026-01-01T10:00:00Z", &["a"]),
            competition(2, "darts", "2026-01-02T10:00:00Z", &["b"]),
        ];
        let filter = CompetitionFilter {
            key: SortKey::Title,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        assert_eq!(filter.apply(&list), vec![0, 1]);
    }

    #[test]
    fn equal_titles_keep_backend_order() {
        let list = vec![
            competition(1, "darts", "2026-01-01T10:00:00Z", &["a"]),
            competition(2, "darts", "2026-01-02T10:00:00Z", &["b"]),
            competition(3, "darts", "2026-01-03T10:00:00Z", &["c"]),
        ];
        let filter = CompetitionFilter {
            key: SortKey::Title,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(filter.apply(&list), vec![0, 1, 2]);
    }
}
