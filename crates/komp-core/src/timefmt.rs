//! Wire timestamp helpers.
//!
//! The backend sends RFC 3339 timestamps (`createdAt`, `startedAt`). These
//! helpers parse them once and render them in the local timezone for display.

use chrono::{DateTime, Local, Utc};

/// Parse a backend timestamp. Returns `None` for empty or malformed input
/// rather than failing the whole view.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render a backend timestamp as a local date, e.g. "2026-08-06".
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string(),
    )
}

/// Render a backend timestamp as a local date and time, e.g.
/// "2026-08-06 14:03".
pub fn format_datetime(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_timestamp("2026-03-01T12:30:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-01T10:30:00+00:00");
    }

    #[test]
    fn parses_rfc3339_zulu() {
        assert!(parse_timestamp("2026-03-01T12:30:00Z").is_some());
    }

    #[test]
    fn malformed_input_returns_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn format_falls_back_to_raw_on_parse_failure() {
        assert_eq!(format_date("not-a-date"), "not-a-date");
        assert_eq!(format_datetime("not-a-date"), "not-a-date");
    }
}
