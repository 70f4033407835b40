//! Cooperative search debounce.
//!
//! Re-arms on every keystroke and fires from the tick loop once the quiet
//! period has elapsed, the trimmed value is long enough, and it differs from
//! the last value fired. Single-threaded: no timers beyond the caller's
//! tick, no cancellation beyond dropping the pending value.

use std::time::{Duration, Instant};

/// Debouncer for a text input driving a search callback.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    min_len: usize,
    pending: Option<(String, Instant)>,
    last_fired: Option<String>,
}

impl Debouncer {
    pub const fn new(quiet: Duration, min_len: usize) -> Self {
        Self {
            quiet,
            min_len,
            pending: None,
            last_fired: None,
        }
    }

    /// Record a keystroke. Restarts the quiet period.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.pending = Some((text.to_string(), now));
    }

    /// Called from the tick loop. Returns the query to fire, at most once
    /// per settled value.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let (text, at) = self.pending.as_ref()?;
        if now.duration_since(*at) < self.quiet {
            return None;
        }
        let trimmed = text.trim().to_string();
        self.pending = None;
        if trimmed.chars().count() < self.min_len {
            return None;
        }
        if self.last_fired.as_deref() == Some(trimmed.as_str()) {
            return None;
        }
        self.last_fired = Some(trimmed.clone());
        Some(trimmed)
    }

    /// Drop pending state and the fired-value memory (screen change,
    /// explicit submit).
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_fired = None;
    }

    /// Remember an externally fired query so the debounce won't repeat it.
    pub fn mark_fired(&mut self, query: &str) {
        self.last_fired = Some(query.trim().to_string());
        self.pending = None;
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    fn debouncer() -> Debouncer {
        Debouncer::new(QUIET, 2)
    }

    #[test]
    fn fires_after_quiet_period() {
        let mut d = debouncer();
        let t0 = Instant::now();
        d.input("ab", t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(100)), None);
        assert_eq!(d.poll(t0 + QUIET), Some("ab".to_string()));
    }

    #[test]
    fn rapid_typing_fires_once_with_final_value() {
        let mut d = debouncer();
        let t0 = Instant::now();
        d.input("a", t0);
        d.input("ab", t0 + Duration::from_millis(200));
        // First keystroke's deadline passes, but it was superseded.
        assert_eq!(d.poll(t0 + Duration::from_millis(600)), None);
        assert_eq!(
            d.poll(t0 + Duration::from_millis(700)),
            Some("ab".to_string())
        );
        // Nothing further to fire.
        assert_eq!(d.poll(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn short_values_never_fire() {
        let mut d = debouncer();
        let t0 = Instant::now();
        d.input("a", t0);
        assert_eq!(d.poll(t0 + QUIET), None);
    }

    #[test]
    fn value_is_trimmed_before_length_check() {
        let mut d = debouncer();
        let t0 = Instant::now();
        d.input("  a  ", t0);
        assert_eq!(d.poll(t0 + QUIET), None);
        d.input("  ab  ", t0 + QUIET);
        assert_eq!(d.poll(t0 + QUIET + QUIET), Some("ab".to_string()));
    }

    #[test]
    fn same_value_does_not_refire() {
        let mut d = debouncer();
        let t0 = Instant::now();
        d.input("ab", t0);
        assert_eq!(d.poll(t0 + QUIET), Some("ab".to_string()));
        d.input("ab ", t0 + QUIET);
        assert_eq!(d.poll(t0 + QUIET + QUIET), None);
    }

    #[test]
    fn reset_clears_fired_memory() {
        let mut d = debouncer();
        let t0 = Instant::now();
        d.input("ab", t0);
        assert_eq!(d.poll(t0 + QUIET), Some("ab".to_string()));
        d.reset();
        d.input("ab", t0 + QUIET);
        assert_eq!(d.poll(t0 + QUIET + QUIET), Some("ab".to_string()));
    }

    #[test]
    fn mark_fired_suppresses_duplicate() {
        let mut d = debouncer();
        let t0 = Instant::now();
        d.mark_fired("ab");
        d.input("ab", t0);
        assert_eq!(d.poll(t0 + QUIET), None);
    }
}
