//! Toast notifications.
//!
//! Short-lived messages stacked in a corner of the screen. Each toast
//! auto-dismisses after its duration; the topmost can be dismissed early
//! with a key. Swept from the tick loop.

use std::time::{Duration, Instant};

use uuid::Uuid;

/// Toast severity, controls the accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A single on-screen toast.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
    created: Instant,
    duration: Duration,
}

impl Toast {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= self.duration
    }
}

/// Stack of live toasts, oldest first.
#[derive(Debug)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    default_duration: Duration,
}

impl ToastStack {
    pub const fn new(default_duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            default_duration,
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            created: now,
            duration: self.default_duration,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) -> Uuid {
        self.push(ToastKind::Success, message, now)
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) -> Uuid {
        self.push(ToastKind::Error, message, now)
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) -> Uuid {
        self.push(ToastKind::Info, message, now)
    }

    /// Dismiss a toast early by id.
    pub fn dismiss(&mut self, id: Uuid) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Dismiss the oldest toast, if any.
    pub fn dismiss_front(&mut self) {
        if !self.toasts.is_empty() {
            self.toasts.remove(0);
        }
    }

    /// Drop expired toasts. Called every tick.
    pub fn sweep(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(3000);

    #[test]
    fn toast_survives_until_duration() {
        let mut stack = ToastStack::new(DURATION);
        let t0 = Instant::now();
        stack.success("saved", t0);
        stack.sweep(t0 + Duration::from_millis(2999));
        assert!(!stack.is_empty());
    }

    #[test]
    fn toast_auto_dismisses_after_duration() {
        let mut stack = ToastStack::new(DURATION);
        let t0 = Instant::now();
        stack.success("saved", t0);
        stack.sweep(t0 + DURATION);
        assert!(stack.is_empty());
    }

    #[test]
    fn explicit_dismiss_removes_early() {
        let mut stack = ToastStack::new(DURATION);
        let t0 = Instant::now();
        let id = stack.error("boom", t0);
        stack.dismiss(id);
        assert!(stack.is_empty());
    }

    #[test]
    fn dismiss_front_removes_oldest() {
        let mut stack = ToastStack::new(DURATION);
        let t0 = Instant::now();
        stack.info("first", t0);
        stack.info("second", t0 + Duration::from_millis(1));
        stack.dismiss_front();
        let remaining: Vec<&str> = stack.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(remaining, vec!["second"]);
    }

    #[test]
    fn sweep_only_drops_expired() {
        let mut stack = ToastStack::new(DURATION);
        let t0 = Instant::now();
        stack.info("old", t0);
        stack.info("new", t0 + Duration::from_millis(2000));
        stack.sweep(t0 + Duration::from_millis(3500));
        let remaining: Vec<&str> = stack.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(remaining, vec!["new"]);
    }
}
