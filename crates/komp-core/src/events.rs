//! App-wide event bus.
//!
//! A process-wide broadcast channel used to nudge interested views after a
//! mutation elsewhere in the app. The canonical use is the friend-request
//! badge: responding to a request publishes `FriendRequestsChanged`, and the
//! navbar refreshes its count on that event in addition to its fixed poll.
//! Listeners treat every event as a hint to re-fetch; the fetch itself is
//! idempotent, so duplicate or out-of-order deliveries are harmless.

use tokio::sync::broadcast;

/// Events published on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The set of pending friend requests changed (sent, accepted,
    /// rejected, or cancelled).
    FriendRequestsChanged,
}

/// Cloneable handle to the broadcast channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// Create a bus. Capacity bounds how far a slow subscriber may lag
    /// before it starts missing events; missed events only cost an extra
    /// refresh, never correctness.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers. Publishing with no
    /// subscribers is not an error.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        bus.publish(AppEvent::FriendRequestsChanged);
        assert_eq!(rx.recv().await.unwrap(), AppEvent::FriendRequestsChanged);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_ok() {
        let bus = EventBus::default();
        bus.publish(AppEvent::FriendRequestsChanged);
    }

    #[tokio::test]
    async fn all_subscribers_see_the_event() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();
        bus.publish(AppEvent::FriendRequestsChanged);
        assert_eq!(a.recv().await.unwrap(), AppEvent::FriendRequestsChanged);
        assert_eq!(b.recv().await.unwrap(), AppEvent::FriendRequestsChanged);
    }

    #[tokio::test]
    async fn subscription_starts_at_subscribe_time() {
        let bus = EventBus::default();
        bus.publish(AppEvent::FriendRequestsChanged);
        let mut rx = bus.subscribe();
        bus.publish(AppEvent::FriendRequestsChanged);
        assert_eq!(rx.recv().await.unwrap(), AppEvent::FriendRequestsChanged);
        assert!(rx.try_recv().is_err());
    }
}
