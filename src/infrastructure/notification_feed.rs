// Broadcast feed backing the transient notification surface
use crate::application::notifier::Notifier;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

const FEED_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    pub issued_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct NotificationFeed {
    tx: broadcast::Sender<Notification>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationFeed {
    fn notify(&self, message: &str) {
        tracing::warn!("Notification: {}", message);

        let notification = Notification {
            message: message.to_string(),
            issued_at: Utc::now(),
        };
        // Nobody listening is fine; the message is transient.
        let _ = self.tx.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_notifications() {
        let feed = NotificationFeed::new();
        let mut rx = feed.subscribe();

        feed.notify("Failed to load environmental data");

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "Failed to load environmental data");
    }

    #[test]
    fn test_notify_without_subscribers_does_not_panic() {
        let feed = NotificationFeed::new();
        feed.notify("hello");
    }
}
