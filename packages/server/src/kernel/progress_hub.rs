//! In-process broadcast hub for verification progress.
//!
//! One channel shared by all runs; observers filter on `runId` if they care.
//! Publishing with nobody listening is a no-op, and late subscribers only see
//! events published after they subscribed.
//!
//! # Usage
//!
//! Producers (the verification pipeline, through `ProgressPublisher`):
//!   hub.publish(ProgressEvent::stage(run_id, PipelineStage::Fetching));
//!
//! Consumers (WebSocket connections):
//!   let mut rx = hub.subscribe();

use tokio::sync::broadcast;

use super::ProgressPublisher;
use crate::domains::verification::ProgressEvent;

/// Cloneable handle to the shared progress channel.
#[derive(Clone)]
pub struct ProgressHub {
    sender: broadcast::Sender<ProgressEvent>,
}

impl ProgressHub {
    /// Create a hub with default capacity (256 buffered events).
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.sender.subscribe()
    }

    /// Number of currently connected observers.
    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ProgressHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPublisher for ProgressHub {
    fn publish(&self, event: ProgressEvent) {
        // Ignore send errors (no active receivers)
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::verification::PipelineStage;
    use tokio::sync::broadcast::error::TryRecvError;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_publish_subscribe_roundtrip() {
        let hub = ProgressHub::new();
        let mut rx = hub.subscribe();

        let event = ProgressEvent::stage(Uuid::new_v4(), PipelineStage::Extracting);
        hub.publish(event.clone());

        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_publish_no_observers_is_noop() {
        let hub = ProgressHub::new();
        // Should not panic
        hub.publish(ProgressEvent::started(Uuid::new_v4(), "dropped"));
        assert_eq!(hub.observer_count(), 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_no_replay() {
        let hub = ProgressHub::new();
        hub.publish(ProgressEvent::started(Uuid::new_v4(), "before"));

        let mut rx = hub.subscribe();
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_multiple_observers_and_disconnect() {
        let hub = ProgressHub::new();
        let mut rx1 = hub.subscribe();
        let rx2 = hub.subscribe();
        assert_eq!(hub.observer_count(), 2);

        drop(rx2);
        assert_eq!(hub.observer_count(), 1);

        let event = ProgressEvent::completed(Uuid::new_v4(), Uuid::new_v4());
        hub.publish(event.clone());
        assert_eq!(rx1.recv().await.unwrap(), event);
    }
}
