//! Broadcast path from the manager to its observers

use tokio::sync::broadcast;

use crate::transfer::TransferSnapshot;

const DEFAULT_CAPACITY: usize = 64;

/// Typed publish/subscribe channel carrying session snapshots.
///
/// Publishing with zero subscribers is a safe no-op. A slow observer sees
/// the newest snapshots (ring-buffer semantics); there is no backpressure.
/// Snapshots for one session arrive in the order its mutations were
/// applied; no ordering is promised across sessions.
#[derive(Debug, Clone)]
pub struct UpdateChannel {
    tx: broadcast::Sender<TransferSnapshot>,
}

impl UpdateChannel {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TransferSnapshot> {
        self.tx.subscribe()
    }

    pub fn publish(&self, snapshot: TransferSnapshot) {
        // Err means nobody is listening right now; that is fine.
        let _ = self.tx.send(snapshot);
    }
}

impl Default for UpdateChannel {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TransferStatus;
    use chrono::Utc;
    use std::path::PathBuf;

    fn snapshot(id: &str) -> TransferSnapshot {
        TransferSnapshot {
            id: id.to_string(),
            file_name: "clip.mp4".to_string(),
            destination: PathBuf::from("/tmp/clip.mp4"),
            total_bytes: 0,
            received_bytes: 0,
            speed_bps: 0.0,
            status: TransferStatus::Downloading,
            started_at: Utc::now(),
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let channel = UpdateChannel::default();
        channel.publish(snapshot("a"));
    }

    #[tokio::test]
    async fn test_subscribers_see_snapshots_in_order() {
        let channel = UpdateChannel::default();
        let mut rx = channel.subscribe();

        channel.publish(snapshot("first"));
        channel.publish(snapshot("second"));

        assert_eq!(rx.recv().await.unwrap().id, "first");
        assert_eq!(rx.recv().await.unwrap().id, "second");
    }
}
