//! Transfer session manager

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use chrono::{DateTime, Utc};

use crate::channel::UpdateChannel;
use crate::clock::{Clock, SystemClock};
use crate::handle::{
    DestinationChooser, ProgressUpdate, TransferEvent, TransferHandle, TransferOutcome,
};
use crate::transfer::{TransferSnapshot, TransferStatus};

/// Two nearly simultaneous samples must not divide by zero.
const MIN_SAMPLE_SECS: f64 = 0.001;

struct SessionEntry {
    snapshot: TransferSnapshot,
    handle: Arc<dyn TransferHandle>,
    last_sample_bytes: u64,
    last_sample_at: DateTime<Utc>,
}

/// Registry of every transfer session the shell has accepted.
///
/// Constructed once and passed by reference to whatever needs it (command
/// handlers, the channel forwarder); there is no ambient global. All
/// mutations happen under the registry lock and publish on the update
/// channel before the lock drops, so per-session notification order always
/// matches mutation order.
pub struct TransferManager {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    updates: UpdateChannel,
    clock: Arc<dyn Clock>,
}

impl TransferManager {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            updates: UpdateChannel::default(),
            clock,
        }
    }

    /// Accept one platform-initiated transfer.
    ///
    /// Waits for the destination prompt; this is the only suspension point
    /// in the manager. A dismissed prompt (or an unusable path) cancels the
    /// handle and registers nothing: the transfer never appears in the
    /// registry or on the update channel. Otherwise the destination is
    /// bound before any bytes flow and the session starts in `downloading`.
    pub async fn begin_transfer(
        &self,
        handle: Arc<dyn TransferHandle>,
        suggested_name: &str,
        chooser: &dyn DestinationChooser,
    ) -> Option<TransferSnapshot> {
        let file_name = sanitize_file_name(suggested_name);

        let destination = match chooser.choose(&file_name).await {
            Some(path) => path,
            None => {
                tracing::info!(file_name = %file_name, "Destination prompt dismissed, dropping transfer");
                handle.cancel();
                return None;
            }
        };

        if !destination.is_absolute() {
            tracing::warn!(
                file_name = %file_name,
                path = %destination.display(),
                "Destination is not an absolute path, dropping transfer"
            );
            handle.cancel();
            return None;
        }

        handle.set_destination(&destination);

        let now = self.clock.now();
        let snapshot = TransferSnapshot {
            id: Uuid::new_v4().to_string(),
            file_name,
            destination,
            total_bytes: handle.total_bytes(),
            received_bytes: 0,
            speed_bps: 0.0,
            status: TransferStatus::Downloading,
            started_at: now,
        };

        let events = handle.subscribe();

        {
            let mut sessions = self.sessions.write();
            sessions.insert(
                snapshot.id.clone(),
                SessionEntry {
                    snapshot: snapshot.clone(),
                    handle: Arc::clone(&handle),
                    last_sample_bytes: 0,
                    last_sample_at: now,
                },
            );
            self.updates.publish(snapshot.clone());
        }

        tracing::info!(
            transfer_id = %snapshot.id,
            file_name = %snapshot.file_name,
            destination = %snapshot.destination.display(),
            "Transfer session started"
        );

        let manager = self.clone();
        let id = snapshot.id.clone();
        tokio::spawn(async move {
            manager.pump_events(id, events).await;
        });

        Some(snapshot)
    }

    /// Pause a session. No-op for unknown ids, terminal sessions, and
    /// handles that already report paused (so repeated commands publish
    /// nothing new).
    pub fn pause(&self, id: &str) {
        let mut sessions = self.sessions.write();
        let Some(entry) = sessions.get_mut(id) else {
            tracing::debug!(transfer_id = %id, "Pause for unknown transfer ignored");
            return;
        };

        if entry.snapshot.status.is_terminal() || entry.handle.is_paused() {
            return;
        }

        entry.handle.pause();
        entry.snapshot.status = TransferStatus::Paused;
        self.updates.publish(entry.snapshot.clone());

        tracing::info!(transfer_id = %id, "Transfer paused");
    }

    /// Resume a paused session. No-op unless the handle reports paused.
    pub fn resume(&self, id: &str) {
        let mut sessions = self.sessions.write();
        let Some(entry) = sessions.get_mut(id) else {
            tracing::debug!(transfer_id = %id, "Resume for unknown transfer ignored");
            return;
        };

        if entry.snapshot.status.is_terminal() || !entry.handle.is_paused() {
            return;
        }

        entry.handle.resume();
        entry.snapshot.status = TransferStatus::Downloading;
        self.updates.publish(entry.snapshot.clone());

        tracing::info!(transfer_id = %id, "Transfer resumed");
    }

    /// Cancel a session. The status flips synchronously; the handle's
    /// teardown is asynchronous and best-effort. No-op once terminal.
    pub fn cancel(&self, id: &str) {
        let mut sessions = self.sessions.write();
        let Some(entry) = sessions.get_mut(id) else {
            tracing::debug!(transfer_id = %id, "Cancel for unknown transfer ignored");
            return;
        };

        if entry.snapshot.status.is_terminal() {
            return;
        }

        entry.handle.cancel();
        entry.snapshot.status = TransferStatus::Cancelled;
        entry.snapshot.speed_bps = 0.0;
        self.updates.publish(entry.snapshot.clone());

        tracing::info!(transfer_id = %id, "Transfer cancelled");
    }

    /// Deep-copied snapshot of every known session, in unspecified order.
    pub fn list_transfers(&self) -> Vec<TransferSnapshot> {
        self.sessions
            .read()
            .values()
            .map(|entry| entry.snapshot.clone())
            .collect()
    }

    /// Observe every state change. See [`UpdateChannel`] for the delivery
    /// guarantees.
    pub fn subscribe(&self) -> broadcast::Receiver<TransferSnapshot> {
        self.updates.subscribe()
    }

    /// One subscription per session; ends (dropping the receiver) as soon
    /// as the session goes terminal.
    async fn pump_events(&self, id: String, mut events: mpsc::UnboundedReceiver<TransferEvent>) {
        while let Some(event) = events.recv().await {
            if self.apply_event(&id, event) {
                break;
            }
        }
        tracing::debug!(transfer_id = %id, "Event subscription closed");
    }

    /// Fold one handle notification into the session. Returns true once the
    /// session is terminal (or gone), which ends the pump.
    fn apply_event(&self, id: &str, event: TransferEvent) -> bool {
        let mut sessions = self.sessions.write();
        let Some(entry) = sessions.get_mut(id) else {
            return true;
        };

        if entry.snapshot.status.is_terminal() {
            return true;
        }

        match event {
            TransferEvent::Updated(update) => {
                let now = self.clock.now();
                let received = entry.handle.received_bytes();

                let elapsed_secs = ((now - entry.last_sample_at).num_milliseconds() as f64
                    / 1000.0)
                    .max(MIN_SAMPLE_SECS);
                // saturating_sub clamps a re-ordered (smaller) report to a
                // zero delta instead of a negative rate.
                let delta = received.saturating_sub(entry.last_sample_bytes) as f64;

                entry.last_sample_bytes = received;
                entry.last_sample_at = now;

                // A handle may re-report a lower cumulative count after a
                // non-resumable restart; the snapshot stays monotonic. It
                // may also exceed total_bytes on a misreported length;
                // that is a display-only anomaly.
                entry.snapshot.received_bytes = entry.snapshot.received_bytes.max(received);
                let total = entry.handle.total_bytes();
                if total > 0 {
                    entry.snapshot.total_bytes = total;
                }

                match update {
                    ProgressUpdate::Interrupted => {
                        entry.snapshot.status = TransferStatus::Interrupted;
                        entry.snapshot.speed_bps = 0.0;
                    }
                    ProgressUpdate::Progressing => {
                        // Authoritative re-derivation: an externally caused
                        // pause (OS level) shows up here, not via commands.
                        entry.snapshot.status = if entry.handle.is_paused() {
                            TransferStatus::Paused
                        } else {
                            TransferStatus::Downloading
                        };
                        entry.snapshot.speed_bps = delta / elapsed_secs;
                    }
                }
            }
            TransferEvent::Done(outcome) => {
                let received = entry.handle.received_bytes();
                entry.snapshot.received_bytes = entry.snapshot.received_bytes.max(received);
                let total = entry.handle.total_bytes();
                if total > 0 {
                    entry.snapshot.total_bytes = total;
                }

                entry.snapshot.speed_bps = 0.0;
                entry.snapshot.status = match outcome {
                    TransferOutcome::Completed => TransferStatus::Completed,
                    TransferOutcome::Cancelled => TransferStatus::Cancelled,
                    TransferOutcome::Interrupted => TransferStatus::Interrupted,
                };

                tracing::info!(
                    transfer_id = %id,
                    status = entry.snapshot.status.as_str(),
                    received_bytes = entry.snapshot.received_bytes,
                    "Transfer finished"
                );
            }
        }

        self.updates.publish(entry.snapshot.clone());
        entry.snapshot.status.is_terminal()
    }
}

impl Default for TransferManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TransferManager {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            updates: self.updates.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download")
        .trim();

    if name.is_empty() {
        "download".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use async_trait::async_trait;
    use chrono::Duration;
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

    struct FakeHandle {
        paused: AtomicBool,
        cancels: AtomicUsize,
        received: AtomicU64,
        total: AtomicU64,
        destination: Mutex<Option<PathBuf>>,
        events_rx: Mutex<Option<mpsc::UnboundedReceiver<TransferEvent>>>,
        events_tx: mpsc::UnboundedSender<TransferEvent>,
    }

    impl FakeHandle {
        fn new(total: u64) -> Arc<Self> {
            let (tx, rx) = mpsc::unbounded_channel();
            Arc::new(Self {
                paused: AtomicBool::new(false),
                cancels: AtomicUsize::new(0),
                received: AtomicU64::new(0),
                total: AtomicU64::new(total),
                destination: Mutex::new(None),
                events_rx: Mutex::new(Some(rx)),
                events_tx: tx,
            })
        }

        fn set_received(&self, bytes: u64) {
            self.received.store(bytes, Ordering::SeqCst);
        }

        fn push_progress(&self) {
            let _ = self
                .events_tx
                .send(TransferEvent::Updated(ProgressUpdate::Progressing));
        }

        fn push_interrupted_progress(&self) {
            let _ = self
                .events_tx
                .send(TransferEvent::Updated(ProgressUpdate::Interrupted));
        }

        fn push_done(&self, outcome: TransferOutcome) {
            let _ = self.events_tx.send(TransferEvent::Done(outcome));
        }

        fn cancel_count(&self) -> usize {
            self.cancels.load(Ordering::SeqCst)
        }
    }

    impl TransferHandle for FakeHandle {
        fn pause(&self) {
            self.paused.store(true, Ordering::SeqCst);
        }

        fn resume(&self) {
            self.paused.store(false, Ordering::SeqCst);
        }

        fn is_paused(&self) -> bool {
            self.paused.load(Ordering::SeqCst)
        }

        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }

        fn set_destination(&self, path: &Path) {
            *self.destination.lock() = Some(path.to_path_buf());
        }

        fn received_bytes(&self) -> u64 {
            self.received.load(Ordering::SeqCst)
        }

        fn total_bytes(&self) -> u64 {
            self.total.load(Ordering::SeqCst)
        }

        fn subscribe(&self) -> mpsc::UnboundedReceiver<TransferEvent> {
            self.events_rx.lock().take().unwrap_or_else(|| {
                let (_tx, rx) = mpsc::unbounded_channel();
                rx
            })
        }
    }

    struct FixedChooser(PathBuf);

    #[async_trait]
    impl DestinationChooser for FixedChooser {
        async fn choose(&self, _suggested_name: &str) -> Option<PathBuf> {
            Some(self.0.clone())
        }
    }

    struct CancelChooser;

    #[async_trait]
    impl DestinationChooser for CancelChooser {
        async fn choose(&self, _suggested_name: &str) -> Option<PathBuf> {
            None
        }
    }

    fn manager_with_manual_clock() -> (TransferManager, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (TransferManager::with_clock(clock.clone()), clock)
    }

    async fn begin(
        manager: &TransferManager,
        handle: &Arc<FakeHandle>,
        name: &str,
    ) -> TransferSnapshot {
        manager
            .begin_transfer(
                Arc::clone(handle) as Arc<dyn TransferHandle>,
                name,
                &FixedChooser(PathBuf::from(format!("/tmp/{name}"))),
            )
            .await
            .expect("transfer should register")
    }

    #[tokio::test]
    async fn test_begin_transfer_registers_session() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(5_000_000);
        let mut updates = manager.subscribe();

        let snapshot = begin(&manager, &handle, "video.mp4").await;

        assert_eq!(snapshot.file_name, "video.mp4");
        assert_eq!(snapshot.destination, PathBuf::from("/tmp/video.mp4"));
        assert_eq!(snapshot.status, TransferStatus::Downloading);
        assert_eq!(snapshot.total_bytes, 5_000_000);
        assert_eq!(snapshot.received_bytes, 0);
        assert_eq!(snapshot.speed_bps, 0.0);

        assert_eq!(
            *handle.destination.lock(),
            Some(PathBuf::from("/tmp/video.mp4"))
        );

        let listed = manager.list_transfers();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, snapshot.id);

        // The initial snapshot is published with the registration.
        assert_eq!(updates.recv().await.unwrap().id, snapshot.id);
    }

    #[tokio::test]
    async fn test_dismissed_prompt_registers_nothing() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        let result = manager
            .begin_transfer(
                Arc::clone(&handle) as Arc<dyn TransferHandle>,
                "video.mp4",
                &CancelChooser,
            )
            .await;

        assert!(result.is_none());
        assert!(manager.list_transfers().is_empty());
        assert_eq!(handle.cancel_count(), 1);
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relative_destination_registers_nothing() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);

        let result = manager
            .begin_transfer(
                Arc::clone(&handle) as Arc<dyn TransferHandle>,
                "video.mp4",
                &FixedChooser(PathBuf::from("partial/video.mp4")),
            )
            .await;

        assert!(result.is_none());
        assert!(manager.list_transfers().is_empty());
        assert_eq!(handle.cancel_count(), 1);
    }

    #[tokio::test]
    async fn test_suggested_name_is_sanitized() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);

        let snapshot = manager
            .begin_transfer(
                Arc::clone(&handle) as Arc<dyn TransferHandle>,
                "../../etc/passwd",
                &FixedChooser(PathBuf::from("/tmp/out")),
            )
            .await
            .unwrap();

        assert_eq!(snapshot.file_name, "passwd");
    }

    #[tokio::test]
    async fn test_throughput_from_progress_samples() {
        let (manager, clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        let snapshot = begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        handle.set_received(1_000_000);
        clock.advance(Duration::seconds(2));
        handle.push_progress();

        let update = updates.recv().await.unwrap();
        assert_eq!(update.id, snapshot.id);
        assert_eq!(update.received_bytes, 1_000_000);
        assert_eq!(update.status, TransferStatus::Downloading);
        assert!((update.speed_bps - 500_000.0).abs() < 1.0);
    }

    #[tokio::test]
    async fn test_speed_clamped_on_reordered_reports() {
        let (manager, clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        handle.set_received(100_000);
        clock.advance(Duration::seconds(1));
        handle.push_progress();
        let first = updates.recv().await.unwrap();
        assert!(first.speed_bps > 0.0);

        // A smaller cumulative count must clamp, not go negative, and the
        // displayed byte count stays monotonic.
        handle.set_received(40_000);
        clock.advance(Duration::seconds(1));
        handle.push_progress();
        let second = updates.recv().await.unwrap();
        assert_eq!(second.speed_bps, 0.0);
        assert_eq!(second.received_bytes, 100_000);
    }

    #[tokio::test]
    async fn test_near_simultaneous_samples_use_epsilon() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        // Clock never advances: elapsed collapses to the epsilon floor.
        handle.set_received(1_000);
        handle.push_progress();
        let update = updates.recv().await.unwrap();
        assert!(update.speed_bps.is_finite());
        assert!(update.speed_bps >= 0.0);
    }

    #[tokio::test]
    async fn test_pause_is_idempotent() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        let snapshot = begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        manager.pause(&snapshot.id);
        let paused = updates.recv().await.unwrap();
        assert_eq!(paused.status, TransferStatus::Paused);
        assert!(handle.is_paused());

        // Second pause: handle already reports paused, nothing published.
        manager.pause(&snapshot.id);
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resume_requires_paused_handle() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        let snapshot = begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        // Not paused yet: resume is a silent no-op.
        manager.resume(&snapshot.id);
        assert!(updates.try_recv().is_err());

        manager.pause(&snapshot.id);
        let _ = updates.recv().await.unwrap();

        manager.resume(&snapshot.id);
        let resumed = updates.recv().await.unwrap();
        assert_eq!(resumed.status, TransferStatus::Downloading);
        assert!(!handle.is_paused());
    }

    #[tokio::test]
    async fn test_no_downloading_after_cancelled() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        let snapshot = begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        manager.cancel(&snapshot.id);
        let cancelled = updates.recv().await.unwrap();
        assert_eq!(cancelled.status, TransferStatus::Cancelled);
        assert_eq!(cancelled.speed_bps, 0.0);
        assert_eq!(handle.cancel_count(), 1);

        // Terminal means terminal: commands and late events change nothing.
        manager.resume(&snapshot.id);
        manager.pause(&snapshot.id);
        handle.set_received(10);
        handle.push_progress();
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert!(updates.try_recv().is_err());
        let listed = manager.list_transfers();
        assert_eq!(listed[0].status, TransferStatus::Cancelled);
        assert_eq!(listed[0].received_bytes, 0);
    }

    #[tokio::test]
    async fn test_cancel_after_completed_is_noop() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(1_000);
        let mut updates = manager.subscribe();

        let snapshot = begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        handle.set_received(1_000);
        handle.push_done(TransferOutcome::Completed);
        let done = updates.recv().await.unwrap();
        assert_eq!(done.status, TransferStatus::Completed);
        assert_eq!(done.received_bytes, 1_000);
        assert_eq!(done.speed_bps, 0.0);

        manager.cancel(&snapshot.id);
        assert!(updates.try_recv().is_err());
        assert_eq!(handle.cancel_count(), 0);
        assert_eq!(
            manager.list_transfers()[0].status,
            TransferStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_interrupted_progress_is_terminal() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        let snapshot = begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        handle.push_interrupted_progress();
        let interrupted = updates.recv().await.unwrap();
        assert_eq!(interrupted.status, TransferStatus::Interrupted);
        assert_eq!(interrupted.speed_bps, 0.0);

        manager.pause(&snapshot.id);
        manager.resume(&snapshot.id);
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_done_interrupted_is_surfaced_not_thrown() {
        let (manager, _clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        handle.set_received(123);
        handle.push_done(TransferOutcome::Interrupted);
        let interrupted = updates.recv().await.unwrap();
        assert_eq!(interrupted.status, TransferStatus::Interrupted);
        assert_eq!(interrupted.received_bytes, 123);
        assert_eq!(interrupted.speed_bps, 0.0);
    }

    #[tokio::test]
    async fn test_unknown_id_commands_are_noops() {
        let (manager, _clock) = manager_with_manual_clock();
        let mut updates = manager.subscribe();

        manager.pause("no-such-id");
        manager.resume("no-such-id");
        manager.cancel("no-such-id");

        assert!(updates.try_recv().is_err());
        assert!(manager.list_transfers().is_empty());
    }

    #[tokio::test]
    async fn test_externally_paused_handle_rederives_status() {
        let (manager, clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        begin(&manager, &handle, "video.mp4").await;
        let _ = updates.recv().await.unwrap();

        // Paused behind the manager's back (OS level); a progress event,
        // not a command, is what surfaces it.
        handle.pause();
        clock.advance(Duration::seconds(1));
        handle.push_progress();

        let update = updates.recv().await.unwrap();
        assert_eq!(update.status, TransferStatus::Paused);
    }

    #[tokio::test]
    async fn test_total_bytes_updates_when_reported_late() {
        let (manager, clock) = manager_with_manual_clock();
        let handle = FakeHandle::new(0);
        let mut updates = manager.subscribe();

        let snapshot = begin(&manager, &handle, "video.mp4").await;
        assert_eq!(snapshot.total_bytes, 0);
        let _ = updates.recv().await.unwrap();

        handle.total.store(9_999, Ordering::SeqCst);
        handle.set_received(500);
        clock.advance(Duration::seconds(1));
        handle.push_progress();

        let update = updates.recv().await.unwrap();
        assert_eq!(update.total_bytes, 9_999);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("clip.mp4"), "clip.mp4");
        assert_eq!(sanitize_file_name("dir/clip.mp4"), "clip.mp4");
        assert_eq!(sanitize_file_name(""), "download");
        assert_eq!(sanitize_file_name("   "), "download");
    }
}
