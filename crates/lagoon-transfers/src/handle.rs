//! The capability surface the platform hands the manager per transfer

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Payload of a non-terminal notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressUpdate {
    Progressing,
    /// The handle signalled interruption mid-stream (network failure,
    /// device loss). Treated as terminal; retrying is out of scope.
    Interrupted,
}

/// Payload of the final notification a handle emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Completed,
    Cancelled,
    Interrupted,
}

/// Notification kinds a [`TransferHandle`] can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEvent {
    Updated(ProgressUpdate),
    Done(TransferOutcome),
}

/// One in-flight byte stream, owned by the platform.
///
/// The manager drives the controls and reads the counters but never
/// implements the stream itself. Controls are fire-and-forget: `cancel` on
/// a handle whose teardown is already underway must be harmless, and all of
/// them may be called from any thread.
pub trait TransferHandle: Send + Sync + 'static {
    fn pause(&self);
    fn resume(&self);
    fn is_paused(&self) -> bool;
    fn cancel(&self);

    /// Bind the destination path. Called exactly once, before any bytes
    /// are expected to flow.
    fn set_destination(&self, path: &Path);

    /// Cumulative bytes received so far.
    fn received_bytes(&self) -> u64;

    /// Reported content length, or 0 while unknown.
    fn total_bytes(&self) -> u64;

    /// The handle's notification stream. The manager takes exactly one
    /// subscription per session and drops it on terminal transition; an
    /// implementation may return an already-closed receiver for any call
    /// after the first.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<TransferEvent>;
}

/// Asks the user where a transfer should land.
///
/// `None` is the cancellation signal: the transfer is torn down and no
/// session is ever registered. Implementations report their own failures
/// the same way.
#[async_trait]
pub trait DestinationChooser: Send + Sync {
    async fn choose(&self, suggested_name: &str) -> Option<PathBuf>;
}
