//! Transfer session data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Bytes are flowing (or will resume flowing without user action)
    Downloading,
    /// Held by the user or the platform; resumable
    Paused,
    /// The handle reported a non-completion terminal outcome
    Interrupted,
    /// All bytes landed at the destination
    Completed,
    /// Torn down on command
    Cancelled,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Downloading => "downloading",
            TransferStatus::Paused => "paused",
            TransferStatus::Interrupted => "interrupted",
            TransferStatus::Completed => "completed",
            TransferStatus::Cancelled => "cancelled",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferStatus::Interrupted | TransferStatus::Completed | TransferStatus::Cancelled
        )
    }
}

/// Public projection of one transfer session.
///
/// This is what `list` queries return and what the update channel carries.
/// Rate-sampling bookkeeping stays inside the manager's registry entry and
/// never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferSnapshot {
    /// Opaque unique token, stable for the session's lifetime, never reused
    pub id: String,
    /// Display name, fixed at creation
    pub file_name: String,
    /// Absolute path chosen by the user at creation; immutable thereafter
    pub destination: PathBuf,
    /// 0 until the remote reports a content length
    pub total_bytes: u64,
    /// Cumulative bytes received; non-decreasing while the session is active
    pub received_bytes: u64,
    /// Instantaneous rate; 0 once the session is terminal
    pub speed_bps: f64,
    pub status: TransferStatus,
    /// Fixed at creation; display ordering only
    pub started_at: DateTime<Utc>,
}
