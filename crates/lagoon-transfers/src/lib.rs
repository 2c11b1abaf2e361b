//! Lagoon Download Session Manager
//!
//! Owns the registry of file-transfer sessions the shell has accepted,
//! derives user-facing state from the notifications of each underlying
//! [`TransferHandle`], measures instantaneous throughput, and answers the
//! pause/resume/cancel commands coming in over IPC. Every state change is
//! pushed to observers on a broadcast [`UpdateChannel`].
//!
//! Nothing here touches the network or the filesystem: the byte stream
//! lives behind the handle capability, and the destination prompt lives
//! behind the [`DestinationChooser`] seam.

mod channel;
mod clock;
mod handle;
mod manager;
mod transfer;

pub use channel::UpdateChannel;
pub use clock::{Clock, ManualClock, SystemClock};
pub use handle::{
    DestinationChooser, ProgressUpdate, TransferEvent, TransferHandle, TransferOutcome,
};
pub use manager::TransferManager;
pub use transfer::{TransferSnapshot, TransferStatus};
