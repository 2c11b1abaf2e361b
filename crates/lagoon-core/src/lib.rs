//! Lagoon Core
//!
//! Configuration and the shell state container. The webview layer renders;
//! Rust owns the transfer registry and the navigation policy.

mod config;
mod error;
mod shell;

pub use config::ShellConfig;
pub use error::CoreError;
pub use shell::Shell;

// Re-export the component crates the application drives.
pub use lagoon_gate::{AllowList, NavigationGate, Verdict};
pub use lagoon_transfers::{
    Clock, DestinationChooser, ManualClock, ProgressUpdate, SystemClock, TransferEvent,
    TransferHandle, TransferManager, TransferOutcome, TransferSnapshot, TransferStatus,
    UpdateChannel,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
