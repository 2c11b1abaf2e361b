//! Shell state container
//!
//! One `Shell` is constructed at startup and handed by reference to the
//! command handlers and the webview guards; it is the only owner of the
//! transfer registry and the navigation gate.

use lagoon_gate::{AllowList, NavigationGate, Verdict};
use lagoon_transfers::TransferManager;

use crate::config::ShellConfig;

pub struct Shell {
    config: ShellConfig,
    gate: NavigationGate,
    transfers: TransferManager,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        let gate = NavigationGate::new(AllowList::from_hosts(&config.allowed_hosts));
        let transfers = TransferManager::new();

        tracing::info!(
            app_url = %config.app_url,
            allowed_hosts = config.allowed_hosts.len(),
            "Shell wired"
        );

        Self {
            config,
            gate,
            transfers,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn app_url(&self) -> &str {
        &self.config.app_url
    }

    pub fn gate(&self) -> &NavigationGate {
        &self.gate
    }

    pub fn transfers(&self) -> &TransferManager {
        &self.transfers
    }

    /// Classify one candidate URL. See [`NavigationGate::decide`].
    pub fn decide(&self, url: &str) -> Verdict {
        self.gate.decide(url)
    }
}

impl Clone for Shell {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            gate: self.gate.clone(),
            transfers: self.transfers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_gates_with_configured_hosts() {
        let shell = Shell::new(ShellConfig::default());

        assert_eq!(shell.decide(shell.app_url()), Verdict::Allow);
        assert_eq!(
            shell.decide("https://cdn.lagoon.stream/clip.mp4"),
            Verdict::Allow
        );
        assert_eq!(
            shell.decide("https://elsewhere.example.com"),
            Verdict::OpenExternally
        );
        assert_eq!(shell.decide("nonsense"), Verdict::Deny);
    }

    #[test]
    fn test_shell_starts_with_empty_registry() {
        let shell = Shell::new(ShellConfig::default());
        assert!(shell.transfers().list_transfers().is_empty());
    }
}
