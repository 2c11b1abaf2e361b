//! Trusted-host allow list

use std::collections::HashSet;

/// The set of hostnames trusted for in-shell navigation.
///
/// Fixed at construction (from configuration at process start); there is no
/// mutation API. Hosts are folded to lowercase on the way in and on lookup so
/// membership is case-insensitive regardless of how a URL was typed.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    hosts: HashSet<String>,
}

impl AllowList {
    pub fn from_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = hosts
            .into_iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .filter(|h| !h.is_empty())
            .collect();

        Self { hosts }
    }

    /// Literal membership check. No wildcard or subdomain inference.
    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(&host.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
