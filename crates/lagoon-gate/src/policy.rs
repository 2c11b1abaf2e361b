//! Navigation policy decisions

use serde::Serialize;
use url::Url;

use crate::allowlist::AllowList;

/// Outcome of classifying one candidate URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Load inside the shell, in a guarded view.
    Allow,
    /// Leave the shell: hand the URL to the OS default handler.
    OpenExternally,
    /// Suppress outright (malformed input, or an in-place load that must
    /// not proceed).
    Deny,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Allow => "allow",
            Verdict::OpenExternally => "open_externally",
            Verdict::Deny => "deny",
        }
    }
}

/// Policy decision point for everything the embedded content tries to load.
///
/// A URL is allowed in-shell iff it is a well-formed absolute `https` URL
/// whose hostname is a literal member of the allow list. Anything else is
/// classified `OpenExternally`; input that does not parse at all is `Deny`.
/// The caller maps the verdict onto the action its interception point
/// requires (cancel-and-hand-off for in-view navigation, suppress for
/// sub-view creation, and so on).
#[derive(Debug, Clone)]
pub struct NavigationGate {
    allow_list: AllowList,
}

impl NavigationGate {
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn decide(&self, raw: &str) -> Verdict {
        let parsed = match Url::parse(raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(url = %raw, error = %e, "Unparseable navigation target");
                return Verdict::Deny;
            }
        };

        let host_allowed = parsed
            .host_str()
            .map(|host| self.allow_list.contains(host))
            .unwrap_or(false);

        if parsed.scheme() == "https" && host_allowed {
            Verdict::Allow
        } else {
            Verdict::OpenExternally
        }
    }
}
