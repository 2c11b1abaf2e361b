//! Shell configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::CoreError;
use crate::Result;

/// Everything fixed at process start.
///
/// Loaded once from the platform data directory (or `LAGOON_CONFIG`) and
/// read-only for the lifetime of the process; in particular the allowed
/// hosts never change after the gate is built from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// The embedded web property
    pub app_url: String,
    /// Hostnames trusted for in-shell navigation
    pub allowed_hosts: Vec<String>,
    /// Default directory offered by the save prompt
    pub download_dir: PathBuf,
    /// Minimum splash display time before the main window shows
    pub splash_min_ms: u64,
}

impl ShellConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };

        config.validated()
    }

    /// Load from `LAGOON_CONFIG` if set, else `<data dir>/config.json`.
    pub fn load() -> Result<Self> {
        let path = std::env::var("LAGOON_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::data_dir().join("config.json"));

        Self::load_from(&path)
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Lagoon"))
            .unwrap_or_else(|| PathBuf::from(".lagoon"))
    }

    /// The app URL must itself pass the gate the config produces.
    fn validated(self) -> Result<Self> {
        let parsed = Url::parse(&self.app_url)
            .map_err(|e| CoreError::Config(format!("Invalid app_url: {e}")))?;

        if parsed.scheme() != "https" {
            return Err(CoreError::Config(format!(
                "app_url must be https, got {}",
                parsed.scheme()
            )));
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| CoreError::Config("app_url has no host".to_string()))?;

        let listed = self
            .allowed_hosts
            .iter()
            .any(|h| h.eq_ignore_ascii_case(host));
        if !listed {
            return Err(CoreError::Config(format!(
                "app_url host {host} is not in allowed_hosts"
            )));
        }

        Ok(self)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        let download_dir = dirs::download_dir().unwrap_or_else(|| Self::data_dir().join("Downloads"));

        Self {
            app_url: "https://app.lagoon.stream".to_string(),
            allowed_hosts: vec![
                "app.lagoon.stream".to_string(),
                "cdn.lagoon.stream".to_string(),
            ],
            download_dir,
            splash_min_ms: 1_000,
        }
    }
}

// Minimal platform directory lookups; enough for the two paths we need.
mod dirs {
    use std::path::PathBuf;

    fn home() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(PathBuf::from)
    }

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            home().map(|h| h.join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| home().map(|h| h.join(".local/share")))
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }

    pub fn download_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|h| PathBuf::from(h).join("Downloads"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DOWNLOAD_DIR")
                .ok()
                .map(PathBuf::from)
                .or_else(|| home().map(|h| h.join("Downloads")))
        }
        #[cfg(target_os = "macos")]
        {
            home().map(|h| h.join("Downloads"))
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
