//! Tauri IPC Commands
//!
//! These commands bridge the renderer chrome to the Rust core. The
//! renderer never touches a transfer or a URL decision directly.

use serde::Serialize;

pub mod app;
pub mod transfers;
pub mod view;
pub mod windows;

pub fn ui_webview_label(window_label: &str) -> String {
    format!("ui-{window_label}")
}

pub fn content_webview_label(window_label: &str) -> String {
    format!("content-{window_label}")
}

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}
