//! Shell-level commands

use serde::Serialize;
use tauri::{AppHandle, Manager, State};
use tauri_plugin_opener::OpenerExt;

use lagoon_core::Verdict;

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ShellInfo {
    pub app_url: String,
    pub app_version: String,
    pub allowed_hosts: Vec<String>,
}

#[tauri::command]
pub fn get_shell_config(app: AppHandle, state: State<AppState>) -> CommandResult<ShellInfo> {
    let shell = state.shell();

    CommandResult::ok(ShellInfo {
        app_url: shell.app_url().to_string(),
        app_version: app.package_info().version.to_string(),
        allowed_hosts: shell.config().allowed_hosts.clone(),
    })
}

/// Explicit out-of-shell action. Returns true when the URL was handed to
/// the OS handler; an in-shell URL stays where it is.
#[tauri::command]
pub fn open_external(app: AppHandle, state: State<AppState>, url: String) -> CommandResult<bool> {
    match state.shell().decide(&url) {
        Verdict::Allow => CommandResult::ok(false),
        Verdict::OpenExternally => match app.opener().open_url(url.as_str(), None::<&str>) {
            Ok(()) => CommandResult::ok(true),
            Err(e) => CommandResult::err(e.to_string()),
        },
        Verdict::Deny => {
            tracing::warn!(url = %url, "Refusing to open malformed URL");
            CommandResult::ok(false)
        }
    }
}
