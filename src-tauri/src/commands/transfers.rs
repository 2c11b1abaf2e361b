//! Download transfer commands
//!
//! The IPC surface over the transfer manager, the native save-prompt
//! chooser, and the forwarder that turns update-channel snapshots into
//! renderer events.

use async_trait::async_trait;
use std::path::PathBuf;
use tauri::{AppHandle, Emitter, Manager, State};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::oneshot;

use lagoon_core::{DestinationChooser, TransferSnapshot};

use super::CommandResult;
use crate::http_transfer::HttpTransfer;
use crate::state::AppState;

/// Native save dialog, defaulting into the configured download directory.
///
/// A dismissed dialog resolves to `None`, which the manager treats as the
/// cancellation signal.
pub struct DialogChooser {
    app: AppHandle,
    download_dir: PathBuf,
}

impl DialogChooser {
    pub fn new(app: AppHandle, download_dir: PathBuf) -> Self {
        Self { app, download_dir }
    }
}

#[async_trait]
impl DestinationChooser for DialogChooser {
    async fn choose(&self, suggested_name: &str) -> Option<PathBuf> {
        let (tx, rx) = oneshot::channel();

        self.app
            .dialog()
            .file()
            .set_title("Save Video")
            .set_directory(&self.download_dir)
            .set_file_name(suggested_name)
            .save_file(move |picked| {
                let _ = tx.send(picked);
            });

        let picked = rx.await.ok().flatten()?;
        picked.into_path().ok()
    }
}

/// Accept one transfer in the background: prompt, register, stream.
/// Used by the webview download hook and the explicit save command.
pub fn spawn_transfer(app: AppHandle, url: String, suggested_name: String) {
    tauri::async_runtime::spawn(async move {
        let shell = app.state::<AppState>().shell().clone();
        let chooser = DialogChooser::new(app.clone(), shell.config().download_dir.clone());
        let handle = HttpTransfer::new(reqwest::Client::new(), url);

        // None covers both a dismissed prompt and chooser failure; either
        // way the transfer was cancelled and never registered.
        let _ = shell
            .transfers()
            .begin_transfer(handle, &suggested_name, &chooser)
            .await;
    });
}

/// Push every update-channel snapshot to the renderer as an event.
pub fn spawn_update_forwarder(app: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let mut updates = app.state::<AppState>().shell().transfers().subscribe();

        loop {
            match updates.recv().await {
                Ok(snapshot) => {
                    let _ = app.emit("transfer-updated", &snapshot);
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Transfer update stream lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

#[tauri::command]
pub fn list_transfers(state: State<AppState>) -> CommandResult<Vec<TransferSnapshot>> {
    CommandResult::ok(state.shell().transfers().list_transfers())
}

#[tauri::command]
pub fn pause_transfer(state: State<AppState>, id: String) -> CommandResult<()> {
    state.shell().transfers().pause(&id);
    CommandResult::ok(())
}

#[tauri::command]
pub fn resume_transfer(state: State<AppState>, id: String) -> CommandResult<()> {
    state.shell().transfers().resume(&id);
    CommandResult::ok(())
}

#[tauri::command]
pub fn cancel_transfer(state: State<AppState>, id: String) -> CommandResult<()> {
    state.shell().transfers().cancel(&id);
    CommandResult::ok(())
}

/// Start a transfer for a URL the renderer chose (e.g. a context action).
#[tauri::command]
pub async fn save_from_url(
    app: AppHandle,
    url: String,
    file_name: Option<String>,
) -> CommandResult<Option<TransferSnapshot>> {
    let name = file_name.unwrap_or_else(|| best_effort_file_name(&url));
    let shell = app.state::<AppState>().shell().clone();
    let chooser = DialogChooser::new(app.clone(), shell.config().download_dir.clone());
    let handle = HttpTransfer::new(reqwest::Client::new(), url);

    let snapshot = shell
        .transfers()
        .begin_transfer(handle, &name, &chooser)
        .await;

    CommandResult::ok(snapshot)
}

/// Show a finished file in the platform file manager.
#[tauri::command]
pub fn reveal_transfer(app: AppHandle, state: State<AppState>, id: String) -> CommandResult<()> {
    let Some(snapshot) = state
        .shell()
        .transfers()
        .list_transfers()
        .into_iter()
        .find(|t| t.id == id)
    else {
        return CommandResult::err(format!("Unknown transfer: {id}"));
    };

    match app.opener().reveal_item_in_dir(&snapshot.destination) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

fn best_effort_file_name(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(name) = parsed
            .path_segments()
            .and_then(|mut s| s.next_back())
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return name.to_string();
        }
    }
    "download".to_string()
}
