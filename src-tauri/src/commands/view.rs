//! Content view management
//!
//! Every embedded view is built through `build_content_webview`, so the
//! navigation guards are attached at creation time and a view whose
//! initial URL fails the gate is never instantiated. The guards cover
//! in-place navigations, redirect targets, popup requests, and platform
//! download requests.

use tauri::webview::{DownloadEvent, NewWindowResponse, PageLoadEvent, Webview, WebviewBuilder};
use tauri::{AppHandle, Emitter, LogicalPosition, LogicalSize, Manager, State, WebviewUrl, Window};
use tauri_plugin_opener::OpenerExt;

use lagoon_core::Verdict;

use super::CommandResult;
use crate::state::AppState;

pub fn build_content_webview(
    app: &AppHandle,
    window: &Window,
    label: String,
    url: &str,
    position: LogicalPosition<f64>,
    size: LogicalSize<f64>,
) -> Result<Webview, String> {
    {
        let state = app.state::<AppState>();
        if state.shell().decide(url) != Verdict::Allow {
            return Err(format!("URL not allowed in-shell: {url}"));
        }
    }

    let parsed: url::Url = url.parse().map_err(|_| format!("Invalid URL: {url}"))?;

    let ui_label = super::ui_webview_label(window.label());
    let app_for_navigation = app.clone();
    let app_for_new_window = app.clone();
    let app_for_download = app.clone();
    let app_for_load = app.clone();

    let builder = WebviewBuilder::new(&label, WebviewUrl::External(parsed))
        .auto_resize()
        .enable_clipboard_access()
        .on_navigation(move |url| {
            // Shell-internal surfaces load freely.
            if matches!(url.scheme(), "tauri" | "about") {
                return true;
            }

            let state = app_for_navigation.state::<AppState>();
            match state.shell().decide(url.as_str()) {
                Verdict::Allow => true,
                Verdict::OpenExternally => {
                    // Covers direct navigations and redirect targets alike:
                    // cancel in-shell, hand the URL to the OS handler.
                    let _ = app_for_navigation
                        .opener()
                        .open_url(url.as_str(), None::<&str>);
                    false
                }
                Verdict::Deny => false,
            }
        })
        .on_new_window(move |url, _features| {
            let verdict = {
                let state = app_for_new_window.state::<AppState>();
                state.shell().decide(url.as_str())
            };

            match verdict {
                Verdict::Allow => {
                    // Window creation is deferred off the webview event
                    // handler; the popup re-checks the gate when it builds
                    // its own guarded view.
                    let app = app_for_new_window.clone();
                    let target = url.as_str().to_string();
                    tauri::async_runtime::spawn(async move {
                        super::windows::open_popup_window(&app, &target);
                    });
                }
                Verdict::OpenExternally => {
                    let _ = app_for_new_window
                        .opener()
                        .open_url(url.as_str(), None::<&str>);
                }
                Verdict::Deny => {}
            }

            // A natively created window would carry no guards; the only
            // views that exist are the ones built here.
            NewWindowResponse::Deny
        })
        .on_download(move |_webview, event| {
            if let DownloadEvent::Requested { url, destination } = event {
                let suggested = destination
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("download")
                    .to_string();

                tracing::info!(url = %url, file_name = %suggested, "Download requested by content");
                super::transfers::spawn_transfer(
                    app_for_download.clone(),
                    url.to_string(),
                    suggested,
                );

                // Suppress the platform download; we stream it ourselves.
                return false;
            }

            true
        })
        .on_page_load(move |_webview, payload| {
            let loading = matches!(payload.event(), PageLoadEvent::Started);
            let _ = app_for_load.emit_to(ui_label.as_str(), "content-loading", loading);
        });

    window.add_child(builder, position, size).map_err(|e| {
        tracing::error!(label = %label, error = %e, "Failed to create content webview");
        e.to_string()
    })
}

/// Navigate the window's content view. Disallowed targets are cancelled
/// and handed to the OS opener instead; returns whether the shell view
/// actually navigated.
#[tauri::command]
pub fn navigate_view(
    app: AppHandle,
    window: Window,
    state: State<AppState>,
    url: String,
) -> CommandResult<bool> {
    match state.shell().decide(&url) {
        Verdict::Allow => {
            let label = super::content_webview_label(window.label());
            let webview = match app.get_webview(&label) {
                Some(w) => w,
                None => return CommandResult::err(format!("No content view for {}", window.label())),
            };

            let parsed: url::Url = match url.parse() {
                Ok(u) => u,
                Err(_) => return CommandResult::err(format!("Invalid URL: {url}")),
            };

            match webview.navigate(parsed) {
                Ok(_) => CommandResult::ok(true),
                Err(e) => CommandResult::err(format!("Navigation failed: {e}")),
            }
        }
        Verdict::OpenExternally => {
            let _ = app.opener().open_url(url.as_str(), None::<&str>);
            CommandResult::ok(false)
        }
        Verdict::Deny => CommandResult::ok(false),
    }
}

#[tauri::command]
pub fn reload_view(app: AppHandle, window: Window) -> CommandResult<()> {
    let label = super::content_webview_label(window.label());
    let webview = match app.get_webview(&label) {
        Some(w) => w,
        None => return CommandResult::err(format!("No content view for {}", window.label())),
    };

    match webview.reload() {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(format!("Reload failed: {e}")),
    }
}

/// Relayout the content view (the chrome calls this when the downloads
/// drawer opens or the window resizes).
#[tauri::command]
pub fn set_view_bounds(
    app: AppHandle,
    window: Window,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> CommandResult<()> {
    let label = super::content_webview_label(window.label());
    let webview = match app.get_webview(&label) {
        Some(w) => w,
        None => return CommandResult::err(format!("No content view for {}", window.label())),
    };

    if let Err(e) = webview.set_position(LogicalPosition::new(x, y)) {
        return CommandResult::err(format!("Failed to set position: {e}"));
    }

    if let Err(e) = webview.set_size(LogicalSize::new(width, height)) {
        return CommandResult::err(format!("Failed to set size: {e}"));
    }

    CommandResult::ok(())
}
