//! Shell window construction

use std::time::{SystemTime, UNIX_EPOCH};
use tauri::window::WindowBuilder;
use tauri::{AppHandle, LogicalPosition, LogicalSize, Window};

use super::view;
use crate::state::AppState;

const POPUP_WIDTH: f64 = 1100.0;
const POPUP_HEIGHT: f64 = 720.0;

fn next_popup_label() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("popup-{millis}")
}

/// A popup the gate allowed in-shell: a new top-level window holding one
/// guarded content view and nothing else.
pub fn open_popup_window(app: &AppHandle, url: &str) {
    let label = next_popup_label();

    let window = match WindowBuilder::new(app, &label)
        .title("Lagoon")
        .inner_size(POPUP_WIDTH, POPUP_HEIGHT)
        .center()
        .build()
    {
        Ok(w) => w,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create popup window");
            return;
        }
    };

    let content_label = super::content_webview_label(&label);
    if let Err(e) = view::build_content_webview(
        app,
        &window,
        content_label,
        url,
        LogicalPosition::new(0.0, 0.0),
        LogicalSize::new(POPUP_WIDTH, POPUP_HEIGHT),
    ) {
        // The gate re-checks at creation; a refused view closes the shell
        // window it would have lived in.
        tracing::warn!(url = %url, error = %e, "Popup content suppressed");
        let _ = window.close();
    }
}

/// Build the main shell window: hidden until the splash hands over, UI
/// chrome across the whole window, guarded content view below the header.
pub fn build_main_window(app: &AppHandle) -> tauri::Result<Window> {
    let window = WindowBuilder::new(app, "main")
        .title("Lagoon")
        .inner_size(1440.0, 900.0)
        .min_inner_size(1100.0, 720.0)
        .center()
        .visible(false)
        .build()?;

    Ok(window)
}

#[tauri::command]
pub fn toggle_fullscreen(window: Window) -> super::CommandResult<bool> {
    let next = !window.is_fullscreen().unwrap_or(false);
    match window.set_fullscreen(next) {
        Ok(()) => super::CommandResult::ok(next),
        Err(e) => super::CommandResult::err(e.to_string()),
    }
}

/// Open a URL in a fresh guarded window (renderer-initiated; the gate
/// still decides whether it loads).
#[tauri::command]
pub fn open_url_in_new_window(
    app: AppHandle,
    state: tauri::State<AppState>,
    url: String,
) -> super::CommandResult<()> {
    if state.shell().decide(&url) != lagoon_core::Verdict::Allow {
        return super::CommandResult::err(format!("URL not allowed in-shell: {url}"));
    }

    open_popup_window(&app, &url);
    super::CommandResult::ok(())
}
