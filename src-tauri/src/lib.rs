//! Lagoon - Tauri application
//!
//! A desktop shell around the hosted video pool: the embedded site renders
//! inside a guarded content webview, downloads are streamed natively and
//! tracked by the transfer manager, and every outbound navigation goes
//! through the gate.

mod commands;
mod http_transfer;
mod menu;
mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tauri::webview::{PageLoadEvent, WebviewBuilder};
use tauri::{LogicalPosition, LogicalSize, Manager, WebviewUrl, WebviewWindowBuilder};

use lagoon_core::ShellConfig;
use state::AppState;

const MAIN_WIDTH: f64 = 1440.0;
const MAIN_HEIGHT: f64 = 900.0;
const HEADER_HEIGHT: f64 = 56.0;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    lagoon_core::init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let config = ShellConfig::load()?;
            let app_url = config.app_url.clone();
            let splash_min_ms = config.splash_min_ms;

            app.manage(AppState::new(config));

            // Splash first; the main window stays hidden until handover.
            WebviewWindowBuilder::new(app, "splash", WebviewUrl::App("splash.html".into()))
                .inner_size(520.0, 320.0)
                .decorations(false)
                .resizable(false)
                .always_on_top(true)
                .center()
                .build()?;

            let window = commands::windows::build_main_window(app.handle())?;

            let handover_done = Arc::new(AtomicBool::new(false));
            let app_for_handover = app.handle().clone();

            let ui_webview = WebviewBuilder::new(
                commands::ui_webview_label("main"),
                WebviewUrl::App("index.html".into()),
            )
            .auto_resize()
            .enable_clipboard_access()
            .on_page_load(move |_webview, payload| {
                if !matches!(payload.event(), PageLoadEvent::Finished) {
                    return;
                }
                if handover_done.swap(true, Ordering::SeqCst) {
                    return;
                }

                // Hold the splash for its minimum display time, then swap.
                let app = app_for_handover.clone();
                tauri::async_runtime::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(splash_min_ms)).await;

                    if let Some(splash) = app.get_window("splash") {
                        let _ = splash.close();
                    }
                    if let Some(main) = app.get_window("main") {
                        let _ = main.show();
                    }
                });
            });

            let ui_webview = window.add_child(
                ui_webview,
                LogicalPosition::new(0.0, 0.0),
                LogicalSize::new(MAIN_WIDTH, MAIN_HEIGHT),
            )?;
            let _ = ui_webview.show();

            commands::view::build_content_webview(
                app.handle(),
                &window,
                commands::content_webview_label("main"),
                &app_url,
                LogicalPosition::new(0.0, HEADER_HEIGHT),
                LogicalSize::new(MAIN_WIDTH, MAIN_HEIGHT - HEADER_HEIGHT),
            )?;

            menu::install(app)?;
            commands::transfers::spawn_update_forwarder(app.handle().clone());

            tracing::info!("Lagoon shell started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Shell
            commands::app::get_shell_config,
            commands::app::open_external,
            // Transfers
            commands::transfers::list_transfers,
            commands::transfers::pause_transfer,
            commands::transfers::resume_transfer,
            commands::transfers::cancel_transfer,
            commands::transfers::save_from_url,
            commands::transfers::reveal_transfer,
            // Views and windows
            commands::view::navigate_view,
            commands::view::reload_view,
            commands::view::set_view_bounds,
            commands::windows::toggle_fullscreen,
            commands::windows::open_url_in_new_window,
        ])
        .run(tauri::generate_context!())
        .expect("error while running Lagoon shell");
}
