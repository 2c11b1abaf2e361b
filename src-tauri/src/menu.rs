//! Application menu
//!
//! Carries the two accelerators the chrome relies on: reload the content
//! view, and toggle the downloads drawer.

use tauri::menu::{MenuBuilder, MenuItemBuilder, SubmenuBuilder};
use tauri::{Emitter, Manager};

use crate::commands;

pub fn install(app: &tauri::App) -> tauri::Result<()> {
    let handle = app.handle();

    let application = SubmenuBuilder::new(handle, "Application")
        .about(None)
        .separator()
        .quit()
        .build()?;

    let reload = MenuItemBuilder::with_id("reload-view", "Reload")
        .accelerator("CmdOrCtrl+R")
        .build(handle)?;
    let transfers = MenuItemBuilder::with_id("toggle-transfers", "Downloads")
        .accelerator("CmdOrCtrl+Shift+D")
        .build(handle)?;

    let view = SubmenuBuilder::new(handle, "View")
        .item(&reload)
        .item(&transfers)
        .separator()
        .fullscreen()
        .build()?;

    let menu = MenuBuilder::new(handle)
        .item(&application)
        .item(&view)
        .build()?;

    app.set_menu(menu)?;

    app.on_menu_event(|app, event| match event.id().as_ref() {
        "reload-view" => {
            if let Some(webview) = app.get_webview(&commands::content_webview_label("main")) {
                let _ = webview.reload();
            }
        }
        "toggle-transfers" => {
            let _ = app.emit_to(
                commands::ui_webview_label("main").as_str(),
                "toggle-transfers",
                (),
            );
        }
        _ => {}
    });

    Ok(())
}
