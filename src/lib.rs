//! Cogni: a transparent, always-on-top assistant overlay.
//!
//! The library holds everything that runs without a window (window
//! controller state machine, session store, settings, IPC handlers) so it
//! builds and tests headless. The `tauri` feature adds the desktop shell and
//! the `cli` feature adds `cogni-cli`.

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "tauri")]
mod commands;
pub mod error;
pub mod ipc;
pub mod overlay;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod shortcuts;
pub mod state;
pub mod tray;

#[cfg(feature = "tauri")]
pub use app::run;

#[cfg(feature = "tauri")]
mod app {
    use std::sync::Arc;

    use tauri::{Manager, RunEvent};

    use crate::commands::*;
    use crate::error::CogniError;
    use crate::overlay::tauri::TauriOverlayWindow;
    use crate::runtime::{OverlayRuntime, TauriRuntime};
    use crate::session::{SessionManager, SessionStore};
    use crate::settings::commands::*;
    use crate::settings::SettingsManager;
    use crate::state::AppState;
    use crate::{shortcuts, tray};

    /// Label of the overlay window in `tauri.conf.json`.
    const MAIN_WINDOW: &str = "main";

    fn init_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cogni_lib=debug"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    fn setup(app: &mut tauri::App) -> Result<(), Box<dyn std::error::Error>> {
        let handle = app.handle().clone();
        let runtime: Arc<dyn OverlayRuntime> = Arc::new(TauriRuntime::new(handle.clone()));

        let (settings_manager, settings) = tauri::async_runtime::block_on(async {
            let manager = SettingsManager::new().await?;
            if manager.ensure_settings_file().await? {
                manager.reload().await?;
            }
            let settings = manager.get().await;
            anyhow::Ok((Arc::new(manager), settings))
        })?;

        // Without a place to store sessions there is nothing to run
        let sessions: Arc<dyn SessionStore> = Arc::new(tauri::async_runtime::block_on(
            SessionManager::from_settings(&settings.sessions),
        )?);

        let state = AppState::new(&settings, settings_manager, sessions, Arc::clone(&runtime));

        let window = app
            .get_webview_window(MAIN_WINDOW)
            .ok_or(CogniError::NoActiveWindow)?;
        let overlay = Arc::new(TauriOverlayWindow::new(window.clone(), Arc::clone(&runtime)));
        state.window.attach(overlay.clone(), settings.ui.opacity)?;

        let controller = Arc::clone(&state.window);
        window.on_window_event(move |event| {
            if let Some(signal) = overlay.signal(event) {
                controller.handle_window_event(signal);
            }
        });

        shortcuts::register_all(&handle, &settings.shortcuts, state.window.clone());

        app.manage(state);
        let tray = tray::build_tray(&handle)?;
        app.manage(tray);

        tracing::info!("Cogni overlay ready");
        Ok(())
    }

    fn on_exit(handle: &tauri::AppHandle) {
        shortcuts::unregister_all(handle);

        let Some(state) = handle.try_state::<AppState>() else {
            return;
        };
        tauri::async_runtime::block_on(async {
            if let Err(e) = state.sessions.cleanup_session().await {
                tracing::warn!("Failed to clean up session on exit: {}", e);
            }
            if let Err(e) = state.runtime.shutdown().await {
                tracing::warn!("Runtime shutdown failed: {}", e);
            }
        });
        tracing::info!("Cogni exiting");
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        init_tracing();

        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env loaded: {}", e);
        }

        let app = tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .plugin(tauri_plugin_dialog::init())
            .plugin(tauri_plugin_global_shortcut::Builder::new().build())
            .setup(setup)
            .invoke_handler(tauri::generate_handler![
                // Config commands
                get_config,
                update_config,
                check_api_key,
                validate_api_key,
                // Window commands
                toggle_window,
                toggle_edit_mode,
                set_mouse_ignore,
                set_has_content,
                set_window_dimensions,
                update_content_dimensions,
                get_window_state,
                move_window,
                get_component_visibility,
                open_settings,
                trigger_reset,
                open_link,
                // Session commands
                create_session,
                get_current_session,
                cleanup_session,
                update_notes,
                upload_file,
                remove_file,
                save_transcript,
                get_all_sessions,
                get_session_directory,
            ])
            .build(tauri::generate_context!());

        let app = match app {
            Ok(app) => app,
            Err(e) => {
                tracing::error!("Failed to start Cogni: {}", e);
                return;
            }
        };

        app.run(|handle, event| {
            if let RunEvent::Exit = event {
                on_exit(handle);
            }
        });
    }
}
