use tauri::{AppHandle, State};
use tauri_plugin_opener::OpenerExt;

use crate::ipc::payloads::{VisibilityPayload, WindowStatePayload};
use crate::ipc::{handlers, IpcResponse, MoveDirection};
use crate::state::AppState;

#[tauri::command]
pub fn toggle_window(state: State<'_, AppState>) -> IpcResponse {
    handlers::toggle_window(&state)
}

#[tauri::command]
pub fn toggle_edit_mode(state: State<'_, AppState>) -> IpcResponse {
    handlers::toggle_edit_mode(&state)
}

#[tauri::command]
pub fn set_mouse_ignore(state: State<'_, AppState>, ignore: bool) -> IpcResponse {
    handlers::set_mouse_ignore(&state, ignore)
}

#[tauri::command]
pub fn set_has_content(state: State<'_, AppState>, has_content: bool) -> IpcResponse {
    handlers::set_has_content(&state, has_content)
}

#[tauri::command]
pub fn set_window_dimensions(state: State<'_, AppState>, width: f64, height: f64) -> IpcResponse {
    handlers::set_dimensions(&state, width, height)
}

/// Content size reported by the UI after layout.
#[tauri::command]
pub fn update_content_dimensions(
    state: State<'_, AppState>,
    width: f64,
    height: f64,
) -> IpcResponse {
    handlers::set_dimensions(&state, width, height)
}

#[tauri::command]
pub fn get_window_state(state: State<'_, AppState>) -> IpcResponse<WindowStatePayload> {
    handlers::get_window_state(&state)
}

#[tauri::command]
pub fn move_window(state: State<'_, AppState>, direction: MoveDirection) -> IpcResponse {
    handlers::move_window(&state, direction)
}

#[tauri::command]
pub fn get_component_visibility(state: State<'_, AppState>) -> IpcResponse<VisibilityPayload> {
    handlers::get_component_visibility(&state)
}

#[tauri::command]
pub fn open_settings(state: State<'_, AppState>) -> IpcResponse {
    handlers::open_settings(&state)
}

#[tauri::command]
pub fn trigger_reset(state: State<'_, AppState>) -> IpcResponse {
    handlers::trigger_reset(&state)
}

/// Open an http(s) link in the default browser.
#[tauri::command]
pub fn open_link(app: AppHandle, url: String) -> IpcResponse {
    let checked = handlers::check_link(&url);
    if !checked.success {
        return checked;
    }
    match app.opener().open_url(url.trim(), None::<&str>) {
        Ok(()) => IpcResponse::done(),
        Err(e) => IpcResponse::fail(format!("Failed to open link: {}", e)),
    }
}
