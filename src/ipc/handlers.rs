//! IPC command logic, independent of Tauri.

use std::path::PathBuf;

use super::payloads::{
    ApiKeyStatus, ConfigPayload, CurrentSession, KeyCheck, SessionCreated, SessionDirectory,
    SessionList, TranscriptSaved, UploadedFiles, VisibilityPayload, WindowStatePayload,
};
use super::{validate_dimensions, validate_file_name, validate_link, IpcResponse, MoveDirection};
use crate::runtime::OverlayEvent;
use crate::session::UploadedFile;
use crate::settings::{has_api_key, validate_api_key_format, ApiProvider};
use crate::state::AppState;

// =============================================================================
// Config
// =============================================================================

pub async fn get_config(state: &AppState) -> IpcResponse<ConfigPayload> {
    IpcResponse::ok(ConfigPayload {
        config: state.settings_manager.get().await,
    })
}

/// Deep-merge a partial config from the UI and persist it.
pub async fn update_config(
    state: &AppState,
    patch: serde_json::Value,
) -> IpcResponse<ConfigPayload> {
    match state.settings_manager.merge(patch).await {
        Ok(config) => {
            state.window.set_overlay_mode(config.window.full_screen_overlay);
            IpcResponse::ok(ConfigPayload { config })
        }
        Err(e) => IpcResponse::fail(format!("{:#}", e)),
    }
}

pub async fn check_api_key(state: &AppState) -> IpcResponse<ApiKeyStatus> {
    let settings = state.settings_manager.get().await;
    IpcResponse::ok(ApiKeyStatus {
        has_key: has_api_key(&settings),
    })
}

/// Format check only; defaults to the configured provider.
pub async fn validate_api_key(
    state: &AppState,
    api_key: &str,
    provider: Option<ApiProvider>,
) -> IpcResponse<KeyCheck> {
    let provider = match provider {
        Some(provider) => provider,
        None => state.settings_manager.get().await.ai.provider,
    };
    let validation = validate_api_key_format(provider, api_key);
    IpcResponse::ok(KeyCheck {
        valid: validation.valid,
        reason: validation.error,
    })
}

// =============================================================================
// Window
// =============================================================================

pub fn toggle_window(state: &AppState) -> IpcResponse {
    state.window.toggle_visibility();
    IpcResponse::done()
}

pub fn toggle_edit_mode(state: &AppState) -> IpcResponse {
    state.window.toggle_edit_mode();
    IpcResponse::done()
}

pub fn set_mouse_ignore(state: &AppState, ignore: bool) -> IpcResponse {
    state.window.set_mouse_ignore(ignore);
    IpcResponse::done()
}

pub fn set_has_content(state: &AppState, has_content: bool) -> IpcResponse {
    state.window.set_has_content(has_content);
    IpcResponse::done()
}

pub fn set_dimensions(state: &AppState, width: f64, height: f64) -> IpcResponse {
    if let Err(e) = validate_dimensions(width, height) {
        return IpcResponse::fail(e);
    }
    state.window.set_dimensions(width, height);
    IpcResponse::done()
}

pub fn get_window_state(state: &AppState) -> IpcResponse<WindowStatePayload> {
    IpcResponse::ok(WindowStatePayload {
        state: state.window.state(),
    })
}

pub fn move_window(state: &AppState, direction: MoveDirection) -> IpcResponse {
    match direction {
        MoveDirection::Left => state.window.move_left(),
        MoveDirection::Right => state.window.move_right(),
        MoveDirection::Up => state.window.move_up(),
        MoveDirection::Down => state.window.move_down(),
    }
    IpcResponse::done()
}

// =============================================================================
// Session
// =============================================================================

pub async fn create_session(state: &AppState) -> IpcResponse<SessionCreated> {
    IpcResponse::from_result(
        state
            .sessions
            .create_new_session()
            .await
            .map(|session_id| SessionCreated { session_id }),
    )
}

pub async fn get_current_session(state: &AppState) -> IpcResponse<CurrentSession> {
    IpcResponse::ok(CurrentSession {
        session_id: state.sessions.current_session_id().await,
        data: state.sessions.load_session_data().await,
    })
}

pub async fn cleanup_session(state: &AppState) -> IpcResponse {
    IpcResponse::from_result(state.sessions.cleanup_session().await.map(|_| Default::default()))
}

pub async fn update_notes(state: &AppState, notes: &str) -> IpcResponse {
    IpcResponse::from_result(state.sessions.update_notes(notes).await.map(|_| Default::default()))
}

/// Copy each path into the session. Stops at the first failure.
pub async fn upload_files(state: &AppState, paths: Vec<PathBuf>) -> IpcResponse<UploadedFiles> {
    if paths.is_empty() {
        return IpcResponse::fail("No file selected");
    }

    for path in &paths {
        if let Err(e) = state.sessions.add_uploaded_file(path).await {
            return IpcResponse::fail(e);
        }
    }

    let names: Vec<String> = paths
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect();
    let files: Vec<UploadedFile> = state
        .sessions
        .load_session_data()
        .await
        .map(|data| data.uploaded_files)
        .unwrap_or_default()
        .into_iter()
        .filter(|f| names.contains(&f.name))
        .collect();

    IpcResponse::ok(UploadedFiles { files })
}

pub async fn remove_file(state: &AppState, name: &str) -> IpcResponse {
    if let Err(e) = validate_file_name(name) {
        return IpcResponse::fail(e);
    }
    IpcResponse::from_result(
        state
            .sessions
            .remove_uploaded_file(name)
            .await
            .map(|_| Default::default()),
    )
}

pub async fn save_transcript(state: &AppState, text: &str) -> IpcResponse<TranscriptSaved> {
    IpcResponse::from_result(
        state
            .sessions
            .save_meeting_transcript(text)
            .await
            .map(|path| TranscriptSaved { path }),
    )
}

pub async fn get_all_sessions(state: &AppState) -> IpcResponse<SessionList> {
    IpcResponse::ok(SessionList {
        sessions: state.sessions.get_all_sessions().await,
    })
}

/// Root directory holding every session, available with or without a
/// current session.
pub async fn get_session_directory(state: &AppState) -> IpcResponse<SessionDirectory> {
    IpcResponse::ok(SessionDirectory {
        directory: state.sessions.app_data_dir().to_path_buf(),
    })
}

// =============================================================================
// Overlay
// =============================================================================

pub fn get_component_visibility(state: &AppState) -> IpcResponse<VisibilityPayload> {
    IpcResponse::ok(VisibilityPayload {
        visibility: state.components.visibility(),
    })
}

pub fn open_settings(state: &AppState) -> IpcResponse {
    state.window.show_settings();
    IpcResponse::done()
}

/// Ask the UI to drop transient view state and return to click-through.
pub fn trigger_reset(state: &AppState) -> IpcResponse {
    state.window.exit_edit_mode();
    if let Err(e) = state.runtime.emit(OverlayEvent::ResetView) {
        return IpcResponse::fail(e);
    }
    IpcResponse::done()
}

/// Validate a link before the caller hands it to the system opener.
pub fn check_link(url: &str) -> IpcResponse {
    IpcResponse::from_result(validate_link(url).map(|_| Default::default()))
}
