use std::path::PathBuf;

use tauri::{AppHandle, State};
use tauri_plugin_dialog::{DialogExt, FilePath};
use tokio::sync::oneshot;

use super::CommandResult;
use crate::ipc::{handlers, UPLOAD_FILTERS};
use crate::ipc::payloads::{
    CurrentSession, SessionCreated, SessionDirectory, SessionList, TranscriptSaved,
    UploadedFiles,
};
use crate::state::AppState;

#[tauri::command]
pub async fn create_session(state: State<'_, AppState>) -> CommandResult<SessionCreated> {
    Ok(handlers::create_session(&state).await)
}

#[tauri::command]
pub async fn get_current_session(state: State<'_, AppState>) -> CommandResult<CurrentSession> {
    Ok(handlers::get_current_session(&state).await)
}

#[tauri::command]
pub async fn cleanup_session(state: State<'_, AppState>) -> CommandResult {
    Ok(handlers::cleanup_session(&state).await)
}

#[tauri::command]
pub async fn update_notes(state: State<'_, AppState>, notes: String) -> CommandResult {
    Ok(handlers::update_notes(&state, &notes).await)
}

/// Upload `paths`, or ask the user to pick files when none are given.
#[tauri::command]
pub async fn upload_file(
    app: AppHandle,
    state: State<'_, AppState>,
    paths: Option<Vec<PathBuf>>,
) -> CommandResult<UploadedFiles> {
    let paths = match paths {
        Some(paths) if !paths.is_empty() => paths,
        _ => pick_files(&app).await,
    };
    Ok(handlers::upload_files(&state, paths).await)
}

/// Open the native picker without holding a runtime worker; resolves to
/// nothing when the dialog is cancelled.
async fn pick_files(app: &AppHandle) -> Vec<PathBuf> {
    let (tx, rx) = oneshot::channel::<Option<Vec<FilePath>>>();

    let mut dialog = app.dialog().file().set_title("Upload to session");
    for (name, extensions) in UPLOAD_FILTERS {
        dialog = dialog.add_filter(*name, extensions);
    }
    dialog.pick_files(move |picked| {
        let _ = tx.send(picked);
    });

    let picked = match rx.await {
        Ok(picked) => picked.unwrap_or_default(),
        Err(_) => {
            tracing::warn!("File dialog closed without a result");
            Vec::new()
        }
    };

    picked
        .into_iter()
        .filter_map(|file| match file.into_path() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping picked file: {}", e);
                None
            }
        })
        .collect()
}

#[tauri::command]
pub async fn remove_file(state: State<'_, AppState>, name: String) -> CommandResult {
    Ok(handlers::remove_file(&state, &name).await)
}

#[tauri::command]
pub async fn save_transcript(
    state: State<'_, AppState>,
    text: String,
) -> CommandResult<TranscriptSaved> {
    Ok(handlers::save_transcript(&state, &text).await)
}

#[tauri::command]
pub async fn get_all_sessions(state: State<'_, AppState>) -> CommandResult<SessionList> {
    Ok(handlers::get_all_sessions(&state).await)
}

#[tauri::command]
pub async fn get_session_directory(
    state: State<'_, AppState>,
) -> CommandResult<SessionDirectory> {
    Ok(handlers::get_session_directory(&state).await)
}
