//! Tauri commands for configuration and the API key.

use tauri::State;

use super::schema::ApiProvider;
use crate::commands::CommandResult;
use crate::ipc::handlers;
use crate::ipc::payloads::{ApiKeyStatus, ConfigPayload, KeyCheck};
use crate::state::AppState;

#[tauri::command]
pub async fn get_config(state: State<'_, AppState>) -> CommandResult<ConfigPayload> {
    Ok(handlers::get_config(&state).await)
}

/// Merge a partial config object into the saved settings.
#[tauri::command]
pub async fn update_config(
    state: State<'_, AppState>,
    config: serde_json::Value,
) -> CommandResult<ConfigPayload> {
    Ok(handlers::update_config(&state, config).await)
}

#[tauri::command]
pub async fn check_api_key(state: State<'_, AppState>) -> CommandResult<ApiKeyStatus> {
    Ok(handlers::check_api_key(&state).await)
}

#[tauri::command]
pub async fn validate_api_key(
    state: State<'_, AppState>,
    api_key: String,
    provider: Option<ApiProvider>,
) -> CommandResult<KeyCheck> {
    Ok(handlers::validate_api_key(&state, &api_key, provider).await)
}
