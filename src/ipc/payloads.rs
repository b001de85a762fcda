use std::path::PathBuf;

use serde::Serialize;

use crate::overlay::{ComponentVisibility, WindowState};
use crate::session::{SessionData, UploadedFile};
use crate::settings::CogniSettings;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSession {
    pub session_id: Option<String>,
    pub data: Option<SessionData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadedFiles {
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptSaved {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionList {
    pub sessions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDirectory {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowStatePayload {
    pub state: WindowState,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisibilityPayload {
    pub visibility: ComponentVisibility,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigPayload {
    pub config: CogniSettings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyStatus {
    pub has_key: bool,
}

/// Result of a local key format check. `reason` explains a rejection.
#[derive(Debug, Clone, Serialize)]
pub struct KeyCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
