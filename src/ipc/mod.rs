//! Request/response shapes of the IPC boundary.
//!
//! Every command answers `{ success, error?, ...payload }`. Handlers in
//! [`handlers`] hold the logic and run without Tauri; the `commands` module
//! only unwraps Tauri state and forwards.

pub mod handlers;
pub mod payloads;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{CogniError, Result};

/// Payload for responses that carry nothing besides the status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Empty {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpcResponse<T: Serialize = Empty> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Serialize> IpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn fail(error: impl Display) -> Self {
        let error = error.to_string();
        tracing::error!("IPC request failed: {}", error);
        Self {
            success: false,
            error: Some(error),
            data: None,
        }
    }

    pub fn from_result<E: Display>(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e),
        }
    }
}

impl IpcResponse<Empty> {
    pub fn done() -> Self {
        Self::ok(Empty {})
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Filters offered by the upload file picker, in display order.
pub const UPLOAD_FILTERS: &[(&str, &[&str])] = &[
    ("Documents", &["pdf", "txt", "md", "doc", "docx"]),
    ("Images", &["png", "jpg", "jpeg"]),
    ("All Files", &["*"]),
];

/// Content dimensions must be finite and non-negative.
pub fn validate_dimensions(width: f64, height: f64) -> Result<()> {
    for (label, value) in [("width", width), ("height", height)] {
        if !value.is_finite() || value < 0.0 {
            return Err(CogniError::InvalidRequest(format!(
                "{} must be a non-negative number, got {}",
                label, value
            )));
        }
    }
    Ok(())
}

/// Uploaded file names are bare names inside the session's `files/`.
pub fn validate_file_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CogniError::InvalidRequest("file name is empty".to_string()));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(CogniError::InvalidRequest(format!(
            "invalid file name: {}",
            name
        )));
    }
    Ok(())
}

/// Only web links are handed to the system opener.
pub fn validate_link(url: &str) -> Result<()> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(CogniError::InvalidRequest(format!(
            "only http(s) links can be opened: {}",
            url
        ))),
    }
}
