use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CogniError {
    #[error("Overlay window is not available")]
    NoActiveWindow,

    #[error("Window manager call failed: {0}")]
    Window(String),

    #[error("No active session")]
    NoActiveSession,

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Implement Serialize for Tauri
impl Serialize for CogniError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<anyhow::Error> for CogniError {
    fn from(err: anyhow::Error) -> Self {
        CogniError::Settings(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, CogniError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_as_message() {
        let err = CogniError::SessionNotFound("session-x".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Session not found: session-x\"");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CogniError = io.into();
        assert!(matches!(err, CogniError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
