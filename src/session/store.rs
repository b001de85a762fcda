use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::data::SessionData;
use crate::error::Result;

/// Persistence operations on the current session.
///
/// Write paths fail with `NoActiveSession` when no session is current;
/// read paths swallow errors and return empty values.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Start a fresh session and make it current. Returns its id.
    async fn create_new_session(&self) -> Result<String>;

    /// Make an existing session current.
    async fn open_session(&self, session_id: &str) -> Result<SessionData>;

    async fn load_session_data(&self) -> Option<SessionData>;

    async fn update_notes(&self, notes: &str) -> Result<()>;

    /// Copy `source` into the session. Returns the destination path.
    async fn add_uploaded_file(&self, source: &Path) -> Result<PathBuf>;

    /// Unknown names are a no-op.
    async fn remove_uploaded_file(&self, name: &str) -> Result<()>;

    /// Returns the transcript file path.
    async fn save_meeting_transcript(&self, text: &str) -> Result<PathBuf>;

    async fn read_meeting_transcript(&self) -> Option<String>;

    /// Clear uploads and notes, keeping the transcript. No-op without a
    /// current session.
    async fn cleanup_session(&self) -> Result<()>;

    /// Session ids under the app-data directory, newest first.
    async fn get_all_sessions(&self) -> Vec<String>;

    async fn current_session_id(&self) -> Option<String>;

    async fn current_session_dir(&self) -> Option<PathBuf>;

    fn app_data_dir(&self) -> &Path;
}
