//! Filesystem-backed session store.
//!
//! Layout under the app-data directory:
//! - `session-<timestamp>/session.json`: [`SessionData`], rewritten on every change
//! - `session-<timestamp>/files/`: uploaded copies
//! - `session-<timestamp>/transcripts/meeting-transcript.txt`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::fs;
use tokio::sync::Mutex;

use super::data::{SessionData, UploadedFile};
use super::store::SessionStore;
use crate::error::{CogniError, Result};
use crate::settings::schema::SessionSettings;

const SESSION_PREFIX: &str = "session-";
const SESSION_FILE: &str = "session.json";
const FILES_DIR: &str = "files";
const TRANSCRIPTS_DIR: &str = "transcripts";
const TRANSCRIPT_FILE: &str = "meeting-transcript.txt";

/// Suffixes tried when two sessions are created in the same millisecond.
const MAX_ID_SUFFIX: u32 = 999;

/// Session id for a creation instant, e.g. `session-2026-10-19T08-15-30-123Z`.
pub fn session_id_for(at: DateTime<Utc>) -> String {
    let stamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{}{}", SESSION_PREFIX, stamp)
}

/// `true` for a bare `session-*` directory name.
pub fn is_session_id(id: &str) -> bool {
    id.starts_with(SESSION_PREFIX)
        && id.len() > SESSION_PREFIX.len()
        && !id.contains(['/', '\\'])
        && id != "."
        && !id.contains("..")
}

/// Directory that holds the `session-*` folders for these settings.
pub fn sessions_dir(settings: &SessionSettings) -> Result<PathBuf> {
    let root = match &settings.root {
        Some(root) => PathBuf::from(root),
        None => dirs::data_dir()
            .or_else(dirs::home_dir)
            .map(|d| d.join("cogni"))
            .ok_or_else(|| CogniError::Internal("cannot determine data directory".to_string()))?,
    };
    Ok(root.join(&settings.namespace))
}

#[derive(Debug, Clone)]
struct ActiveSession {
    id: String,
    dir: PathBuf,
}

impl ActiveSession {
    fn data_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn files_dir(&self) -> PathBuf {
        self.dir.join(FILES_DIR)
    }

    fn transcript_path(&self) -> PathBuf {
        self.dir.join(TRANSCRIPTS_DIR).join(TRANSCRIPT_FILE)
    }
}

pub struct SessionManager {
    app_data_dir: PathBuf,
    /// Held for the whole of each operation so writes never interleave.
    current: Mutex<Option<ActiveSession>>,
}

impl SessionManager {
    /// Open the store rooted at `app_data_dir`, creating it if needed.
    pub async fn new(app_data_dir: impl Into<PathBuf>) -> Result<Self> {
        let app_data_dir = app_data_dir.into();
        fs::create_dir_all(&app_data_dir).await?;
        tracing::debug!("Session store at {}", app_data_dir.display());

        Ok(Self {
            app_data_dir,
            current: Mutex::new(None),
        })
    }

    pub async fn from_settings(settings: &SessionSettings) -> Result<Self> {
        Self::new(sessions_dir(settings)?).await
    }

    /// Claim a fresh session directory. Creating the directory is the claim,
    /// so concurrent creators never share an id.
    async fn claim_session_dir(&self, now: DateTime<Utc>) -> Result<(String, PathBuf)> {
        let base = session_id_for(now);

        for attempt in 0..=MAX_ID_SUFFIX {
            let id = if attempt == 0 {
                base.clone()
            } else {
                format!("{}-{:03}", base, attempt)
            };
            let dir = self.app_data_dir.join(&id);

            match fs::create_dir(&dir).await {
                Ok(()) => return Ok((id, dir)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(CogniError::Internal(format!(
            "too many sessions created at {}",
            base
        )))
    }

    async fn active(&self) -> Result<ActiveSession> {
        self.current
            .lock()
            .await
            .clone()
            .ok_or(CogniError::NoActiveSession)
    }
}

async fn read_data(path: &Path) -> Result<SessionData> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Replace `session.json` via a temp file so readers never see half a write.
async fn write_data(path: &Path, data: &SessionData) -> Result<()> {
    let content = serde_json::to_string_pretty(data)?;
    let temp = path.with_extension("json.tmp");
    fs::write(&temp, content).await?;
    fs::rename(&temp, path).await?;
    Ok(())
}

/// Delete every entry directly under `dir`.
async fn clear_dir(dir: &Path) -> Result<()> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(dir).await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_dir() {
            fs::remove_dir_all(&path).await?;
        } else {
            fs::remove_file(&path).await?;
        }
    }
    Ok(())
}

#[async_trait]
impl SessionStore for SessionManager {
    async fn create_new_session(&self) -> Result<String> {
        let mut current = self.current.lock().await;

        let now = Utc::now();
        let (id, dir) = self.claim_session_dir(now).await?;
        fs::create_dir_all(dir.join(FILES_DIR)).await?;
        fs::create_dir_all(dir.join(TRANSCRIPTS_DIR)).await?;

        let data = SessionData::new(
            id.clone(),
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        write_data(&dir.join(SESSION_FILE), &data).await?;

        tracing::info!("Created session {}", id);
        *current = Some(ActiveSession { id: id.clone(), dir });
        Ok(id)
    }

    async fn open_session(&self, session_id: &str) -> Result<SessionData> {
        if !is_session_id(session_id) {
            return Err(CogniError::InvalidRequest(format!(
                "not a session id: {}",
                session_id
            )));
        }

        let mut current = self.current.lock().await;
        let dir = self.app_data_dir.join(session_id);
        let data = match read_data(&dir.join(SESSION_FILE)).await {
            Ok(data) => data,
            Err(CogniError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(CogniError::SessionNotFound(session_id.to_string()));
            }
            Err(e) => return Err(e),
        };

        fs::create_dir_all(dir.join(FILES_DIR)).await?;
        fs::create_dir_all(dir.join(TRANSCRIPTS_DIR)).await?;

        tracing::debug!("Opened session {}", session_id);
        *current = Some(ActiveSession {
            id: session_id.to_string(),
            dir,
        });
        Ok(data)
    }

    async fn load_session_data(&self) -> Option<SessionData> {
        let session = self.current.lock().await.clone()?;
        match read_data(&session.data_path()).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Failed to load session {}: {}", session.id, e);
                None
            }
        }
    }

    async fn update_notes(&self, notes: &str) -> Result<()> {
        let current = self.current.lock().await;
        let session = current.as_ref().ok_or(CogniError::NoActiveSession)?;

        let path = session.data_path();
        let mut data = read_data(&path).await?;
        data.notes = notes.to_string();
        write_data(&path, &data).await?;

        tracing::debug!("Updated notes for {} ({} bytes)", session.id, notes.len());
        Ok(())
    }

    async fn add_uploaded_file(&self, source: &Path) -> Result<PathBuf> {
        let current = self.current.lock().await;
        let session = current.as_ref().ok_or(CogniError::NoActiveSession)?;

        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CogniError::InvalidRequest(format!("no file name in {}", source.display()))
            })?;

        let destination = session.files_dir().join(&name);
        fs::copy(source, &destination).await?;

        let path = session.data_path();
        let mut data = read_data(&path).await?;
        data.uploaded_files.push(UploadedFile {
            name: name.clone(),
            path: destination.clone(),
            original_path: source.to_path_buf(),
        });
        write_data(&path, &data).await?;

        tracing::info!("Uploaded {} to session {}", name, session.id);
        Ok(destination)
    }

    async fn remove_uploaded_file(&self, name: &str) -> Result<()> {
        let current = self.current.lock().await;
        let session = current.as_ref().ok_or(CogniError::NoActiveSession)?;

        let path = session.data_path();
        let mut data = read_data(&path).await?;
        let Some(removed) = data.remove_file(name) else {
            tracing::debug!("No uploaded file named {} in {}", name, session.id);
            return Ok(());
        };

        match fs::remove_file(&removed.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Uploaded file already gone: {}", removed.path.display());
            }
            Err(e) => return Err(e.into()),
        }
        write_data(&path, &data).await?;

        tracing::info!("Removed {} from session {}", name, session.id);
        Ok(())
    }

    async fn save_meeting_transcript(&self, text: &str) -> Result<PathBuf> {
        let current = self.current.lock().await;
        let session = current.as_ref().ok_or(CogniError::NoActiveSession)?;

        let transcript = session.transcript_path();
        if let Some(parent) = transcript.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&transcript, text).await?;

        let path = session.data_path();
        let mut data = read_data(&path).await?;
        data.meeting_transcript = Some(text.to_string());
        write_data(&path, &data).await?;

        tracing::debug!("Saved transcript for {}", session.id);
        Ok(transcript)
    }

    async fn read_meeting_transcript(&self) -> Option<String> {
        let session = self.current.lock().await.clone()?;
        fs::read_to_string(session.transcript_path()).await.ok()
    }

    async fn cleanup_session(&self) -> Result<()> {
        let current = self.current.lock().await;
        let Some(session) = current.as_ref() else {
            tracing::debug!("No active session to clean up");
            return Ok(());
        };

        clear_dir(&session.files_dir()).await?;

        let path = session.data_path();
        let mut data = read_data(&path).await?;
        data.notes.clear();
        data.uploaded_files.clear();
        write_data(&path, &data).await?;

        tracing::info!("Cleaned up session {}", session.id);
        Ok(())
    }

    async fn get_all_sessions(&self) -> Vec<String> {
        let mut entries = match fs::read_dir(&self.app_data_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to list sessions: {}", e);
                return Vec::new();
            }
        };

        let mut sessions = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if is_dir && name.starts_with(SESSION_PREFIX) {
                        sessions.push(name);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to list sessions: {}", e);
                    return Vec::new();
                }
            }
        }

        sessions.sort_unstable_by(|a, b| b.cmp(a));
        sessions
    }

    async fn current_session_id(&self) -> Option<String> {
        self.current.lock().await.as_ref().map(|s| s.id.clone())
    }

    async fn current_session_dir(&self) -> Option<PathBuf> {
        self.active().await.ok().map(|s| s.dir)
    }

    fn app_data_dir(&self) -> &Path {
        &self.app_data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    async fn manager() -> (TempDir, SessionManager) {
        let temp = TempDir::new().unwrap();
        let manager = SessionManager::new(temp.path().join("cogni-sessions"))
            .await
            .unwrap();
        (temp, manager)
    }

    #[test]
    fn test_session_id_format() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 30).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(session_id_for(at), "session-2026-10-19T08-15-30-123Z");
    }

    #[test]
    fn test_is_session_id() {
        assert!(is_session_id("session-2026-10-19T08-15-30-123Z"));
        assert!(!is_session_id("session-"));
        assert!(!is_session_id("notes"));
        assert!(!is_session_id("session-../etc"));
        assert!(!is_session_id("session-a/b"));
    }

    #[test]
    fn test_sessions_dir_uses_root_override() {
        let settings = SessionSettings {
            root: Some("/tmp/cogni-root".to_string()),
            namespace: "ns".to_string(),
        };
        assert_eq!(sessions_dir(&settings).unwrap(), PathBuf::from("/tmp/cogni-root/ns"));
    }

    #[tokio::test]
    async fn test_create_session_layout() {
        let (_temp, manager) = manager().await;
        let id = manager.create_new_session().await.unwrap();
        let dir = manager.current_session_dir().await.unwrap();

        assert!(dir.ends_with(&id));
        assert!(dir.join(FILES_DIR).is_dir());
        assert!(dir.join(TRANSCRIPTS_DIR).is_dir());

        let raw = std::fs::read_to_string(dir.join(SESSION_FILE)).unwrap();
        assert!(raw.contains("\n  \"sessionId\""), "pretty-printed: {}", raw);
        assert!(!dir.join("session.json.tmp").exists());

        let data = manager.load_session_data().await.unwrap();
        assert_eq!(data.session_id, id);
        assert!(data.notes.is_empty());
        assert_eq!(manager.current_session_id().await, Some(id));
    }

    #[tokio::test]
    async fn test_same_millisecond_sessions_get_suffix() {
        let (_temp, manager) = manager().await;
        let now = Utc::now();
        let (first, _) = manager.claim_session_dir(now).await.unwrap();
        let (second, _) = manager.claim_session_dir(now).await.unwrap();
        let (third, _) = manager.claim_session_dir(now).await.unwrap();

        assert_eq!(second, format!("{}-001", first));
        assert_eq!(third, format!("{}-002", first));
    }

    #[tokio::test]
    async fn test_write_paths_require_session() {
        let (_temp, manager) = manager().await;
        assert!(matches!(
            manager.update_notes("x").await,
            Err(CogniError::NoActiveSession)
        ));
        assert!(matches!(
            manager.save_meeting_transcript("x").await,
            Err(CogniError::NoActiveSession)
        ));
        assert!(manager.load_session_data().await.is_none());
        // Cleanup without a session is a no-op
        manager.cleanup_session().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_session_file_loads_as_none() {
        let (_temp, manager) = manager().await;
        manager.create_new_session().await.unwrap();
        let dir = manager.current_session_dir().await.unwrap();
        std::fs::write(dir.join(SESSION_FILE), "{not json").unwrap();

        assert!(manager.load_session_data().await.is_none());
    }

    #[tokio::test]
    async fn test_upload_same_name_appends_record() {
        let (temp, manager) = manager().await;
        manager.create_new_session().await.unwrap();

        std::fs::create_dir_all(temp.path().join("a")).unwrap();
        std::fs::create_dir_all(temp.path().join("b")).unwrap();
        let first = temp.path().join("a").join("notes.txt");
        let second = temp.path().join("b").join("notes.txt");
        std::fs::write(&first, "v1").unwrap();
        std::fs::write(&second, "v2").unwrap();

        manager.add_uploaded_file(&first).await.unwrap();
        let dest = manager.add_uploaded_file(&second).await.unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "v2");
        let data = manager.load_session_data().await.unwrap();
        assert_eq!(data.uploaded_files.len(), 2);
        assert_eq!(data.uploaded_files[0].original_path, first);
        assert_eq!(data.uploaded_files[1].original_path, second);
        assert_eq!(data.uploaded_files[0].path, data.uploaded_files[1].path);
    }

    #[tokio::test]
    async fn test_upload_missing_source_fails() {
        let (temp, manager) = manager().await;
        manager.create_new_session().await.unwrap();
        let result = manager
            .add_uploaded_file(&temp.path().join("missing.pdf"))
            .await;
        assert!(matches!(result, Err(CogniError::Io(_))));
        assert!(manager.load_session_data().await.unwrap().uploaded_files.is_empty());
    }

    #[tokio::test]
    async fn test_transcript_round_trip() {
        let (_temp, manager) = manager().await;
        manager.create_new_session().await.unwrap();

        let path = manager.save_meeting_transcript("first").await.unwrap();
        manager.save_meeting_transcript("second").await.unwrap();

        assert!(path.ends_with("transcripts/meeting-transcript.txt"));
        assert_eq!(manager.read_meeting_transcript().await.as_deref(), Some("second"));
        assert_eq!(
            manager.load_session_data().await.unwrap().meeting_transcript.as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_open_session() {
        let (_temp, manager) = manager().await;
        let id = manager.create_new_session().await.unwrap();
        manager.update_notes("kept").await.unwrap();
        manager.create_new_session().await.unwrap();

        let data = manager.open_session(&id).await.unwrap();
        assert_eq!(data.notes, "kept");
        assert_eq!(manager.current_session_id().await, Some(id));

        assert!(matches!(
            manager.open_session("session-missing").await,
            Err(CogniError::SessionNotFound(_))
        ));
        assert!(matches!(
            manager.open_session("../escape").await,
            Err(CogniError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_get_all_sessions_filters_and_sorts() {
        let (_temp, manager) = manager().await;
        let root = manager.app_data_dir().to_path_buf();
        std::fs::create_dir(root.join("session-2024-01-01T00-00-00-000Z")).unwrap();
        std::fs::create_dir(root.join("session-2025-01-01T00-00-00-000Z")).unwrap();
        std::fs::create_dir(root.join("other")).unwrap();
        std::fs::write(root.join("session-file.txt"), "").unwrap();

        assert_eq!(
            manager.get_all_sessions().await,
            vec![
                "session-2025-01-01T00-00-00-000Z".to_string(),
                "session-2024-01-01T00-00-00-000Z".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_all_sessions_missing_root_is_empty() {
        let (_temp, manager) = manager().await;
        std::fs::remove_dir_all(manager.app_data_dir()).unwrap();
        assert!(manager.get_all_sessions().await.is_empty());
    }
}
