use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A file copied into the session's `files/` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    /// Location of the copy inside the session.
    pub path: PathBuf,
    /// Where the user picked the file from.
    pub original_path: PathBuf,
}

/// Contents of `session.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub session_id: String,
    pub timestamp: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_transcript: Option<String>,
}

impl SessionData {
    pub fn new(session_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: timestamp.into(),
            notes: String::new(),
            uploaded_files: Vec::new(),
            meeting_transcript: None,
        }
    }

    /// Drop the first record named `name`.
    pub fn remove_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.uploaded_files.iter().position(|f| f.name == name)?;
        Some(self.uploaded_files.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, from: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            path: PathBuf::from("/s/files").join(name),
            original_path: PathBuf::from(from).join(name),
        }
    }

    #[test]
    fn test_serializes_camel_case_without_transcript() {
        let mut data = SessionData::new("session-a", "2026-01-01T00:00:00.000Z");
        data.uploaded_files.push(file("brief.pdf", "/home/u"));

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["sessionId"], "session-a");
        assert_eq!(json["uploadedFiles"][0]["originalPath"], "/home/u/brief.pdf");
        assert!(json.get("meetingTranscript").is_none());

        data.meeting_transcript = Some("hi".to_string());
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["meetingTranscript"], "hi");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let data: SessionData =
            serde_json::from_str(r#"{"sessionId":"session-a","timestamp":"t"}"#).unwrap();
        assert!(data.notes.is_empty());
        assert!(data.uploaded_files.is_empty());
        assert_eq!(data.meeting_transcript, None);
    }

    #[test]
    fn test_remove_file_takes_first_of_duplicates() {
        let mut data = SessionData::new("session-a", "t");
        data.uploaded_files.push(file("a.txt", "/one"));
        data.uploaded_files.push(file("b.txt", "/one"));
        data.uploaded_files.push(file("a.txt", "/two"));

        let removed = data.remove_file("a.txt").unwrap();
        assert_eq!(removed.original_path, PathBuf::from("/one/a.txt"));
        assert_eq!(data.uploaded_files.len(), 2);
        assert_eq!(data.uploaded_files[1].original_path, PathBuf::from("/two/a.txt"));
    }

    #[test]
    fn test_remove_file_unknown_is_none() {
        let mut data = SessionData::new("session-a", "t");
        data.uploaded_files.push(file("a.txt", "/one"));
        assert!(data.remove_file("missing").is_none());
        assert_eq!(data.uploaded_files.len(), 1);
        assert!(data.remove_file("a.txt").is_some());
        assert!(data.uploaded_files.is_empty());
    }
}
