//! CLI output rendering: plain text on a terminal, JSON otherwise.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::session::SessionData;

/// Result of one CLI command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Output {
    Sessions { sessions: Vec<String> },
    Created { session_id: String },
    Session { data: SessionData },
    Transcript { session_id: String, text: Option<String> },
    Paths { session_id: String, paths: Vec<PathBuf> },
    Done { session_id: String, message: String },
}

/// JSON when asked for, or when stdout is piped.
pub fn use_json(requested: bool) -> bool {
    requested || !atty::is(atty::Stream::Stdout)
}

pub fn print(output: &Output, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", serde_json::to_string(output)?)?;
    } else {
        write_text(&mut out, output)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_text(out: &mut impl Write, output: &Output) -> Result<()> {
    match output {
        Output::Sessions { sessions } => {
            if sessions.is_empty() {
                writeln!(out, "No sessions")?;
            }
            for id in sessions {
                writeln!(out, "{}", id)?;
            }
        }
        Output::Created { session_id } => writeln!(out, "Created {}", session_id)?,
        Output::Session { data } => {
            writeln!(out, "Session:  {}", data.session_id)?;
            writeln!(out, "Created:  {}", data.timestamp)?;
            writeln!(out, "Files:    {}", data.uploaded_files.len())?;
            for file in &data.uploaded_files {
                writeln!(out, "  - {} ({})", file.name, file.original_path.display())?;
            }
            let transcript = if data.meeting_transcript.is_some() { "yes" } else { "no" };
            writeln!(out, "Transcript: {}", transcript)?;
            if !data.notes.is_empty() {
                writeln!(out, "\n{}", data.notes)?;
            }
        }
        Output::Transcript { session_id, text } => match text {
            Some(text) => writeln!(out, "{}", text)?,
            None => writeln!(out, "No transcript in {}", session_id)?,
        },
        Output::Paths { paths, .. } => {
            for path in paths {
                writeln!(out, "{}", path.display())?;
            }
        }
        Output::Done { message, .. } => writeln!(out, "{}", message)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(output: &Output) -> String {
        let mut buf = Vec::new();
        write_text(&mut buf, output).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_sessions() {
        assert_eq!(render(&Output::Sessions { sessions: vec![] }), "No sessions\n");
        assert_eq!(
            render(&Output::Sessions {
                sessions: vec!["session-b".into(), "session-a".into()]
            }),
            "session-b\nsession-a\n"
        );
    }

    #[test]
    fn test_text_session_includes_notes() {
        let mut data = SessionData::new("session-a", "2026-01-01T00:00:00.000Z");
        data.notes = "remember".to_string();
        let text = render(&Output::Session { data });
        assert!(text.starts_with("Session:  session-a\n"));
        assert!(text.contains("Transcript: no"));
        assert!(text.ends_with("\nremember\n"));
    }

    #[test]
    fn test_json_is_tagged() {
        let json = serde_json::to_value(Output::Created {
            session_id: "session-a".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "created", "session_id": "session-a"}));
    }
}
