//! CLI execution runner.
//!
//! Each subcommand opens its target session (named, or the newest) and runs
//! the matching session operation.

use anyhow::{Context, Result};

use crate::session::SessionStore;

use super::args::Command;
use super::bootstrap::CliContext;
use super::output::Output;

/// Run the parsed subcommand against the context's session store.
pub async fn execute(ctx: &CliContext) -> Result<Output> {
    run_command(ctx.sessions.as_ref(), &ctx.args.command).await
}

pub async fn run_command(store: &dyn SessionStore, command: &Command) -> Result<Output> {
    match command {
        Command::List => Ok(Output::Sessions {
            sessions: store.get_all_sessions().await,
        }),

        Command::Create => {
            let session_id = store.create_new_session().await?;
            Ok(Output::Created { session_id })
        }

        Command::Show { session } => {
            let session_id = open(store, session.as_deref()).await?;
            let data = store
                .load_session_data()
                .await
                .with_context(|| format!("Session {} has no readable data", session_id))?;
            Ok(Output::Session { data })
        }

        Command::Notes { text, session } => {
            let session_id = open(store, session.as_deref()).await?;
            store.update_notes(text).await?;
            Ok(Output::Done {
                session_id,
                message: "Notes updated".to_string(),
            })
        }

        Command::Upload { files, session } => {
            let session_id = open(store, session.as_deref()).await?;
            let mut paths = Vec::with_capacity(files.len());
            for file in files {
                let copied = store
                    .add_uploaded_file(file)
                    .await
                    .with_context(|| format!("Failed to upload {}", file.display()))?;
                paths.push(copied);
            }
            Ok(Output::Paths { session_id, paths })
        }

        Command::Remove { name, session } => {
            let session_id = open(store, session.as_deref()).await?;
            store.remove_uploaded_file(name).await?;
            Ok(Output::Done {
                session_id,
                message: format!("Removed {}", name),
            })
        }

        Command::Transcript {
            text,
            file,
            session,
        } => {
            let session_id = open(store, session.as_deref()).await?;
            let replacement = match (text, file) {
                (Some(text), _) => Some(text.clone()),
                (None, Some(file)) => Some(
                    tokio::fs::read_to_string(file)
                        .await
                        .with_context(|| format!("Failed to read {}", file.display()))?,
                ),
                (None, None) => None,
            };

            match replacement {
                Some(text) => {
                    let path = store.save_meeting_transcript(&text).await?;
                    Ok(Output::Paths {
                        session_id,
                        paths: vec![path],
                    })
                }
                None => Ok(Output::Transcript {
                    text: store.read_meeting_transcript().await,
                    session_id,
                }),
            }
        }

        Command::Cleanup { session } => {
            let session_id = open(store, session.as_deref()).await?;
            store.cleanup_session().await?;
            Ok(Output::Done {
                session_id,
                message: "Session cleaned up".to_string(),
            })
        }
    }
}

/// Open the named session, or the newest one.
async fn open(store: &dyn SessionStore, session: Option<&str>) -> Result<String> {
    let session_id = match session {
        Some(id) => id.to_string(),
        None => store
            .get_all_sessions()
            .await
            .into_iter()
            .next()
            .context("No sessions found; run `cogni-cli create` first")?,
    };

    store.open_session(&session_id).await?;
    Ok(session_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionManager;
    use std::path::PathBuf;
    use tempfile::TempDir;

    async fn store(temp: &TempDir) -> SessionManager {
        SessionManager::new(temp.path().join("sessions")).await.unwrap()
    }

    #[tokio::test]
    async fn test_commands_require_a_session() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp).await;
        let err = run_command(&store, &Command::Show { session: None })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No sessions found"));
    }

    #[tokio::test]
    async fn test_create_then_edit_newest() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp).await;

        let Output::Created { session_id } = run_command(&store, &Command::Create).await.unwrap()
        else {
            panic!("expected Created");
        };

        run_command(
            &store,
            &Command::Notes {
                text: "from cli".to_string(),
                session: None,
            },
        )
        .await
        .unwrap();

        let source = temp.path().join("doc.md");
        std::fs::write(&source, "# doc").unwrap();
        let uploaded = run_command(
            &store,
            &Command::Upload {
                files: vec![source],
                session: Some(session_id.clone()),
            },
        )
        .await
        .unwrap();
        assert!(matches!(uploaded, Output::Paths { ref paths, .. } if paths.len() == 1));

        let Output::Session { data } = run_command(&store, &Command::Show { session: None })
            .await
            .unwrap()
        else {
            panic!("expected Session");
        };
        assert_eq!(data.session_id, session_id);
        assert_eq!(data.notes, "from cli");
        assert_eq!(data.uploaded_files.len(), 1);
    }

    #[tokio::test]
    async fn test_transcript_read_and_write() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp).await;
        run_command(&store, &Command::Create).await.unwrap();

        let read = |text: Option<String>, file: Option<PathBuf>| Command::Transcript {
            text,
            file,
            session: None,
        };

        let empty = run_command(&store, &read(None, None)).await.unwrap();
        assert!(matches!(empty, Output::Transcript { text: None, .. }));

        let file = temp.path().join("t.txt");
        std::fs::write(&file, "minutes").unwrap();
        run_command(&store, &read(None, Some(file))).await.unwrap();

        let saved = run_command(&store, &read(None, None)).await.unwrap();
        assert!(matches!(saved, Output::Transcript { text: Some(ref t), .. } if t == "minutes"));
    }

    #[tokio::test]
    async fn test_unknown_session_fails() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp).await;
        let result = run_command(
            &store,
            &Command::Cleanup {
                session: Some("session-nope".to_string()),
            },
        )
        .await;
        assert!(result.is_err());
    }
}
