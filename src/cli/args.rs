//! CLI argument parsing using clap.
//!
//! Defines the command-line interface for cogni-cli.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cogni CLI - inspect and edit overlay sessions without the GUI
#[derive(Parser, Debug, Clone)]
#[command(name = "cogni-cli")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory holding the `session-*` folders (default: from settings)
    #[arg(long, env = "COGNI_SESSIONS_DIR")]
    pub root: Option<PathBuf>,

    /// Output results as JSON (default when stdout is not a terminal)
    #[arg(long)]
    pub json: bool,

    /// Show verbose output (debug information)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List sessions, newest first
    List,

    /// Start a new empty session
    Create,

    /// Print a session's data
    Show {
        /// Session id (default: newest)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Replace a session's notes
    Notes {
        text: String,
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Copy files into a session
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Remove an uploaded file by name
    Remove {
        name: String,
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Print the meeting transcript, or replace it with --text / --file
    Transcript {
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Delete uploads and notes, keeping the transcript
    Cleanup {
        #[arg(short, long)]
        session: Option<String>,
    },
}

impl Command {
    /// Session the command targets, if one was named.
    pub fn session(&self) -> Option<&str> {
        match self {
            Command::List | Command::Create => None,
            Command::Show { session }
            | Command::Notes { session, .. }
            | Command::Upload { session, .. }
            | Command::Remove { session, .. }
            | Command::Transcript { session, .. }
            | Command::Cleanup { session } => session.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["cogni-cli", "list"]);
        assert_eq!(args.command, Command::List);
        assert!(!args.json);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_upload_files() {
        let args = Args::parse_from(["cogni-cli", "upload", "a.pdf", "b.txt", "-s", "session-x"]);
        assert_eq!(
            args.command,
            Command::Upload {
                files: vec![PathBuf::from("a.pdf"), PathBuf::from("b.txt")],
                session: Some("session-x".to_string()),
            }
        );
        assert_eq!(args.command.session(), Some("session-x"));
    }

    #[test]
    fn test_args_upload_requires_files() {
        assert!(Args::try_parse_from(["cogni-cli", "upload"]).is_err());
    }

    #[test]
    fn test_args_transcript_text_conflicts_with_file() {
        assert!(Args::try_parse_from([
            "cogni-cli",
            "transcript",
            "--text",
            "hi",
            "--file",
            "t.txt"
        ])
        .is_err());
    }

    #[test]
    fn test_args_root_and_json() {
        let args = Args::parse_from(["cogni-cli", "--root", "/tmp/s", "--json", "show"]);
        assert_eq!(args.root, Some(PathBuf::from("/tmp/s")));
        assert!(args.json);
        assert_eq!(args.command, Command::Show { session: None });
    }
}
