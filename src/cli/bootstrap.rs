//! CLI bootstrap - load settings and open the session store.
//!
//! `CliContext` is the CLI's counterpart of the Tauri `AppState`, limited to
//! what runs without a window.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::session::{sessions_dir, SessionManager, SessionStore};
use crate::settings::SettingsManager;

use super::args::Args;

pub struct CliContext {
    pub settings_manager: Arc<SettingsManager>,
    pub sessions: Arc<dyn SessionStore>,
    pub args: Args,
}

/// Set up logging on stderr, then load settings and the session store.
pub async fn initialize(args: Args) -> Result<CliContext> {
    init_tracing(args.verbose);

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env loaded: {}", e);
    }

    let settings_manager = Arc::new(
        SettingsManager::new()
            .await
            .context("Failed to load settings")?,
    );
    let settings = settings_manager.get().await;

    let root = match &args.root {
        Some(root) => root.clone(),
        None => sessions_dir(&settings.sessions)?,
    };
    let sessions = SessionManager::new(&root)
        .await
        .with_context(|| format!("Failed to open session store at {}", root.display()))?;

    tracing::debug!("Using session store at {}", root.display());

    Ok(CliContext {
        settings_manager,
        sessions: Arc::new(sessions),
        args,
    })
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "cogni_lib=debug" } else { "cogni_lib=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
