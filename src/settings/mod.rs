//! Centralized TOML-based settings system for Cogni.
//!
//! Settings are loaded from `<config_dir>/cogni/settings.toml` with environment
//! variable interpolation support. The AI key falls back to `COGNI_API_KEY`
//! and the provider's own variable through `get_with_env_fallback`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::settings::{SettingsManager, resolve_api_key};
//!
//! let manager = SettingsManager::new().await?;
//! let settings = manager.get().await;
//! let key = resolve_api_key(&settings);
//! ```

pub mod api_key;
#[cfg(feature = "tauri")]
pub mod commands;
pub mod loader;
pub mod schema;

pub use api_key::{has_api_key, resolve_api_key, validate_api_key_format, ApiKeyValidation};
#[cfg(feature = "tauri")]
pub use commands::*;
pub use loader::{get_with_env_fallback, SettingsManager};
pub use schema::{ApiProvider, CogniSettings, ShortcutSettings, WindowSettings};
