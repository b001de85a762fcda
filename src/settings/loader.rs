//! `<config_dir>/cogni/settings.toml`: loading with `$VAR` / `${VAR}`
//! interpolation, first-run template, and partial updates from the UI
//! merged and written back atomically.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::RwLock;

use super::schema::CogniSettings;

/// Embedded template for first-run generation.
const TEMPLATE: &str = include_str!("template.toml");

/// Get the path to the global settings file.
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cogni")
        .join("settings.toml")
}

/// Manages settings loading, interpolation, and persistence.
pub struct SettingsManager {
    /// Cached settings (with env vars resolved)
    settings: RwLock<CogniSettings>,

    /// Path to the settings file
    path: PathBuf,
}

impl SettingsManager {
    /// Create a new SettingsManager, loading from disk if available.
    pub async fn new() -> Result<Self> {
        Self::with_path(settings_path()).await
    }

    /// Create a SettingsManager backed by a specific file.
    pub async fn with_path(path: PathBuf) -> Result<Self> {
        let settings = Self::load_from_path(&path).await?;

        Ok(Self {
            settings: RwLock::new(settings),
            path,
        })
    }

    /// Load settings from a specific path.
    async fn load_from_path(path: &Path) -> Result<CogniSettings> {
        if !path.exists() {
            tracing::debug!("Settings file not found at {:?}, using defaults", path);
            return Ok(CogniSettings::default());
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .context("Failed to read settings file")?;

        let mut settings: CogniSettings =
            toml::from_str(&contents).context("Failed to deserialize settings")?;

        Self::resolve_env_vars(&mut settings);

        tracing::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Resolve $ENV_VAR references in string fields.
    fn resolve_env_vars(settings: &mut CogniSettings) {
        fn resolve_opt(value: &mut Option<String>) {
            if let Some(v) = value {
                if let Some(resolved) = resolve_env_ref(v) {
                    *v = resolved;
                }
            }
        }

        resolve_opt(&mut settings.ai.api_key);
        resolve_opt(&mut settings.sessions.root);
    }

    /// Snapshot of the current settings.
    pub async fn get(&self) -> CogniSettings {
        self.settings.read().await.clone()
    }

    /// Replace the cached settings and write them back to the file.
    pub async fn update(&self, new_settings: CogniSettings) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(&new_settings).context("Failed to serialize settings")?;
        write_atomic(&self.path, &toml_string).await?;

        *self.settings.write().await = new_settings;
        tracing::info!("Saved settings to {:?}", self.path);
        Ok(())
    }

    /// Merge a partial settings object (as sent by the UI) into the current
    /// settings and persist the result.
    ///
    /// Objects merge key by key; any other value replaces what was there.
    pub async fn merge(&self, patch: serde_json::Value) -> Result<CogniSettings> {
        if !patch.is_object() {
            anyhow::bail!("Settings update must be an object");
        }

        let mut json = serde_json::to_value(self.get().await)?;
        merge_json(&mut json, patch);

        let merged: CogniSettings =
            serde_json::from_value(json).context("Settings update does not match schema")?;
        self.update(merged.clone()).await?;
        Ok(merged)
    }

    /// Write the commented template on first run. Returns `true` if a file
    /// was created.
    pub async fn ensure_settings_file(&self) -> Result<bool> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(false);
        }

        write_atomic(&self.path, TEMPLATE).await?;
        tracing::info!("Generated settings template at {:?}", self.path);
        Ok(true)
    }

    /// Re-read the file, replacing the cached settings.
    pub async fn reload(&self) -> Result<()> {
        let settings = Self::load_from_path(&self.path).await?;
        *self.settings.write().await = settings;
        Ok(())
    }
}

/// Write through a sibling temp file, then rename over `path`.
async fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("toml.tmp");
    tokio::fs::write(&temp_path, contents).await?;
    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Recursively merge `patch` into `base`.
fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Resolve a $ENV_VAR or ${ENV_VAR} reference.
///
/// Returns `Some(resolved)` if the value starts with `$` and the env var exists.
/// Returns `None` if no env var reference or env var not set.
fn resolve_env_ref(value: &str) -> Option<String> {
    let trimmed = value.trim();

    let name = trimmed.strip_prefix('$')?;
    let var_name = name
        .strip_prefix('{')
        .and_then(|n| n.strip_suffix('}'))
        .unwrap_or(name);

    std::env::var(var_name).ok()
}

/// Get a setting value with environment variable fallback.
///
/// Priority order:
/// 1. Settings value (if set and non-empty)
/// 2. Environment variable (first match from list)
/// 3. Default value
pub fn get_with_env_fallback(
    setting: &Option<String>,
    env_vars: &[&str],
    default: Option<String>,
) -> Option<String> {
    if let Some(v) = setting {
        if !v.is_empty() {
            return Some(v.clone());
        }
    }

    for env_var in env_vars {
        if let Ok(v) = std::env::var(env_var) {
            if !v.is_empty() {
                return Some(v);
            }
        }
    }

    default
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::schema::ApiProvider;
    use tempfile::TempDir;

    fn manager_at(path: PathBuf) -> SettingsManager {
        SettingsManager {
            settings: RwLock::new(CogniSettings::default()),
            path,
        }
    }

    #[test]
    fn test_resolve_env_ref_dollar_format() {
        std::env::set_var("COGNI_TEST_VAR_1", "test_value_1");

        assert_eq!(
            resolve_env_ref("$COGNI_TEST_VAR_1"),
            Some("test_value_1".to_string())
        );

        std::env::remove_var("COGNI_TEST_VAR_1");
    }

    #[test]
    fn test_resolve_env_ref_braces_format() {
        std::env::set_var("COGNI_TEST_VAR_2", "test_value_2");

        assert_eq!(
            resolve_env_ref("${COGNI_TEST_VAR_2}"),
            Some("test_value_2".to_string())
        );

        std::env::remove_var("COGNI_TEST_VAR_2");
    }

    #[test]
    fn test_resolve_env_ref_no_match() {
        assert_eq!(resolve_env_ref("regular_value"), None);
        assert_eq!(resolve_env_ref("$NONEXISTENT_VAR_XYZ_12345"), None);
    }

    #[test]
    fn test_get_with_env_fallback_from_setting() {
        let setting = Some("from_settings".to_string());
        let result = get_with_env_fallback(&setting, &["SOME_VAR"], None);
        assert_eq!(result, Some("from_settings".to_string()));
    }

    #[test]
    fn test_get_with_env_fallback_empty_setting() {
        std::env::set_var("COGNI_EMPTY_SETTING_TEST", "from_env");

        let setting = Some("".to_string());
        let result = get_with_env_fallback(&setting, &["COGNI_EMPTY_SETTING_TEST"], None);
        assert_eq!(result, Some("from_env".to_string()));

        std::env::remove_var("COGNI_EMPTY_SETTING_TEST");
    }

    #[test]
    fn test_get_with_env_fallback_default() {
        let result = get_with_env_fallback(
            &None,
            &["NONEXISTENT_VAR_ABC"],
            Some("default_value".to_string()),
        );
        assert_eq!(result, Some("default_value".to_string()));
    }

    #[test]
    fn test_merge_json_is_deep() {
        let mut base = serde_json::json!({"ai": {"provider": "openai", "language": "python"}});
        merge_json(&mut base, serde_json::json!({"ai": {"language": "rust"}}));
        assert_eq!(base["ai"]["provider"], "openai");
        assert_eq!(base["ai"]["language"], "rust");
    }

    #[tokio::test]
    async fn test_merge_persists_partial_update() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cogni").join("settings.toml");
        let manager = manager_at(path.clone());

        let merged = manager
            .merge(serde_json::json!({"ai": {"provider": "gemini"}, "ui": {"opacity": 0.5}}))
            .await
            .unwrap();
        assert_eq!(merged.ai.provider, ApiProvider::Gemini);
        assert_eq!(merged.ui.opacity, 0.5);

        // A fresh manager sees the persisted values
        let reloaded = SettingsManager::with_path(path).await.unwrap();
        let settings = reloaded.get().await;
        assert_eq!(settings.ui.opacity, 0.5);
        assert_eq!(settings.window.move_step, 60.0);
    }

    #[tokio::test]
    async fn test_merge_rejects_bad_values() {
        let temp = TempDir::new().unwrap();
        let manager = manager_at(temp.path().join("settings.toml"));

        assert!(manager
            .merge(serde_json::json!({"ai": {"provider": "nope"}}))
            .await
            .is_err());
        assert!(manager.merge(serde_json::json!(42)).await.is_err());
        assert!(!temp.path().join("settings.toml").exists());
    }

    #[tokio::test]
    async fn test_ensure_settings_file_writes_template_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        let manager = manager_at(path.clone());

        assert!(manager.ensure_settings_file().await.unwrap());
        assert!(!manager.ensure_settings_file().await.unwrap());
        assert!(!path.with_extension("toml.tmp").exists());

        // The template parses back into the defaults
        let loaded = SettingsManager::with_path(path).await.unwrap();
        assert_eq!(loaded.get().await, CogniSettings::default());
    }
}
