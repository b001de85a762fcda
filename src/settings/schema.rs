//! Settings schema definitions for Cogni configuration.
//!
//! All settings structs use `#[serde(default)]` to allow partial configuration files.
//! Missing fields are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Root settings structure for Cogni.
///
/// Loaded from `<config_dir>/cogni/settings.toml` with environment variable
/// interpolation support. Version field enables future migrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CogniSettings {
    /// Schema version for migrations
    pub version: u32,

    /// AI provider configuration
    pub ai: AiSettings,

    /// Overlay appearance
    pub ui: UiSettings,

    /// Overlay window behavior
    pub window: WindowSettings,

    /// Global shortcut accelerators
    pub shortcuts: ShortcutSettings,

    /// Session storage
    pub sessions: SessionSettings,
}

/// Supported AI providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    Openai,
    Gemini,
}

impl ApiProvider {
    /// Conventional environment variable holding this provider's key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ApiProvider::Openai => "OPENAI_API_KEY",
            ApiProvider::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// AI provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub provider: ApiProvider,

    /// API key (supports $ENV_VAR syntax)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used to extract the problem from captures
    pub extraction_model: String,

    /// Model used to produce suggestions
    pub solution_model: String,

    /// Model used for follow-up debugging
    pub debugging_model: String,

    /// Preferred answer language
    pub language: String,
}

/// Overlay appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Window opacity applied at startup (0.0 - 1.0). At or below 0.1 the
    /// overlay starts hidden.
    pub opacity: f64,
}

/// Overlay window behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Cover the whole work area; content-driven resizing is disabled.
    pub full_screen_overlay: bool,

    /// Pixels moved per move-window shortcut
    pub move_step: f64,

    /// Delay before opacity is restored after showing the window
    pub reveal_delay_ms: u64,
}

/// Global shortcut accelerators, one per action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutSettings {
    pub toggle_window: String,
    pub toggle_edit_mode: String,
    pub exit_edit_mode: String,
    pub move_left: String,
    pub move_right: String,
    pub move_up: String,
    pub move_down: String,
    pub take_screenshot: String,
}

/// Session storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Root directory override (defaults to the platform data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Directory under the root that holds `session-*` folders
    pub namespace: String,
}

// =============================================================================
// Default implementations
// =============================================================================

impl Default for CogniSettings {
    fn default() -> Self {
        Self {
            version: 1,
            ai: AiSettings::default(),
            ui: UiSettings::default(),
            window: WindowSettings::default(),
            shortcuts: ShortcutSettings::default(),
            sessions: SessionSettings::default(),
        }
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: ApiProvider::Openai,
            api_key: None,
            extraction_model: "gpt-4o".to_string(),
            solution_model: "gpt-4o".to_string(),
            debugging_model: "gpt-4o".to_string(),
            language: "python".to_string(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            full_screen_overlay: true,
            move_step: 60.0,
            reveal_delay_ms: 100,
        }
    }
}

impl Default for ShortcutSettings {
    fn default() -> Self {
        Self {
            toggle_window: "CommandOrControl+B".to_string(),
            toggle_edit_mode: "CommandOrControl+E".to_string(),
            exit_edit_mode: "Escape".to_string(),
            move_left: "CommandOrControl+Left".to_string(),
            move_right: "CommandOrControl+Right".to_string(),
            move_up: "CommandOrControl+Up".to_string(),
            move_down: "CommandOrControl+Down".to_string(),
            take_screenshot: "CommandOrControl+H".to_string(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            root: None,
            namespace: "cogni-sessions".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CogniSettings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.ai.provider, ApiProvider::Openai);
        assert_eq!(settings.ui.opacity, 1.0);
        assert!(settings.window.full_screen_overlay);
        assert_eq!(settings.window.move_step, 60.0);
        assert_eq!(settings.sessions.namespace, "cogni-sessions");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml = r#"
            version = 1
            [ai]
            provider = "gemini"
        "#;

        let settings: CogniSettings = toml::from_str(toml).unwrap();
        assert_eq!(settings.ai.provider, ApiProvider::Gemini);
        // Defaults should fill in missing fields
        assert_eq!(settings.window.reveal_delay_ms, 100);
        assert_eq!(settings.shortcuts.exit_edit_mode, "Escape");
    }

    #[test]
    fn test_serialize_settings() {
        let settings = CogniSettings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains("[shortcuts]"));
        assert!(!toml_str.contains("api_key"));
    }
}
