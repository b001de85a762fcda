//! API key lookup and local format checks.
//!
//! Keys are never sent anywhere from here; provider round-trips belong to the
//! AI client.

use serde::Serialize;

use super::loader::get_with_env_fallback;
use super::schema::{ApiProvider, CogniSettings};

const MIN_KEY_LEN: usize = 20;

/// Result of `validate_api_key`, shaped for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Resolve the active API key: settings, then `COGNI_API_KEY`, then the
/// provider's conventional variable.
pub fn resolve_api_key(settings: &CogniSettings) -> Option<String> {
    get_with_env_fallback(
        &settings.ai.api_key,
        &["COGNI_API_KEY", settings.ai.provider.env_var()],
        None,
    )
}

pub fn has_api_key(settings: &CogniSettings) -> bool {
    resolve_api_key(settings).is_some()
}

/// Check that `key` looks like a key for `provider`.
pub fn validate_api_key_format(provider: ApiProvider, key: &str) -> ApiKeyValidation {
    let invalid = |msg: &str| ApiKeyValidation {
        valid: false,
        error: Some(msg.to_string()),
    };

    let key = key.trim();
    if key.is_empty() {
        return invalid("API key is empty");
    }
    if key.chars().any(char::is_whitespace) {
        return invalid("API key must not contain whitespace");
    }
    if key.len() < MIN_KEY_LEN {
        return invalid("Invalid API key format");
    }

    let prefix_ok = match provider {
        ApiProvider::Openai => key.starts_with("sk-"),
        ApiProvider::Gemini => key.starts_with("AIza"),
    };
    if !prefix_ok {
        return invalid("Invalid API key format");
    }

    ApiKeyValidation {
        valid: true,
        error: None,
    }
}
