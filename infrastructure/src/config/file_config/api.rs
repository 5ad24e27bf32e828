//! Generation service configuration from TOML (`[api]` section)

use crate::config::credentials::ApiCredentials;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI-compatible API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// API key. Usually written by the first-run prompt into the credential file.
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            timeout_secs: 180,
        }
    }
}

impl FileApiConfig {
    /// Resolved credentials, or `None` when no usable API key is configured.
    pub fn credentials(&self) -> Option<ApiCredentials> {
        let api_key = self.api_key.as_deref().map(str::trim).unwrap_or_default();
        if api_key.is_empty() {
            return None;
        }
        Some(ApiCredentials {
            api_key: api_key.to_string(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_key() {
        let mut config = FileApiConfig::default();
        assert!(config.credentials().is_none());

        config.api_key = Some("   ".to_string());
        assert!(config.credentials().is_none());

        config.api_key = Some(" sk-abc ".to_string());
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.api_key, "sk-abc");
        assert_eq!(credentials.base_url, DEFAULT_BASE_URL);
        assert_eq!(credentials.model, DEFAULT_MODEL);
    }
}
