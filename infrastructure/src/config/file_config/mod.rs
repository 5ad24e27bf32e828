//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod api;
mod session;
mod storage;

pub use api::FileApiConfig;
pub use session::FileSessionConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("api.timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("api.temperature must be between 0.0 and 2.0 (got {0})")]
    InvalidTemperature(f32),

    #[error("api.model cannot be empty")]
    EmptyModelName,

    #[error("api.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("session.narration_language cannot be empty")]
    EmptyNarrationLanguage,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation service settings
    pub api: FileApiConfig,
    /// Session behavior
    pub session: FileSessionConfig,
    /// Where exams, logs and credentials live
    pub storage: FileStorageConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.api.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.api.temperature,
            ));
        }
        if self.api.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.session.narration_language.trim().is_empty() {
            return Err(ConfigValidationError::EmptyNarrationLanguage);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
api_key = "sk-test"
base_url = "https://api.deepseek.com/v1"
model = "deepseek-chat"
temperature = 0.5
timeout_secs = 60

[session]
narration_language = "en"
narration = false

[storage]
data_dir = "/tmp/exams"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.api.base_url, "https://api.deepseek.com/v1");
        assert_eq!(config.api.model, "deepseek-chat");
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.session.narration_language, "en");
        assert!(!config.session.narration);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/exams"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[api]
model = "gpt-4o"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.model, "gpt-4o");
        // Defaults should apply
        assert!(config.api.api_key.is_none());
        assert_eq!(config.api.timeout_secs, 180);
        assert!(config.session.narration);
        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config: FileConfig = toml::from_str("[api]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_temperature_range() {
        let config: FileConfig = toml::from_str("[api]\ntemperature = 3.5\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn test_validate_empty_model_name() {
        let config: FileConfig = toml::from_str("[api]\nmodel = \"  \"\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }
}
