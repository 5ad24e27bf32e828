//! Configuration file loading for mock-exam
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `MOCK_EXAM_*` (`MOCK_EXAM_API__MODEL`, ...)
//! 2. `--config <path>` specified file
//! 3. Credential file: `<data_dir>/config.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/mock-exam/config.toml`
//! 5. Default values

mod credentials;
mod file_config;
mod loader;

pub use credentials::{ApiCredentials, CredentialStore};
pub use file_config::{
    ConfigValidationError, FileApiConfig, FileConfig, FileSessionConfig, FileStorageConfig,
};
pub use loader::{ConfigError, ConfigLoader};
