//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig, FileStorageConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENV_PREFIX: &str = "MOCK_EXAM_";

/// Errors from loading or persisting configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed credential file: {0}")]
    Credentials(String),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `MOCK_EXAM_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. `<data_dir>/config.toml` credential file
    /// 4. XDG config: `$XDG_CONFIG_HOME/mock-exam/config.toml`
    /// 5. Default values
    ///
    /// `data_dir` (from `--data-dir`) wins over every source.
    pub fn load(
        config_path: Option<&PathBuf>,
        data_dir: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        // The credential file lives under data_dir, which may itself be
        // configured, so resolve storage first.
        let storage: FileStorageConfig = Self::figment(config_path, None, data_dir)
            .extract_inner("storage")
            .map_err(Box::new)?;

        let config: FileConfig = Self::figment(
            config_path,
            Some(&storage.credential_path()),
            data_dir,
        )
        .extract()
        .map_err(Box::new)?;

        config.validate()?;
        Ok(config)
    }

    fn figment(
        config_path: Option<&PathBuf>,
        credential_path: Option<&Path>,
        data_dir: Option<&Path>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        // Add global config (XDG or fallback)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = credential_path {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(dir) = data_dir {
            figment = figment.merge(Serialized::default("storage.data_dir", dir));
        }
        figment
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/mock-exam/config.toml if set,
    /// otherwise falls back to ~/.config/mock-exam/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mock-exam").join("config.toml"))
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config: &FileConfig, config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = config_path {
            println!("  [FOUND] Explicit:    {}", path.display());
        }

        let credential_path = config.storage.credential_path();
        if credential_path.exists() {
            println!("  [FOUND] Credentials: {}", credential_path.display());
        } else {
            println!("  [     ] Credentials: {}", credential_path.display());
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:      {}", path.display());
            } else {
                println!("  [     ] Global:      {}", path.display());
            }
        }

        println!("  [     ] Default:     built-in defaults");
    }
}
