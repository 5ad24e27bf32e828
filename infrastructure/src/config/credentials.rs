//! Credential file (`<data_dir>/config.toml`)
//!
//! Holds the `[api]` key, base URL and model entered through the menu. The
//! file is an ordinary config layer, so [`ConfigLoader`](super::ConfigLoader)
//! picks it up on the next load.

use super::loader::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything the generator needs to reach the chat-completions service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Serialize, Deserialize)]
struct CredentialFile {
    api: ApiCredentials,
}

/// Reads and writes the credential file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the stored credentials, if any.
    pub fn read(&self) -> Result<Option<ApiCredentials>, ConfigError> {
        if !self.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: CredentialFile =
            toml::from_str(&text).map_err(|e| ConfigError::Credentials(e.to_string()))?;
        Ok(Some(file.api))
    }

    /// Write (or replace) the credential file.
    pub fn write(&self, credentials: &ApiCredentials) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = toml::to_string(&CredentialFile {
            api: credentials.clone(),
        })
        .map_err(|e| ConfigError::Credentials(e.to_string()))?;
        std::fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("Wrote API credentials to {}", self.path.display());
        Ok(())
    }

    /// Remove the credential file. Returns whether a file existed.
    pub fn delete(&self) -> Result<bool, ConfigError> {
        if !self.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("Deleted API credentials at {}", self.path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> ApiCredentials {
        ApiCredentials {
            api_key: "sk-test".to_string(),
            base_url: "https://api.deepseek.com/v1".to_string(),
            model: "deepseek-chat".to_string(),
        }
    }

    #[test]
    fn test_write_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("data").join("config.toml"));
        assert!(!store.exists());
        assert_eq!(store.read().unwrap(), None);

        store.write(&credentials()).unwrap();
        assert!(store.exists());
        assert_eq!(store.read().unwrap(), Some(credentials()));

        assert!(store.delete().unwrap());
        assert!(!store.exists());
        assert!(!store.delete().unwrap());
    }

    #[test]
    fn test_file_is_an_api_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("config.toml"));
        store.write(&credentials()).unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("[api]"));
        assert!(text.contains("api_key = \"sk-test\""));
    }
}
