//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const QUESTIONS_DIR: &str = "questions";
const LOGS_DIR: &str = "logs";
const CREDENTIAL_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Root of all persisted state
    pub data_dir: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl FileStorageConfig {
    /// Directory holding saved exam files
    pub fn questions_dir(&self) -> PathBuf {
        self.data_dir.join(QUESTIONS_DIR)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join(LOGS_DIR)
    }

    /// The credential file written by the API configuration menu
    pub fn credential_path(&self) -> PathBuf {
        self.data_dir.join(CREDENTIAL_FILE)
    }
}
