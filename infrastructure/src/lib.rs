//! Infrastructure layer for mock-exam
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod generation;
pub mod narration;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ApiCredentials, ConfigError, ConfigLoader, ConfigValidationError, CredentialStore,
    FileApiConfig, FileConfig, FileSessionConfig, FileStorageConfig,
};
pub use generation::{GenerationSettings, OpenAiExamGenerator};
pub use narration::{SystemNarrator, TtsEngine};
pub use storage::CsvExamRepository;
