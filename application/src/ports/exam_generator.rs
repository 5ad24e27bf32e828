//! Exam generator port
//!
//! Defines the interface for obtaining raw exam text from a generative
//! text service.

use async_trait::async_trait;
use mock_exam_domain::GenerationRequest;
use thiserror::Error;

/// Errors that can occur while requesting an exam
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generator is not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response")]
    EmptyResponse,
}

/// Source of raw exam text
///
/// The returned text is expected to contain one JSON array of question
/// objects, possibly wrapped in prose. Implementations live in the
/// infrastructure layer.
#[async_trait]
pub trait ExamGenerator: Send + Sync {
    /// Request a new exam matching `request`
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
