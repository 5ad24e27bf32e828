//! Narration port
//!
//! Speaks a listening transcript aloud. Synthesis and playback are one
//! blocking operation from the session's point of view: the call returns
//! only once playback has finished or failed.
//!
//! # Built-in Implementations
//!
//! - [`DisabledNarrator`] - always reports narration as unavailable

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a narrator. None of them end the session.
#[derive(Error, Debug)]
pub enum NarrationError {
    #[error("Narration unavailable: {0}")]
    Unavailable(String),

    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Port for speaking text aloud
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Speak `text` in the language identified by `language` (e.g. `"ja"`)
    async fn narrate(&self, text: &str, language: &str) -> Result<(), NarrationError>;
}

/// Narrator used when narration is turned off.
pub struct DisabledNarrator;

#[async_trait]
impl Narrator for DisabledNarrator {
    async fn narrate(&self, _text: &str, _language: &str) -> Result<(), NarrationError> {
        Err(NarrationError::Unavailable(
            "narration is disabled".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_narrator_reports_unavailable() {
        let result = DisabledNarrator.narrate("こんにちは", "ja").await;
        assert!(matches!(result, Err(NarrationError::Unavailable(_))));
    }
}
