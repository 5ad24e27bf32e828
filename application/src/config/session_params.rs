//! Session parameters: settings that shape an exam attempt.

use serde::{Deserialize, Serialize};

/// Language used when narration is not configured.
pub const DEFAULT_NARRATION_LANGUAGE: &str = "ja";

/// Session parameters.
///
/// These are application-layer concerns resolved from configuration before
/// a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Language code passed to the narrator.
    pub narration_language: String,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            narration_language: DEFAULT_NARRATION_LANGUAGE.to_string(),
        }
    }
}

impl SessionParams {
    pub fn with_narration_language(mut self, language: impl Into<String>) -> Self {
        self.narration_language = language.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_japanese() {
        assert_eq!(SessionParams::default().narration_language, "ja");
    }

    #[test]
    fn test_builder() {
        let params = SessionParams::default().with_narration_language("en");
        assert_eq!(params.narration_language, "en");
    }
}
