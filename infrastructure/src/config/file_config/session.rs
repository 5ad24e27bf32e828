//! Session configuration from TOML (`[session]` section)

use mock_exam_application::{DEFAULT_NARRATION_LANGUAGE, SessionParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Language code handed to the TTS engine
    pub narration_language: String,
    /// Enable listening narration
    pub narration: bool,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            narration_language: DEFAULT_NARRATION_LANGUAGE.to_string(),
            narration: true,
        }
    }
}

impl FileSessionConfig {
    pub fn to_session_params(&self) -> SessionParams {
        SessionParams::default().with_narration_language(self.narration_language.trim())
    }
}
