//! System text-to-speech narrator
//!
//! Uses whichever speech engine is on `PATH`: `espeak-ng`, `espeak`, or
//! macOS `say`. Synthesis and playback happen inside the child process, so
//! awaiting it is enough to block until the audio has finished.

use async_trait::async_trait;
use mock_exam_application::{NarrationError, Narrator};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Known engines in detection order.
const CANDIDATES: [(&str, EngineKind); 3] = [
    ("espeak-ng", EngineKind::Espeak),
    ("espeak", EngineKind::Espeak),
    ("say", EngineKind::Say),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// `espeak`/`espeak-ng`: `-v <language> <text>`
    Espeak,
    /// macOS `say`: `-v <voice> <text>`, voice picked from the language
    Say,
}

/// A located TTS binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsEngine {
    pub program: PathBuf,
    pub kind: EngineKind,
}

impl TtsEngine {
    /// Find the first available engine on `PATH`.
    pub fn detect() -> Option<Self> {
        CANDIDATES.iter().find_map(|(name, kind)| {
            which::which(name).ok().map(|program| Self {
                program,
                kind: *kind,
            })
        })
    }

    fn args(&self, text: &str, language: &str) -> Vec<String> {
        let mut args = Vec::new();
        match self.kind {
            EngineKind::Espeak => {
                args.push("-v".to_string());
                args.push(language.to_string());
            }
            EngineKind::Say => {
                if let Some(voice) = say_voice(language) {
                    args.push("-v".to_string());
                    args.push(voice.to_string());
                }
            }
        }
        // Transcripts may start with '-'.
        args.push("--".to_string());
        args.push(text.to_string());
        args
    }
}

fn say_voice(language: &str) -> Option<&'static str> {
    match language {
        "ja" => Some("Kyoko"),
        "en" => Some("Samantha"),
        _ => None,
    }
}

/// [`Narrator`] that shells out to a system TTS engine.
pub struct SystemNarrator {
    engine: Option<TtsEngine>,
}

impl SystemNarrator {
    /// Detect an engine now; narration reports unavailable if none is found.
    pub fn detect() -> Self {
        let engine = TtsEngine::detect();
        match &engine {
            Some(engine) => info!("Using TTS engine {}", engine.program.display()),
            None => warn!("No TTS engine found (tried espeak-ng, espeak, say)"),
        }
        Self { engine }
    }

    pub fn with_engine(engine: Option<TtsEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> Option<&TtsEngine> {
        self.engine.as_ref()
    }
}

#[async_trait]
impl Narrator for SystemNarrator {
    async fn narrate(&self, text: &str, language: &str) -> Result<(), NarrationError> {
        let engine = self.engine.as_ref().ok_or_else(|| {
            NarrationError::Unavailable("no TTS engine installed (try espeak-ng)".to_string())
        })?;

        debug!("Narrating {} chars with {:?}", text.chars().count(), engine.kind);
        let output = Command::new(&engine.program)
            .args(engine.args(text, language))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                NarrationError::SynthesisFailed(format!(
                    "failed to start {}: {}",
                    engine.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NarrationError::PlaybackFailed(format!(
                "{} exited with {}: {}",
                engine.program.display(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}
