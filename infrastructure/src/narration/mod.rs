//! Narration adapters

pub mod system;

pub use system::{SystemNarrator, TtsEngine};
