//! Exam generation adapters

pub mod openai;

pub use openai::{GenerationSettings, OpenAiExamGenerator};
