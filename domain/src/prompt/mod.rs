//! Prompt domain
//!
//! Templates for asking a chat model to write an exam.

mod template;

pub use template::ExamPromptTemplate;
