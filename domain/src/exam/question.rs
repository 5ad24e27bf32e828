//! Question record entity

use super::options::{AnswerOptions, Choice};
use serde::{Deserialize, Serialize};

/// Section label applied when the generator omits one.
pub const DEFAULT_SECTION: &str = "General";

/// Answer letter applied when the generator omits one.
pub const DEFAULT_ANSWER: &str = "A";

const LISTENING_MARKER: &str = "Listening";
const READING_MARKER: &str = "Reading";

/// One graded unit of exam content.
///
/// Records are immutable once built; a session only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    section: String,
    content: String,
    question: String,
    options: AnswerOptions,
    answer: String,
    note: String,
}

impl QuestionRecord {
    pub fn new(
        section: impl Into<String>,
        content: impl Into<String>,
        question: impl Into<String>,
        options: AnswerOptions,
        answer: impl AsRef<str>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            content: content.into(),
            question: question.into(),
            options,
            answer: normalize_answer(answer.as_ref()),
            note: note.into(),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &AnswerOptions {
        &self.options
    }

    /// Canonical (uppercase) answer as it was supplied.
    ///
    /// Not guaranteed to be a valid letter; unknown values are simply never
    /// graded as correct.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Whether the section label marks listening content.
    pub fn is_listening(&self) -> bool {
        self.section.contains(LISTENING_MARKER)
    }

    /// Whether the section label marks a reading passage.
    pub fn is_reading(&self) -> bool {
        self.section.contains(READING_MARKER)
    }

    /// Grade a choice against the stored answer.
    pub fn is_correct(&self, choice: Choice) -> bool {
        Choice::parse(&self.answer) == Some(choice)
    }
}

fn normalize_answer(answer: &str) -> String {
    answer.trim().to_uppercase()
}
