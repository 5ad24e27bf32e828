//! Session interaction port
//!
//! Everything the session needs from the person taking the exam: showing
//! units, transcripts and feedback, and reading block actions and answers.
//!
//! # Architecture
//!
//! - **Port**: [`SessionInteraction`] - defined here in application layer
//! - **Adapter**: `ConsoleSessionInteraction` - implemented in presentation layer
//!
//! # Flow
//!
//! ```text
//! show_unit
//!    ↓ (listening block only)
//! choose_block_action ⇄ show_transcript / show_notice
//!    ↓
//! read_answer → show_feedback   (once per record of the unit)
//!    ↓
//! finish_unit
//!    ↓
//! ... next unit ...
//!    ↓
//! show_report
//! ```

use async_trait::async_trait;
use mock_exam_domain::{
    AnswerInput, BlockAction, Feedback, Presentation, QuestionRecord, SessionReport,
};
use thiserror::Error;

/// Failure to talk to the user.
///
/// A closed input stream ends the session like a quit would.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("Input closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(String),
}

/// Non-fatal messages raised during a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// Narration granted and about to play
    NarrationStarted,
    /// The block's single narration was already used
    NarrationAlreadyUsed,
    /// Narration failed; the block continues un-narrated
    NarrationFailed(String),
}

/// Port for presenting a session and collecting input.
#[async_trait]
pub trait SessionInteraction: Send + Sync {
    /// Called once before the first unit
    async fn session_started(&self, total_questions: usize);

    /// Show a unit (single record or listening block)
    async fn show_unit(&self, presentation: &Presentation<'_>);

    /// Read a review action for the current listening block.
    ///
    /// Implementations re-prompt until a valid action is given.
    async fn choose_block_action(&self) -> Result<BlockAction, InteractionError>;

    /// Show a listening transcript
    async fn show_transcript(&self, transcript: &str);

    /// Show a non-fatal notice
    async fn show_notice(&self, notice: &SessionNotice);

    /// Read an answer for `question`.
    ///
    /// `position` is the index inside the current unit; `in_block` tells
    /// whether the unit is a listening block. Implementations re-prompt on
    /// input that is neither a letter nor the quit token.
    async fn read_answer(
        &self,
        position: usize,
        question: &QuestionRecord,
        in_block: bool,
    ) -> Result<AnswerInput, InteractionError>;

    /// Show grading feedback for the record just answered
    async fn show_feedback(&self, feedback: &Feedback<'_>);

    /// Called after the last feedback of a unit
    async fn finish_unit(&self) -> Result<(), InteractionError>;

    /// Show the final tally
    async fn show_report(&self, report: &SessionReport);
}
