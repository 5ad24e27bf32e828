//! Session state machine
//!
//! Drives one traversal of an [`Exam`]. The machine is pure: it never does
//! I/O, it only tells the caller what to show and what was granted. The
//! application layer turns those answers into console output and narration.
//!
//! ```text
//! Presenting ──(single)──────────────────────────┐
//!     │                                           ▼
//!     └─(listening)─> AwaitingBlockAction ──> AwaitingAnswer <──┐
//!                       │  ▲  (play once,           │    │      │
//!                       └──┘   transcript)          │    ▼      │
//!                                                 Quit  ShowingFeedback
//!                                                   │    │
//!                                              Aborted   ├─ more in unit ─┘
//!                                                        ├─ next unit ──> Presenting
//!                                                        └─ end ────────> Completed
//! ```

use super::report::{SessionOutcome, SessionReport};
use crate::exam::entities::{Exam, ExamUnit};
use crate::exam::options::Choice;
use crate::exam::question::QuestionRecord;
use thiserror::Error;

/// Token that ends the session from an answer prompt.
pub const QUIT_TOKEN: &str = "Q";

/// Rejected state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Current phase of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Presenting {
        index: usize,
    },
    AwaitingBlockAction {
        unit: ExamUnit,
        narration_used: bool,
    },
    AwaitingAnswer {
        unit: ExamUnit,
        position: usize,
    },
    ShowingFeedback {
        unit: ExamUnit,
        position: usize,
    },
    Completed,
    Aborted,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Presenting { .. } => "presenting",
            SessionState::AwaitingBlockAction { .. } => "awaiting a block action",
            SessionState::AwaitingAnswer { .. } => "awaiting an answer",
            SessionState::ShowingFeedback { .. } => "showing feedback",
            SessionState::Completed => "completed",
            SessionState::Aborted => "aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Aborted)
    }
}

/// Review actions available before answering a listening block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    PlayNarration,
    ShowTranscript,
    StartAnswering,
}

impl BlockAction {
    /// Menu numbering: `1` play, `2` transcript, `3` answer.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(BlockAction::PlayNarration),
            "2" => Some(BlockAction::ShowTranscript),
            "3" => Some(BlockAction::StartAnswering),
            _ => None,
        }
    }
}

/// What the machine decided for a [`BlockAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockActionOutcome<'a> {
    /// Narration granted; the caller should play `transcript` now.
    Narrate { transcript: &'a str },
    /// This block's single narration was already used.
    NarrationAlreadyUsed,
    /// Show the transcript (unlimited).
    Transcript(&'a str),
    /// Answering has started.
    Answering,
}

/// Input at an answer prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerInput {
    Choice(Choice),
    Quit,
}

impl AnswerInput {
    /// Parse `A`-`D` or the quit token, ignoring case. Anything else is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        if input.trim().eq_ignore_ascii_case(QUIT_TOKEN) {
            return Some(AnswerInput::Quit);
        }
        Choice::parse(input).map(AnswerInput::Choice)
    }
}

/// Grading result for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub chosen: Choice,
    pub correct: bool,
    pub correct_answer: &'a str,
    pub note: &'a str,
}

/// Result of submitting an [`AnswerInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome<'a> {
    Graded(Feedback<'a>),
    Aborted,
}

/// Where the session went after feedback was acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Another sub-question of the same block.
    NextInUnit,
    /// The unit is done; the next one is ready to present.
    NextUnit,
    /// The unit was the last one.
    Completed,
}

/// A unit about to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation<'a> {
    pub unit: ExamUnit,
    pub questions: &'a [QuestionRecord],
}

impl<'a> Presentation<'a> {
    /// 1-based number of the first record in the unit.
    pub fn first_number(&self) -> usize {
        self.unit.start() + 1
    }

    /// 1-based number of the last record in the unit.
    pub fn last_number(&self) -> usize {
        self.unit.range().end
    }

    pub fn section(&self) -> &'a str {
        self.questions.first().map(|q| q.section()).unwrap_or_default()
    }

    pub fn content(&self) -> &'a str {
        self.questions.first().map(|q| q.content()).unwrap_or_default()
    }
}

/// One exam attempt.
///
/// Borrows the exam; records are never modified. Score and answered counts
/// are kept here, separate from the records.
#[derive(Debug, Clone)]
pub struct SessionMachine<'a> {
    exam: &'a Exam,
    state: SessionState,
    score: usize,
    answered: usize,
}

impl<'a> SessionMachine<'a> {
    /// Start at the first record. An empty exam is immediately completed.
    pub fn new(exam: &'a Exam) -> Self {
        let state = if exam.is_empty() {
            SessionState::Completed
        } else {
            SessionState::Presenting { index: 0 }
        };
        Self {
            exam,
            state,
            score: 0,
            answered: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn exam(&self) -> &'a Exam {
        self.exam
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Present the unit at the current index.
    ///
    /// Listening records open a block and wait for a [`BlockAction`]; anything
    /// else goes straight to the answer prompt.
    pub fn present(&mut self) -> Result<Presentation<'a>, SessionError> {
        let exam = self.exam;
        let unit = match self.state {
            SessionState::Presenting { index } => exam.unit_at(index),
            _ => None,
        };
        let Some(unit) = unit else {
            return Err(self.invalid("present a unit"));
        };

        let questions = exam.unit_questions(&unit);
        self.state = if unit.is_listening_block() {
            SessionState::AwaitingBlockAction {
                unit: unit.clone(),
                narration_used: false,
            }
        } else {
            SessionState::AwaitingAnswer {
                unit: unit.clone(),
                position: 0,
            }
        };

        Ok(Presentation { unit, questions })
    }

    /// Handle a review action on the current listening block.
    pub fn block_action(
        &mut self,
        action: BlockAction,
    ) -> Result<BlockActionOutcome<'a>, SessionError> {
        let exam = self.exam;
        let state = self.state.name();
        let SessionState::AwaitingBlockAction {
            unit,
            narration_used,
        } = &mut self.state
        else {
            return Err(SessionError::InvalidTransition {
                action: "take a block action",
                state,
            });
        };

        let transcript = exam
            .get(unit.start())
            .map(|q| q.content())
            .unwrap_or_default();

        match action {
            BlockAction::PlayNarration if *narration_used => {
                Ok(BlockActionOutcome::NarrationAlreadyUsed)
            }
            BlockAction::PlayNarration => {
                *narration_used = true;
                Ok(BlockActionOutcome::Narrate { transcript })
            }
            BlockAction::ShowTranscript => Ok(BlockActionOutcome::Transcript(transcript)),
            BlockAction::StartAnswering => {
                let unit = unit.clone();
                self.state = SessionState::AwaitingAnswer { unit, position: 0 };
                Ok(BlockActionOutcome::Answering)
            }
        }
    }

    /// The record waiting for an answer, with its position inside the unit.
    pub fn current_question(&self) -> Option<(usize, &'a QuestionRecord)> {
        let exam = self.exam;
        match &self.state {
            SessionState::AwaitingAnswer { unit, position } => exam
                .get(unit.start() + position)
                .map(|q| (*position, q)),
            _ => None,
        }
    }

    /// Submit an answer or quit.
    pub fn answer(&mut self, input: AnswerInput) -> Result<AnswerOutcome<'a>, SessionError> {
        let SessionState::AwaitingAnswer { unit, position } = &self.state else {
            return Err(self.invalid("answer"));
        };
        let (unit, position) = (unit.clone(), *position);

        let choice = match input {
            AnswerInput::Quit => {
                self.state = SessionState::Aborted;
                return Ok(AnswerOutcome::Aborted);
            }
            AnswerInput::Choice(choice) => choice,
        };

        let exam = self.exam;
        let Some(record) = exam.get(unit.start() + position) else {
            return Err(self.invalid("answer"));
        };

        let correct = record.is_correct(choice);
        if correct {
            self.score += 1;
        }
        self.answered += 1;
        self.state = SessionState::ShowingFeedback { unit, position };

        Ok(AnswerOutcome::Graded(Feedback {
            chosen: choice,
            correct,
            correct_answer: record.answer(),
            note: record.note(),
        }))
    }

    /// Move past the feedback just shown.
    pub fn acknowledge(&mut self) -> Result<Advance, SessionError> {
        let SessionState::ShowingFeedback { unit, position } = &self.state else {
            return Err(self.invalid("acknowledge feedback"));
        };
        let (unit, next_position) = (unit.clone(), position + 1);

        if next_position < unit.len() {
            self.state = SessionState::AwaitingAnswer {
                unit,
                position: next_position,
            };
            return Ok(Advance::NextInUnit);
        }

        let next_index = unit.range().end;
        if next_index >= self.exam.len() {
            self.state = SessionState::Completed;
            Ok(Advance::Completed)
        } else {
            self.state = SessionState::Presenting { index: next_index };
            Ok(Advance::NextUnit)
        }
    }

    /// End the session from any non-terminal state.
    ///
    /// Used when input is lost; an explicit quit goes through [`Self::answer`].
    pub fn abort(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::Aborted;
        }
    }

    /// Tally so far. `total` is the full exam length regardless of outcome.
    pub fn report(&self) -> SessionReport {
        let outcome = match self.state {
            SessionState::Completed => SessionOutcome::Completed,
            SessionState::Aborted => SessionOutcome::Aborted,
            _ => SessionOutcome::InProgress,
        };
        SessionReport {
            score: self.score,
            total: self.exam.len(),
            answered: self.answered,
            outcome,
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}
