//! Domain layer for mock-exam
//!
//! This crate contains exam content, parsing, and the session state machine.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Exam
//!
//! An ordered list of [`QuestionRecord`]s. Consecutive listening records that
//! share one transcript form a **Listening Block** and are presented together.
//!
//! ## Session
//!
//! One traversal of an exam, driven by [`SessionMachine`]: present a unit,
//! (for blocks) allow a single narration and any number of transcript views,
//! collect answers, grade, and finish as completed or aborted.

pub mod core;
pub mod exam;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use core::error::DomainError;
pub use exam::{
    blueprint::{ExamKind, ExamLevel, GenerationRequest, GroupSize, SectionLayout},
    entities::{Exam, ExamUnit},
    options::{AnswerOptions, Choice, OPTION_COUNT, OPTION_PLACEHOLDER},
    parsing::{ParseError, ParsedExam, RecordDecodeError, parse_exam},
    question::QuestionRecord,
};
pub use prompt::ExamPromptTemplate;
pub use session::{
    machine::{
        Advance, AnswerInput, AnswerOutcome, BlockAction, BlockActionOutcome, Feedback,
        Presentation, QUIT_TOKEN, SessionError, SessionMachine, SessionState,
    },
    report::{SessionOutcome, SessionReport},
};
