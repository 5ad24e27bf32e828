//! Application layer for mock-exam
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_NARRATION_LANGUAGE, SessionParams};
pub use ports::{
    exam_generator::{ExamGenerator, GenerationError},
    exam_repository::{ExamRepository, SavedExam, StoreError},
    narrator::{DisabledNarrator, NarrationError, Narrator},
    progress::{GenerationProgress, NoProgress},
    session_interaction::{InteractionError, SessionInteraction, SessionNotice},
};
pub use use_cases::generate_exam::{GenerateExamUseCase, GenerateOutcome, NoExamReason};
pub use use_cases::orchestrator::{ExamSessionOrchestrator, FlowOutcome, NotStarted};
pub use use_cases::run_session::{RunSessionError, RunSessionUseCase};
