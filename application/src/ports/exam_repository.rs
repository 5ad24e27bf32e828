//! Exam repository port
//!
//! Durable storage for generated exams: one record per attempt, listed by
//! name, loaded back at the question-record level.

use mock_exam_domain::{Exam, ExamKind, ExamLevel};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from exam storage
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed exam file {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Saved exam not found: {0}")]
    NotFound(String),
}

/// Handle to a stored exam
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SavedExam {
    /// Display name (the file name for file-backed stores)
    pub name: String,
}

impl SavedExam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for SavedExam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Port for persisting exams
pub trait ExamRepository: Send + Sync {
    /// Persist `exam` under a name derived from kind, level and the current time
    fn save(&self, kind: ExamKind, level: &ExamLevel, exam: &Exam)
    -> Result<SavedExam, StoreError>;

    /// All stored exams, sorted by name
    fn list(&self) -> Result<Vec<SavedExam>, StoreError>;

    /// Load a stored exam
    fn load(&self, saved: &SavedExam) -> Result<Exam, StoreError>;

    /// Remove a stored exam
    fn delete(&self, saved: &SavedExam) -> Result<(), StoreError>;
}
