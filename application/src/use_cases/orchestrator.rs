//! Exam session orchestrator.
//!
//! Ties generation, storage and the session together for the two entry
//! flows:
//!
//! ```text
//! generate: request → generator → parse → save → session → report
//! load:     saved exam → repository → session → report
//! ```
//!
//! When generation yields nothing usable, no file is written and no session
//! starts.

use super::generate_exam::{GenerateExamUseCase, GenerateOutcome, NoExamReason};
use super::run_session::{RunSessionError, RunSessionUseCase};
use crate::ports::exam_generator::ExamGenerator;
use crate::ports::exam_repository::{ExamRepository, SavedExam, StoreError};
use crate::ports::session_interaction::SessionInteraction;
use mock_exam_domain::{GenerationRequest, SessionReport};
use std::sync::Arc;
use tracing::{info, warn};

/// Why a session did not start.
#[derive(Debug)]
pub enum NotStarted {
    /// Generation produced nothing usable.
    NoExam(NoExamReason),
    /// A saved exam could not be read.
    LoadFailed(StoreError),
    /// A saved exam holds no questions.
    EmptySavedExam(SavedExam),
}

impl std::fmt::Display for NotStarted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotStarted::NoExam(reason) => write!(f, "No usable questions: {}", reason),
            NotStarted::LoadFailed(e) => write!(f, "Could not load exam: {}", e),
            NotStarted::EmptySavedExam(saved) => write!(f, "{} contains no questions", saved),
        }
    }
}

/// Outcome of one entry flow.
#[derive(Debug)]
pub enum FlowOutcome {
    /// A session ran (to completion or abort).
    Finished {
        report: SessionReport,
        /// Where a freshly generated exam was saved, or why saving failed.
        saved: Option<Result<SavedExam, StoreError>>,
    },
    NotStarted(NotStarted),
}

/// Top-level driver for generating, loading and taking exams.
pub struct ExamSessionOrchestrator {
    generate: GenerateExamUseCase,
    run_session: RunSessionUseCase,
    repository: Arc<dyn ExamRepository>,
}

impl ExamSessionOrchestrator {
    pub fn new(
        generate: GenerateExamUseCase,
        run_session: RunSessionUseCase,
        repository: Arc<dyn ExamRepository>,
    ) -> Self {
        Self {
            generate,
            run_session,
            repository,
        }
    }

    /// Swap in a generator built from new credentials.
    pub fn set_generator(&mut self, generator: Arc<dyn ExamGenerator>) {
        self.generate.set_generator(generator);
    }

    /// Generate, persist and take a new exam.
    pub async fn generate_and_run(
        &self,
        request: &GenerationRequest,
        interaction: &dyn SessionInteraction,
    ) -> Result<FlowOutcome, RunSessionError> {
        let (exam, saved) = match self.generate.execute(request).await {
            GenerateOutcome::Ready { exam, saved } => (exam, saved),
            GenerateOutcome::NoUsableQuestions(reason) => {
                warn!("Not starting a session: {}", reason);
                return Ok(FlowOutcome::NotStarted(NotStarted::NoExam(reason)));
            }
        };

        let report = self.run_session.execute(&exam, interaction).await?;
        Ok(FlowOutcome::Finished {
            report,
            saved: Some(saved),
        })
    }

    /// Stored exams, sorted by name.
    pub fn saved_exams(&self) -> Result<Vec<SavedExam>, StoreError> {
        self.repository.list()
    }

    /// Load and take a stored exam.
    pub async fn load_and_run(
        &self,
        saved: &SavedExam,
        interaction: &dyn SessionInteraction,
    ) -> Result<FlowOutcome, RunSessionError> {
        let exam = match self.repository.load(saved) {
            Ok(exam) => exam,
            Err(e) => {
                warn!("Failed to load {}: {}", saved, e);
                return Ok(FlowOutcome::NotStarted(NotStarted::LoadFailed(e)));
            }
        };
        if exam.is_empty() {
            return Ok(FlowOutcome::NotStarted(NotStarted::EmptySavedExam(
                saved.clone(),
            )));
        }

        info!("Loaded {} ({} questions)", saved, exam.len());
        let report = self.run_session.execute(&exam, interaction).await?;
        Ok(FlowOutcome::Finished {
            report,
            saved: None,
        })
    }

    /// Remove a stored exam.
    pub fn delete_saved(&self, saved: &SavedExam) -> Result<(), StoreError> {
        self.repository.delete(saved)?;
        info!("Deleted {}", saved);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::generate_exam::tests::{
        FixedGenerator, InMemoryRepository, ONE_QUESTION, n3_request,
    };
    use crate::use_cases::run_session::tests::{RecordingNarrator, ScriptedInteraction, record};
    use mock_exam_domain::{Exam, ExamKind, ParseError};

    fn orchestrator(
        raw: Result<String, ()>,
        repository: Arc<InMemoryRepository>,
    ) -> ExamSessionOrchestrator {
        let generate = GenerateExamUseCase::new(Arc::new(FixedGenerator(raw)), repository.clone());
        let run_session = RunSessionUseCase::new(Arc::new(RecordingNarrator::new()));
        ExamSessionOrchestrator::new(generate, run_session, repository)
    }

    #[tokio::test]
    async fn test_generate_flow_saves_then_runs() {
        let repository = Arc::new(InMemoryRepository::default());
        let orchestrator = orchestrator(Ok(ONE_QUESTION.to_string()), repository.clone());
        let interaction = ScriptedInteraction::new(&["b"]);

        let outcome = orchestrator
            .generate_and_run(&n3_request(), &interaction)
            .await
            .unwrap();

        let FlowOutcome::Finished { report, saved } = outcome else {
            panic!("expected a session");
        };
        assert_eq!((report.score, report.total), (1, 1));
        assert!(saved.unwrap().is_ok());
        assert_eq!(orchestrator.saved_exams().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_parse_failure_has_no_side_effects() {
        let repository = Arc::new(InMemoryRepository::default());
        let orchestrator = orchestrator(Ok("no exam today".to_string()), repository.clone());
        let interaction = ScriptedInteraction::new(&[]);

        let outcome = orchestrator
            .generate_and_run(&n3_request(), &interaction)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            FlowOutcome::NotStarted(NotStarted::NoExam(NoExamReason::Unparseable(
                ParseError::NoArray
            )))
        ));
        assert!(repository.exams.lock().unwrap().is_empty());
        assert!(interaction.events().is_empty());
    }

    #[tokio::test]
    async fn test_load_flow_runs_saved_exam() {
        let repository = Arc::new(InMemoryRepository::default());
        let level = ExamKind::Jpt.parse_level("500").unwrap();
        let saved = repository
            .save(
                ExamKind::Jpt,
                &level,
                &Exam::new(vec![record("Grammar", "", "A"), record("Grammar", "", "B")]),
            )
            .unwrap();
        let orchestrator = orchestrator(Err(()), repository);
        let interaction = ScriptedInteraction::new(&["A", "A"]);

        let outcome = orchestrator.load_and_run(&saved, &interaction).await.unwrap();
        let FlowOutcome::Finished { report, saved } = outcome else {
            panic!("expected a session");
        };
        assert_eq!((report.score, report.total), (1, 2));
        assert!(saved.is_none());
    }

    #[tokio::test]
    async fn test_load_missing_exam_is_not_started() {
        let orchestrator = orchestrator(Err(()), Arc::new(InMemoryRepository::default()));
        let interaction = ScriptedInteraction::new(&[]);

        let outcome = orchestrator
            .load_and_run(&SavedExam::new("gone.csv"), &interaction)
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            FlowOutcome::NotStarted(NotStarted::LoadFailed(StoreError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_delete_saved() {
        let repository = Arc::new(InMemoryRepository::default());
        let orchestrator = orchestrator(Ok(ONE_QUESTION.to_string()), repository);
        let interaction = ScriptedInteraction::new(&["q"]);
        orchestrator
            .generate_and_run(&n3_request(), &interaction)
            .await
            .unwrap();

        let saved = orchestrator.saved_exams().unwrap().remove(0);
        orchestrator.delete_saved(&saved).unwrap();
        assert!(orchestrator.saved_exams().unwrap().is_empty());
        assert!(orchestrator.delete_saved(&saved).is_err());
    }

    #[tokio::test]
    async fn test_set_generator_replaces_source() {
        let repository = Arc::new(InMemoryRepository::default());
        let mut orchestrator = orchestrator(Err(()), repository);
        orchestrator.set_generator(Arc::new(FixedGenerator(Ok(ONE_QUESTION.to_string()))));
        let interaction = ScriptedInteraction::new(&["B"]);

        let outcome = orchestrator
            .generate_and_run(&n3_request(), &interaction)
            .await
            .unwrap();
        assert!(matches!(outcome, FlowOutcome::Finished { .. }));
    }
}
