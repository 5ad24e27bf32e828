//! Generate Exam use case.
//!
//! Requests raw exam text, parses it into records, and persists the result
//! before any session starts. Generator failures are logged and treated as
//! empty output so that they surface as "no usable questions" rather than
//! as errors.

use crate::ports::exam_generator::ExamGenerator;
use crate::ports::exam_repository::{ExamRepository, SavedExam, StoreError};
use crate::ports::progress::{GenerationProgress, NoProgress};
use mock_exam_domain::core::string::truncate;
use mock_exam_domain::{Exam, GenerationRequest, ParseError, parse_exam};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Why no exam came out of a generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoExamReason {
    /// The raw text held no parseable array.
    Unparseable(ParseError),
    /// The array parsed but contained no usable records.
    Empty,
}

impl std::fmt::Display for NoExamReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoExamReason::Unparseable(e) => write!(f, "{}", e),
            NoExamReason::Empty => write!(f, "the generated exam contained no questions"),
        }
    }
}

/// Result of a generation attempt.
#[derive(Debug)]
pub enum GenerateOutcome {
    /// An exam is ready. `saved` reports whether persisting it worked.
    Ready {
        exam: Exam,
        saved: Result<SavedExam, StoreError>,
    },
    /// Nothing usable was produced; nothing was persisted.
    NoUsableQuestions(NoExamReason),
}

/// Use case for producing a new exam.
pub struct GenerateExamUseCase {
    generator: Arc<dyn ExamGenerator>,
    repository: Arc<dyn ExamRepository>,
    progress: Arc<dyn GenerationProgress>,
}

impl Clone for GenerateExamUseCase {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            repository: self.repository.clone(),
            progress: self.progress.clone(),
        }
    }
}

impl GenerateExamUseCase {
    pub fn new(generator: Arc<dyn ExamGenerator>, repository: Arc<dyn ExamRepository>) -> Self {
        Self {
            generator,
            repository,
            progress: Arc::new(NoProgress),
        }
    }

    /// Create with a progress notifier.
    pub fn with_progress(mut self, progress: Arc<dyn GenerationProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Replace the generator (after credentials change).
    pub fn set_generator(&mut self, generator: Arc<dyn ExamGenerator>) {
        self.generator = generator;
    }

    pub async fn execute(&self, request: &GenerationRequest) -> GenerateOutcome {
        info!(
            "Generating {} {} exam ({} questions requested)",
            request.kind,
            request.level,
            request.layout.total_questions()
        );

        self.progress.on_request_start(request);
        let raw = match self.generator.generate(request).await {
            Ok(raw) => {
                self.progress.on_request_complete(true);
                raw
            }
            Err(e) => {
                warn!("Exam generation failed: {}", e);
                self.progress.on_request_complete(false);
                String::new()
            }
        };
        debug!(
            "Generator returned {} bytes: {}",
            raw.len(),
            truncate(&raw, 200)
        );

        let parsed = match parse_exam(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Could not parse generated exam: {}", e);
                return GenerateOutcome::NoUsableQuestions(NoExamReason::Unparseable(e));
            }
        };

        for rejected in &parsed.rejected {
            warn!("Skipping generated element: {}", rejected);
        }
        self.progress
            .on_parse_complete(parsed.exam.len(), parsed.rejected.len());

        if parsed.is_empty() {
            return GenerateOutcome::NoUsableQuestions(NoExamReason::Empty);
        }

        let saved = self
            .repository
            .save(request.kind, &request.level, &parsed.exam);
        match &saved {
            Ok(saved) => info!("Saved generated exam as {}", saved),
            Err(e) => warn!("Could not save generated exam: {}", e),
        }

        GenerateOutcome::Ready {
            exam: parsed.exam,
            saved,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ports::exam_generator::GenerationError;
    use async_trait::async_trait;
    use mock_exam_domain::{ExamKind, ExamLevel};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    pub(crate) struct FixedGenerator(pub Result<String, ()>);

    #[async_trait]
    impl ExamGenerator for FixedGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
            self.0.clone().map_err(|_| GenerationError::Timeout)
        }
    }

    /// Repository that keeps exams in memory.
    #[derive(Default)]
    pub(crate) struct InMemoryRepository {
        pub exams: Mutex<BTreeMap<String, Exam>>,
        pub fail_saves: bool,
    }

    impl ExamRepository for InMemoryRepository {
        fn save(
            &self,
            kind: ExamKind,
            level: &ExamLevel,
            exam: &Exam,
        ) -> Result<SavedExam, StoreError> {
            if self.fail_saves {
                return Err(StoreError::NotFound("disk full".to_string()));
            }
            let mut exams = self.exams.lock().unwrap();
            let name = format!("{}_{}_{}.csv", kind, level, exams.len());
            exams.insert(name.clone(), exam.clone());
            Ok(SavedExam::new(name))
        }

        fn list(&self) -> Result<Vec<SavedExam>, StoreError> {
            Ok(self
                .exams
                .lock()
                .unwrap()
                .keys()
                .map(SavedExam::new)
                .collect())
        }

        fn load(&self, saved: &SavedExam) -> Result<Exam, StoreError> {
            self.exams
                .lock()
                .unwrap()
                .get(&saved.name)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(saved.name.clone()))
        }

        fn delete(&self, saved: &SavedExam) -> Result<(), StoreError> {
            self.exams
                .lock()
                .unwrap()
                .remove(&saved.name)
                .map(|_| ())
                .ok_or_else(|| StoreError::NotFound(saved.name.clone()))
        }
    }

    pub(crate) fn n3_request() -> GenerationRequest {
        GenerationRequest::new(ExamKind::Jlpt, ExamKind::Jlpt.parse_level("N3").unwrap())
    }

    pub(crate) const ONE_QUESTION: &str = r#"Here is your exam: [{"section":"Kanji","content":"","question":"Pick reading","options":["あ","い","う","え"],"answer":"B","note":""}] Thanks!"#;

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_generated_exam_is_parsed_and_saved() {
        let repository = Arc::new(InMemoryRepository::default());
        let use_case = GenerateExamUseCase::new(
            Arc::new(FixedGenerator(Ok(ONE_QUESTION.to_string()))),
            repository.clone(),
        );

        let GenerateOutcome::Ready { exam, saved } = use_case.execute(&n3_request()).await else {
            panic!("expected an exam");
        };
        assert_eq!(exam.len(), 1);
        assert_eq!(saved.unwrap().name, "JLPT_N3_0.csv");
        assert_eq!(repository.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generator_failure_is_no_usable_questions() {
        let repository = Arc::new(InMemoryRepository::default());
        let use_case =
            GenerateExamUseCase::new(Arc::new(FixedGenerator(Err(()))), repository.clone());

        let outcome = use_case.execute(&n3_request()).await;
        assert!(matches!(
            outcome,
            GenerateOutcome::NoUsableQuestions(NoExamReason::Unparseable(ParseError::NoArray))
        ));
        assert!(repository.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prose_without_array_saves_nothing() {
        let repository = Arc::new(InMemoryRepository::default());
        let use_case = GenerateExamUseCase::new(
            Arc::new(FixedGenerator(Ok("I cannot do that.".to_string()))),
            repository.clone(),
        );

        assert!(matches!(
            use_case.execute(&n3_request()).await,
            GenerateOutcome::NoUsableQuestions(_)
        ));
        assert!(repository.exams.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_array_is_no_usable_questions() {
        let use_case = GenerateExamUseCase::new(
            Arc::new(FixedGenerator(Ok("[]".to_string()))),
            Arc::new(InMemoryRepository::default()),
        );
        assert!(matches!(
            use_case.execute(&n3_request()).await,
            GenerateOutcome::NoUsableQuestions(NoExamReason::Empty)
        ));
    }

    #[tokio::test]
    async fn test_save_failure_still_yields_exam() {
        let repository = Arc::new(InMemoryRepository {
            fail_saves: true,
            ..Default::default()
        });
        let use_case = GenerateExamUseCase::new(
            Arc::new(FixedGenerator(Ok(ONE_QUESTION.to_string()))),
            repository,
        );

        let GenerateOutcome::Ready { exam, saved } = use_case.execute(&n3_request()).await else {
            panic!("expected an exam");
        };
        assert_eq!(exam.len(), 1);
        assert!(saved.is_err());
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(
            NoExamReason::Unparseable(ParseError::NoArray).to_string(),
            "no JSON array found in generator output"
        );
    }
}
