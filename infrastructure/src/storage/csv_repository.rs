//! CSV exam store
//!
//! One file per generated exam in the questions directory, named
//! `{KIND}_{LEVEL}_{YYYYMMDD}_{HHMMSS}.csv`. Files are UTF-8 with a BOM so
//! spreadsheet tools open them correctly; the BOM is optional on read.
//!
//! Columns: `Section,Content,Question,Options,Answer,Note`. Options are
//! stored as a JSON array so commas, quotes, pipes and newlines inside an
//! option survive. Rows written by older versions as `a|b|c|d` still load.

use chrono::Local;
use mock_exam_application::{ExamRepository, SavedExam, StoreError};
use mock_exam_domain::exam::question::{DEFAULT_ANSWER, DEFAULT_SECTION};
use mock_exam_domain::{AnswerOptions, Exam, ExamKind, ExamLevel, QuestionRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EXTENSION: &str = "csv";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const HEADER: [&str; 6] = ["Section", "Content", "Question", "Options", "Answer", "Note"];

/// [`ExamRepository`] over a directory of CSV files.
pub struct CsvExamRepository {
    dir: PathBuf,
}

impl CsvExamRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for a stored exam. Names that would escape the directory are
    /// treated as missing.
    fn path_of(&self, saved: &SavedExam) -> Result<PathBuf, StoreError> {
        let name = Path::new(&saved.name);
        match name.file_name() {
            Some(file) if file == name.as_os_str() => Ok(self.dir.join(name)),
            _ => Err(StoreError::NotFound(saved.name.clone())),
        }
    }

    /// Pick a file name that does not collide with an existing exam.
    fn fresh_name(&self, kind: ExamKind, level: &ExamLevel) -> String {
        let stem = format!("{}_{}_{}", kind, level, Local::now().format("%Y%m%d_%H%M%S"));
        let mut name = format!("{}.{}", stem, EXTENSION);
        let mut n = 2;
        while self.dir.join(&name).exists() {
            name = format!("{}_{}.{}", stem, n, EXTENSION);
            n += 1;
        }
        name
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> StoreError + '_ {
    move |e| StoreError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Serialize an exam to CSV bytes (BOM included).
fn encode_exam(exam: &Exam, path: &Path) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(HEADER).map_err(csv_error(path))?;
    for record in exam.questions() {
        let options = record.options().encode();
        writer
            .write_record([
                record.section(),
                record.content(),
                record.question(),
                options.as_str(),
                record.answer(),
                record.note(),
            ])
            .map_err(csv_error(path))?;
    }
    writer.into_inner().map_err(|e| StoreError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse CSV bytes into an exam. Columns are located by header name.
///
/// Cells are taken as written. A column missing from the header reads as
/// empty, except `Section` and `Answer`, which fall back to their defaults.
fn decode_exam(bytes: &[u8], path: &Path) -> Result<Exam, StoreError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(csv_error(path))?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
    let [section, content, question, options, answer, note] = HEADER.map(column);

    let mut questions = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error(path))?;
        let cell = |index: usize| row.get(index).unwrap_or("");
        let field = |index: Option<usize>| index.map(cell).unwrap_or("");

        questions.push(QuestionRecord::new(
            section.map(cell).unwrap_or(DEFAULT_SECTION),
            field(content),
            field(question),
            AnswerOptions::from_encoded(field(options)),
            answer.map(cell).unwrap_or(DEFAULT_ANSWER),
            field(note),
        ));
    }
    Ok(Exam::new(questions))
}

impl ExamRepository for CsvExamRepository {
    fn save(
        &self,
        kind: ExamKind,
        level: &ExamLevel,
        exam: &Exam,
    ) -> Result<SavedExam, StoreError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let name = self.fresh_name(kind, level);
        let path = self.dir.join(&name);

        let bytes = encode_exam(exam, &path)?;
        fs::write(&path, bytes).map_err(io_error(&path))?;
        info!("Saved {} questions to {}", exam.len(), path.display());
        Ok(SavedExam::new(name))
    }

    fn list(&self) -> Result<Vec<SavedExam>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut saved = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_error(&self.dir))? {
            let path = entry.map_err(io_error(&self.dir))?.path();
            if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                saved.push(SavedExam::new(name));
            }
        }
        saved.sort();
        debug!("Found {} saved exams in {}", saved.len(), self.dir.display());
        Ok(saved)
    }

    fn load(&self, saved: &SavedExam) -> Result<Exam, StoreError> {
        let path = self.path_of(saved)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(saved.name.clone()));
        }
        let bytes = fs::read(&path).map_err(io_error(&path))?;
        let exam = decode_exam(&bytes, &path)?;
        info!("Loaded {} questions from {}", exam.len(), path.display());
        Ok(exam)
    }

    fn delete(&self, saved: &SavedExam) -> Result<(), StoreError> {
        let path = self.path_of(saved)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(saved.name.clone()));
        }
        fs::remove_file(&path).map_err(io_error(&path))?;
        info!("Deleted {}", path.display());
        Ok(())
    }
}
