//! Exam aggregate and presentation units

use super::question::QuestionRecord;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// An ordered sequence of question records defining one attempt.
///
/// Order is presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exam {
    questions: Vec<QuestionRecord>,
}

impl Exam {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The presentation unit starting at `start`, if any.
    pub fn unit_at(&self, start: usize) -> Option<ExamUnit> {
        unit_at(&self.questions, start)
    }

    /// All presentation units in order.
    pub fn units(&self) -> Units<'_> {
        Units {
            questions: &self.questions,
            next: 0,
        }
    }

    /// Records covered by a unit.
    pub fn unit_questions(&self, unit: &ExamUnit) -> &[QuestionRecord] {
        &self.questions[unit.range()]
    }
}

impl From<Vec<QuestionRecord>> for Exam {
    fn from(questions: Vec<QuestionRecord>) -> Self {
        Self::new(questions)
    }
}

/// A run of records presented together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamUnit {
    /// A standalone record.
    Single { index: usize },
    /// A Listening Block: consecutive listening records sharing one transcript.
    ListeningBlock { range: Range<usize> },
}

impl ExamUnit {
    pub fn range(&self) -> Range<usize> {
        match self {
            ExamUnit::Single { index } => *index..*index + 1,
            ExamUnit::ListeningBlock { range } => range.clone(),
        }
    }

    pub fn start(&self) -> usize {
        self.range().start
    }

    pub fn len(&self) -> usize {
        self.range().len()
    }

    pub fn is_empty(&self) -> bool {
        self.range().is_empty()
    }

    pub fn is_listening_block(&self) -> bool {
        matches!(self, ExamUnit::ListeningBlock { .. })
    }
}

/// Determine the unit beginning at `start`.
///
/// A listening record opens a block that extends while the following records
/// are also listening records with identical content.
pub fn unit_at(questions: &[QuestionRecord], start: usize) -> Option<ExamUnit> {
    let first = questions.get(start)?;
    if !first.is_listening() {
        return Some(ExamUnit::Single { index: start });
    }

    let len = questions[start..]
        .iter()
        .take_while(|q| q.is_listening() && q.content() == first.content())
        .count();

    Some(ExamUnit::ListeningBlock {
        range: start..start + len,
    })
}

/// Iterator over the units of an exam.
pub struct Units<'a> {
    questions: &'a [QuestionRecord],
    next: usize,
}

impl Iterator for Units<'_> {
    type Item = ExamUnit;

    fn next(&mut self) -> Option<Self::Item> {
        let unit = unit_at(self.questions, self.next)?;
        self.next = unit.range().end;
        Some(unit)
    }
}
