//! Exam blueprint: what kind of exam to generate and how large each section is.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported exam families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamKind {
    Jlpt,
    Jpt,
}

impl ExamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamKind::Jlpt => "JLPT",
            ExamKind::Jpt => "JPT",
        }
    }

    /// Hint shown when asking for a level.
    pub fn level_hint(&self) -> &'static str {
        match self {
            ExamKind::Jlpt => "N5 -> N1",
            ExamKind::Jpt => "315 -> 990",
        }
    }

    /// Validate and normalize a level label for this exam.
    pub fn parse_level(&self, input: &str) -> Result<ExamLevel, DomainError> {
        let label = input.trim().to_uppercase();
        let valid = match self {
            ExamKind::Jlpt => matches!(label.as_str(), "N5" | "N4" | "N3" | "N2" | "N1"),
            ExamKind::Jpt => label
                .parse::<u16>()
                .is_ok_and(|score| (315..=990).contains(&score)),
        };
        if valid {
            Ok(ExamLevel(label))
        } else {
            Err(DomainError::InvalidLevel {
                kind: self.as_str(),
                level: input.trim().to_string(),
            })
        }
    }
}

impl std::fmt::Display for ExamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExamKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jlpt" => Ok(ExamKind::Jlpt),
            "jpt" => Ok(ExamKind::Jpt),
            other => Err(DomainError::InvalidExamKind(other.to_string())),
        }
    }
}

/// A validated difficulty label (`N3`, `650`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExamLevel(String);

impl ExamLevel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExamLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `groups` passages or dialogues with `per_group` questions each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSize {
    pub groups: u32,
    pub per_group: u32,
}

impl GroupSize {
    pub const fn new(groups: u32, per_group: u32) -> Self {
        Self { groups, per_group }
    }

    pub fn total(&self) -> u32 {
        self.groups.saturating_mul(self.per_group)
    }
}

/// Per-section question counts.
///
/// `kanji` and `vocabulary` are `None` for exams without those sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub kanji: Option<u32>,
    pub vocabulary: Option<u32>,
    pub grammar: u32,
    pub reading_short: GroupSize,
    pub reading_long: GroupSize,
    pub listening: GroupSize,
}

impl SectionLayout {
    pub fn default_for(kind: ExamKind) -> Self {
        match kind {
            ExamKind::Jlpt => Self {
                kanji: Some(5),
                vocabulary: Some(5),
                grammar: 5,
                reading_short: GroupSize::new(2, 3),
                reading_long: GroupSize::new(1, 5),
                listening: GroupSize::new(2, 5),
            },
            ExamKind::Jpt => Self {
                kanji: None,
                vocabulary: None,
                grammar: 10,
                reading_short: GroupSize::new(2, 3),
                reading_long: GroupSize::new(1, 5),
                listening: GroupSize::new(2, 5),
            },
        }
    }

    pub fn total_questions(&self) -> u32 {
        [
            self.kanji.unwrap_or(0),
            self.vocabulary.unwrap_or(0),
            self.grammar,
            self.reading_short.total(),
            self.reading_long.total(),
            self.listening.total(),
        ]
        .into_iter()
        .fold(0, u32::saturating_add)
    }
}

/// Everything the generator needs to produce one exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub kind: ExamKind,
    pub level: ExamLevel,
    pub layout: SectionLayout,
}

impl GenerationRequest {
    /// Request with the default layout for `kind`.
    pub fn new(kind: ExamKind, level: ExamLevel) -> Self {
        Self {
            kind,
            level,
            layout: SectionLayout::default_for(kind),
        }
    }

    pub fn with_layout(mut self, layout: SectionLayout) -> Self {
        self.layout = layout;
        self
    }
}
