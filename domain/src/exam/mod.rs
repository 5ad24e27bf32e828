//! Exam content domain.
//!
//! - [`question::QuestionRecord`]: one graded multiple-choice item
//! - [`options::AnswerOptions`]: the four A–D choices, always padded to four
//! - [`entities::Exam`]: ordered records, grouped into presentation units
//! - [`parsing`]: turning generator output into validated records
//! - [`blueprint`]: exam kind, level and section sizes for generation

pub mod blueprint;
pub mod entities;
pub mod options;
pub mod parsing;
pub mod question;
