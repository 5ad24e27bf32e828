//! Exam parsing from generator output.
//!
//! The generator is asked for a raw JSON array but frequently wraps it in
//! prose. Parsing happens in two steps:
//!
//! 1. [`extract_json_array`] slices from the first `[` to the last `]`.
//! 2. [`decode_record`] turns each array element into a [`QuestionRecord`],
//!    repairing missing or oddly-typed fields with defaults.
//!
//! Only a missing or unparseable array fails the whole parse. Elements that
//! are not objects are reported in [`ParsedExam::rejected`] and skipped.

use super::entities::Exam;
use super::options::AnswerOptions;
use super::question::{DEFAULT_ANSWER, DEFAULT_SECTION, QuestionRecord};
use serde_json::Value;
use thiserror::Error;

/// Failure to find any usable array in the raw text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no JSON array found in generator output")]
    NoArray,

    #[error("invalid JSON array: {0}")]
    InvalidJson(String),

    #[error("expected a JSON array of question objects")]
    NotAnArray,
}

/// A single array element that could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordDecodeError {
    #[error("element {index} is not an object (found {found})")]
    NotAnObject { index: usize, found: &'static str },
}

/// Result of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedExam {
    pub exam: Exam,
    pub rejected: Vec<RecordDecodeError>,
}

impl ParsedExam {
    /// True when nothing answerable came out of the parse.
    pub fn is_empty(&self) -> bool {
        self.exam.is_empty()
    }
}

/// Slice the candidate array out of surrounding text.
///
/// Greedy: the first `[` through the last `]`, inclusive.
pub fn extract_json_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    (start < end).then(|| &raw[start..=end])
}

/// Parse raw generator text into an exam.
pub fn parse_exam(raw: &str) -> Result<ParsedExam, ParseError> {
    let candidate = extract_json_array(raw).ok_or(ParseError::NoArray)?;
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    parse_exam_value(&value)
}

/// Decode an already-parsed JSON value into an exam.
pub fn parse_exam_value(value: &Value) -> Result<ParsedExam, ParseError> {
    let elements = value.as_array().ok_or(ParseError::NotAnArray)?;

    let mut questions = Vec::with_capacity(elements.len());
    let mut rejected = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        match decode_record(index, element) {
            Ok(record) => questions.push(record),
            Err(e) => rejected.push(e),
        }
    }

    Ok(ParsedExam {
        exam: Exam::new(questions),
        rejected,
    })
}

/// Validate one array element.
///
/// Missing fields are filled: section `"General"`, content/question/note
/// empty, options four placeholders, answer `"A"`.
pub fn decode_record(index: usize, element: &Value) -> Result<QuestionRecord, RecordDecodeError> {
    let Some(object) = element.as_object() else {
        return Err(RecordDecodeError::NotAnObject {
            index,
            found: json_type_name(element),
        });
    };

    let text = |key: &str| object.get(key).and_then(json_value_to_string);

    let options = match object.get("options") {
        Some(Value::Array(values)) => AnswerOptions::from_json_values(values),
        Some(Value::String(encoded)) => AnswerOptions::from_encoded(encoded),
        _ => AnswerOptions::placeholders(),
    };

    Ok(QuestionRecord::new(
        text("section").unwrap_or_else(|| DEFAULT_SECTION.to_string()),
        text("content").unwrap_or_default(),
        text("question").unwrap_or_default(),
        options,
        text("answer").unwrap_or_else(|| DEFAULT_ANSWER.to_string()),
        text("note").unwrap_or_default(),
    ))
}

/// Convert a JSON scalar to text (numbers and bools are stringified, null is None)
fn json_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::options::Choice;

    #[test]
    fn test_parse_wrapped_in_prose() {
        let raw = r#"Here is your exam: [{"section":"Kanji","content":"","question":"Pick reading","options":["あ","い","う","え"],"answer":"B","note":""}] Thanks!"#;

        let parsed = parse_exam(raw).unwrap();
        assert_eq!(parsed.exam.len(), 1);
        let q = &parsed.exam.questions()[0];
        assert_eq!(q.section(), "Kanji");
        assert_eq!(q.options().as_slice(), &["あ", "い", "う", "え"]);
        assert_eq!(q.answer(), "B");
        assert!(q.is_correct(Choice::B));
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_no_brackets_is_no_array() {
        assert_eq!(
            parse_exam("Sorry, I cannot help with that."),
            Err(ParseError::NoArray)
        );
        assert_eq!(parse_exam(""), Err(ParseError::NoArray));
        assert_eq!(parse_exam("] backwards ["), Err(ParseError::NoArray));
    }

    #[test]
    fn test_invalid_json_between_brackets() {
        let result = parse_exam("[{section: Kanji}]");
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_two_arrays_confuse_greedy_extraction() {
        let result = parse_exam(r#"[{"question":"a"}] and also [{"question":"b"}]"#);
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_fenced_code_block() {
        let raw = "```json\n[{\"question\":\"Q1\",\"answer\":\"d\"}]\n```";
        let parsed = parse_exam(raw).unwrap();
        assert_eq!(parsed.exam.questions()[0].answer(), "D");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let parsed = parse_exam(r#"[{"question":"Only a question"}]"#).unwrap();
        let q = &parsed.exam.questions()[0];
        assert_eq!(q.section(), DEFAULT_SECTION);
        assert_eq!(q.content(), "");
        assert_eq!(q.note(), "");
        assert_eq!(q.answer(), DEFAULT_ANSWER);
        assert_eq!(q.options(), &AnswerOptions::placeholders());
    }

    #[test]
    fn test_short_options_are_padded() {
        let parsed = parse_exam(r#"[{"options":["一","二"]}]"#).unwrap();
        assert_eq!(
            parsed.exam.questions()[0].options().as_slice(),
            &["一", "二", "N/A", "N/A"]
        );
    }

    #[test]
    fn test_options_as_delimited_string() {
        let parsed = parse_exam(r#"[{"options":"バスで|電車で|自転車で"}]"#).unwrap();
        assert_eq!(
            parsed.exam.questions()[0].options().as_slice(),
            &["バスで", "電車で", "自転車で", "N/A"]
        );
    }

    #[test]
    fn test_options_as_encoded_json_string() {
        let parsed = parse_exam(r#"[{"options":"[\"a\",\"b\",\"c\",\"d\"]"}]"#).unwrap();
        assert_eq!(
            parsed.exam.questions()[0].options().as_slice(),
            &["a", "b", "c", "d"]
        );
    }

    #[test]
    fn test_non_object_elements_are_rejected_not_fatal() {
        let parsed = parse_exam(r#"[{"question":"ok"}, 42, "text"]"#).unwrap();
        assert_eq!(parsed.exam.len(), 1);
        assert_eq!(
            parsed.rejected,
            vec![
                RecordDecodeError::NotAnObject {
                    index: 1,
                    found: "number"
                },
                RecordDecodeError::NotAnObject {
                    index: 2,
                    found: "string"
                },
            ]
        );
    }

    #[test]
    fn test_empty_array_parses_to_empty_exam() {
        let parsed = parse_exam("[]").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_value_that_is_not_an_array() {
        let value = serde_json::json!({"questions": []});
        assert_eq!(parse_exam_value(&value), Err(ParseError::NotAnArray));
    }

    #[test]
    fn test_numeric_fields_are_stringified() {
        let parsed = parse_exam(r#"[{"section":"Grammar","question":7,"note":null}]"#).unwrap();
        let q = &parsed.exam.questions()[0];
        assert_eq!(q.question(), "7");
        assert_eq!(q.note(), "");
    }

    #[test]
    fn test_order_is_preserved() {
        let parsed =
            parse_exam(r#"[{"question":"1"},{"question":"2"},{"question":"3"}]"#).unwrap();
        let order: Vec<_> = parsed.exam.questions().iter().map(|q| q.question()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
    }
}
