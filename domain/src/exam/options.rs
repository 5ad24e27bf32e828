//! Answer options value object
//!
//! Every question carries exactly four choices at fixed positions A–D.
//! Short or malformed option lists are repaired by padding with
//! [`OPTION_PLACEHOLDER`] instead of being rejected.

use serde::{Deserialize, Serialize};

/// Number of answer choices per question.
pub const OPTION_COUNT: usize = 4;

/// Filler used for missing choices.
pub const OPTION_PLACEHOLDER: &str = "N/A";

/// Legacy separator for options stored as plain text.
pub const LEGACY_OPTION_DELIMITER: char = '|';

/// The four answer choices of a question, in A–D order (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AnswerOptions([String; OPTION_COUNT]);

impl AnswerOptions {
    /// Four placeholders.
    pub fn placeholders() -> Self {
        Self(std::array::from_fn(|_| OPTION_PLACEHOLDER.to_string()))
    }

    /// Normalize an arbitrary list into exactly four choices.
    ///
    /// Entries beyond the fourth are dropped, missing ones become placeholders.
    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = items.into_iter();
        Self(std::array::from_fn(|_| {
            iter.next()
                .map(Into::into)
                .unwrap_or_else(|| OPTION_PLACEHOLDER.to_string())
        }))
    }

    /// Decode options from their text form.
    ///
    /// Accepts a JSON array of strings (the stored encoding) and falls back to
    /// splitting on [`LEGACY_OPTION_DELIMITER`] for anything else.
    pub fn from_encoded(text: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(serde_json::Value::Array(values)) => Self::from_json_values(&values),
            _ => Self::from_delimited(text),
        }
    }

    /// Split a legacy `a|b|c|d` string.
    pub fn from_delimited(text: &str) -> Self {
        Self::from_list(text.split(LEGACY_OPTION_DELIMITER))
    }

    /// Build from JSON array elements; non-string scalars are stringified.
    pub fn from_json_values(values: &[serde_json::Value]) -> Self {
        Self::from_list(values.iter().map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => OPTION_PLACEHOLDER.to_string(),
            other => other.to_string(),
        }))
    }

    /// Compact JSON array encoding used by the exam store.
    pub fn encode(&self) -> String {
        // Serializing a list of strings cannot fail.
        serde_json::to_string(&self.0).unwrap_or_default()
    }

    /// Choice text at the given position.
    pub fn get(&self, choice: Choice) -> &str {
        &self.0[choice.index()]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate choices paired with their letters.
    pub fn iter(&self) -> impl Iterator<Item = (Choice, &str)> {
        Choice::ALL
            .into_iter()
            .zip(self.0.iter().map(String::as_str))
    }
}

impl Default for AnswerOptions {
    fn default() -> Self {
        Self::placeholders()
    }
}

impl From<Vec<String>> for AnswerOptions {
    fn from(items: Vec<String>) -> Self {
        Self::from_list(items)
    }
}

impl From<AnswerOptions> for Vec<String> {
    fn from(options: AnswerOptions) -> Self {
        options.0.into()
    }
}

/// One of the four answer letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub const ALL: [Choice; OPTION_COUNT] = [Choice::A, Choice::B, Choice::C, Choice::D];

    pub fn index(self) -> usize {
        match self {
            Choice::A => 0,
            Choice::B => 1,
            Choice::C => 2,
            Choice::D => 3,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Choice::A => 'A',
            Choice::B => 'B',
            Choice::C => 'C',
            Choice::D => 'D',
        }
    }

    /// Parse a letter, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Choice::A),
            "B" => Some(Choice::B),
            "C" => Some(Choice::C),
            "D" => Some(Choice::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_list_is_padded_in_order() {
        let options = AnswerOptions::from_list(["バス", "電車"]);
        assert_eq!(options.as_slice(), &["バス", "電車", "N/A", "N/A"]);
    }

    #[test]
    fn test_empty_list_is_all_placeholders() {
        let options = AnswerOptions::from_list(Vec::<String>::new());
        assert_eq!(options, AnswerOptions::placeholders());
    }

    #[test]
    fn test_long_list_keeps_first_four() {
        let options = AnswerOptions::from_list(["1", "2", "3", "4", "5"]);
        assert_eq!(options.as_slice(), &["1", "2", "3", "4"]);
    }

    #[test]
    fn test_encode_survives_delimiters() {
        let options = AnswerOptions::from_list(["a|b", "c,d", "\"quoted\"", "line\nbreak"]);
        let decoded = AnswerOptions::from_encoded(&options.encode());
        assert_eq!(decoded, options);
    }

    #[test]
    fn test_legacy_pipe_fallback() {
        let options = AnswerOptions::from_encoded("あ|い|う");
        assert_eq!(options.as_slice(), &["あ", "い", "う", "N/A"]);
    }

    #[test]
    fn test_json_scalars_are_stringified() {
        let options = AnswerOptions::from_encoded("[1, 2.5, null]");
        assert_eq!(options.as_slice(), &["1", "2.5", "N/A", "N/A"]);
    }

    #[test]
    fn test_serde_as_plain_list() {
        let options: AnswerOptions = serde_json::from_str(r#"["x"]"#).unwrap();
        assert_eq!(options.get(Choice::A), "x");
        assert_eq!(options.get(Choice::D), OPTION_PLACEHOLDER);
        assert_eq!(
            serde_json::to_string(&options).unwrap(),
            r#"["x","N/A","N/A","N/A"]"#
        );
    }

    #[test]
    fn test_choice_parse_is_case_insensitive() {
        assert_eq!(Choice::parse("b"), Some(Choice::B));
        assert_eq!(Choice::parse(" D "), Some(Choice::D));
        assert_eq!(Choice::parse("E"), None);
        assert_eq!(Choice::parse(""), None);
    }
}
