//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown exam kind: {0}")]
    InvalidExamKind(String),

    #[error("Invalid {kind} level: {level}")]
    InvalidLevel { kind: &'static str, level: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_display() {
        let error = DomainError::InvalidLevel {
            kind: "JLPT",
            level: "N9".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid JLPT level: N9");
    }

    #[test]
    fn test_invalid_kind_display() {
        let error = DomainError::InvalidExamKind("toeic".to_string());
        assert_eq!(error.to_string(), "Unknown exam kind: toeic");
    }
}
