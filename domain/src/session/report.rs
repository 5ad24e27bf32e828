//! Session outcome value objects

use serde::{Deserialize, Serialize};

/// How a session ended (or that it has not yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    InProgress,
    Completed,
    Aborted,
}

/// Final tally of a session.
///
/// `total` is always the full exam length, even when the user quit early;
/// `answered` tells how many records were actually graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    pub outcome: SessionOutcome,
}

impl SessionReport {
    pub fn is_complete(&self) -> bool {
        self.outcome == SessionOutcome::Completed
    }

    pub fn is_aborted(&self) -> bool {
        self.outcome == SessionOutcome::Aborted
    }
}

impl std::fmt::Display for SessionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.score, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_full_total() {
        let report = SessionReport {
            score: 1,
            total: 30,
            answered: 2,
            outcome: SessionOutcome::Aborted,
        };
        assert_eq!(report.to_string(), "1/30");
        assert!(report.is_aborted());
        assert!(!report.is_complete());
    }
}
