//! Exam session domain.
//!
//! - [`machine::SessionMachine`]: state machine for one exam attempt
//! - [`report::SessionReport`]: final tally of an attempt

pub mod machine;
pub mod report;
