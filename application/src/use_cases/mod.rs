//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod generate_exam;
pub mod orchestrator;
pub mod run_session;
