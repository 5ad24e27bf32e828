//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod exam_generator;
pub mod exam_repository;
pub mod narrator;
pub mod progress;
pub mod session_interaction;
