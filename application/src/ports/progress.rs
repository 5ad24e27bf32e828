//! Progress notification port
//!
//! Defines the interface for reporting progress while an exam is generated.

use mock_exam_domain::GenerationRequest;

/// Callback for progress updates during exam generation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, ...)
pub trait GenerationProgress: Send + Sync {
    /// Called before the generator is contacted
    fn on_request_start(&self, request: &GenerationRequest);

    /// Called when the generator returned (successfully or not)
    fn on_request_complete(&self, success: bool);

    /// Called after the raw text was parsed
    fn on_parse_complete(&self, _accepted: usize, _rejected: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GenerationProgress for NoProgress {
    fn on_request_start(&self, _request: &GenerationRequest) {}
    fn on_request_complete(&self, _success: bool) {}
}
