//! Progress reporting for exam generation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mock_exam_application::GenerationProgress;
use mock_exam_domain::GenerationRequest;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while the generator is working
pub struct GenerationSpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl GenerationSpinner {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for GenerationSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgress for GenerationSpinner {
    fn on_request_start(&self, request: &GenerationRequest) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("{} {}", request.kind, request.level));
        pb.set_message(format!(
            "Generating {} questions...",
            request.layout.total_questions()
        ));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_request_complete(&self, success: bool) {
        let Some(pb) = self.bar.lock().ok().and_then(|mut bar| bar.take()) else {
            return;
        };
        if success {
            pb.finish_with_message(format!("{}", "Exam received".green()));
        } else {
            pb.finish_with_message(format!("{}", "Generation failed".red()));
        }
    }

    fn on_parse_complete(&self, accepted: usize, rejected: usize) {
        if rejected > 0 {
            println!(
                "  {} {} questions parsed, {} skipped",
                "!".yellow(),
                accepted,
                rejected
            );
        } else {
            println!("  {} {} questions parsed", "v".green(), accepted);
        }
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl GenerationProgress for SimpleProgress {
    fn on_request_start(&self, request: &GenerationRequest) {
        println!(
            "{} Generating {} {} exam ({} questions)...",
            "->".cyan(),
            request.kind,
            request.level,
            request.layout.total_questions()
        );
    }

    fn on_request_complete(&self, success: bool) {
        if success {
            println!("  {} exam received", "v".green());
        } else {
            println!("  {} generation failed", "x".red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_exam_domain::ExamKind;

    #[test]
    fn test_spinner_lifecycle() {
        let spinner = GenerationSpinner::new();
        let request = GenerationRequest::new(
            ExamKind::Jpt,
            ExamKind::Jpt.parse_level("800").unwrap(),
        );
        spinner.on_request_start(&request);
        assert!(spinner.bar.lock().unwrap().is_some());
        spinner.on_request_complete(true);
        assert!(spinner.bar.lock().unwrap().is_none());
        // A second completion without a start is harmless
        spinner.on_request_complete(false);
    }
}
