//! Generation settings dialogue
//!
//! Collects exam kind, level and (optionally) per-section sizes, shows a
//! summary, and asks for confirmation.

use crate::console::input::ConsoleInput;
use colored::Colorize;
use mock_exam_application::InteractionError;
use mock_exam_domain::{ExamKind, GenerationRequest, GroupSize, SectionLayout};
use std::sync::Arc;

/// Largest count accepted for a section or group dimension.
pub const MAX_SECTION_COUNT: u32 = 100;

/// Parse a section count; anything invalid or above [`MAX_SECTION_COUNT`]
/// keeps `current`.
pub fn parse_count(input: &str, current: u32) -> u32 {
    input
        .trim()
        .parse()
        .ok()
        .filter(|count| *count <= MAX_SECTION_COUNT)
        .unwrap_or(current)
}

/// Parse `groups per_group`; both must be valid or `current` is kept.
pub fn parse_group(input: &str, current: GroupSize) -> GroupSize {
    let mut numbers = input
        .split(|c: char| c.is_whitespace() || c == 'x' || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<u32>);
    match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(Ok(groups)), Some(Ok(per_group)), None)
            if groups <= MAX_SECTION_COUNT && per_group <= MAX_SECTION_COUNT =>
        {
            GroupSize::new(groups, per_group)
        }
        _ => current,
    }
}

fn parse_kind(input: &str) -> Option<ExamKind> {
    match input.trim() {
        "1" => Some(ExamKind::Jlpt),
        "2" => Some(ExamKind::Jpt),
        other => other.parse().ok(),
    }
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub struct GenerationDialog {
    input: Arc<ConsoleInput>,
}

impl GenerationDialog {
    pub fn new(input: Arc<ConsoleInput>) -> Self {
        Self { input }
    }

    /// Run the dialogue until the user confirms a request.
    pub fn run(&self) -> Result<GenerationRequest, InteractionError> {
        loop {
            let request = self.collect()?;
            println!();
            println!("{}", Self::summary(&request));
            let answer = self.input.read_line("Generate this exam? (Y/n)>")?;
            if answer.trim().is_empty() || is_yes(&answer) {
                return Ok(request);
            }
            println!("{}", "Let's start over.".yellow());
        }
    }

    fn collect(&self) -> Result<GenerationRequest, InteractionError> {
        println!();
        println!("{}", "Select exam type:".cyan().bold());
        println!("1. JLPT");
        println!("2. JPT");
        let kind = self
            .input
            .read_until("Exam>", "Please enter 1 or 2.", parse_kind)?;

        let level = self.input.read_until(
            &format!("Level ({})>", kind.level_hint()),
            &format!("Invalid level. Expected {}.", kind.level_hint()),
            |s| kind.parse_level(s).ok(),
        )?;

        let mut layout = SectionLayout::default_for(kind);
        let customize = self.input.read_line("Customize section sizes? (y/N)>")?;
        if is_yes(&customize) {
            layout = self.customize(layout)?;
        }
        Ok(GenerationRequest::new(kind, level).with_layout(layout))
    }

    fn customize(&self, mut layout: SectionLayout) -> Result<SectionLayout, InteractionError> {
        println!(
            "{}",
            "Press Enter to keep a default. Groups are entered as `groups per_group`.".dimmed()
        );
        if let Some(kanji) = layout.kanji {
            layout.kanji = Some(self.count("Kanji", kanji)?);
        }
        if let Some(vocabulary) = layout.vocabulary {
            layout.vocabulary = Some(self.count("Vocabulary", vocabulary)?);
        }
        layout.grammar = self.count("Grammar", layout.grammar)?;
        layout.reading_short = self.group("Reading (Short)", layout.reading_short)?;
        layout.reading_long = self.group("Reading (Long)", layout.reading_long)?;
        layout.listening = self.group("Listening", layout.listening)?;
        Ok(layout)
    }

    fn count(&self, section: &str, current: u32) -> Result<u32, InteractionError> {
        let line = self
            .input
            .read_line(&format!("{} questions [{}]>", section, current))?;
        Ok(parse_count(&line, current))
    }

    fn group(&self, section: &str, current: GroupSize) -> Result<GroupSize, InteractionError> {
        let line = self.input.read_line(&format!(
            "{} [{} x {}]>",
            section, current.groups, current.per_group
        ))?;
        Ok(parse_group(&line, current))
    }

    /// Human-readable summary of a request.
    pub fn summary(request: &GenerationRequest) -> String {
        let layout = &request.layout;
        let mut lines = vec![format!(
            "{} {} {}",
            "Exam:".cyan().bold(),
            request.kind,
            request.level
        )];
        if let Some(kanji) = layout.kanji {
            lines.push(format!("  Kanji: {}", kanji));
        }
        if let Some(vocabulary) = layout.vocabulary {
            lines.push(format!("  Vocabulary: {}", vocabulary));
        }
        lines.push(format!("  Grammar: {}", layout.grammar));
        for (name, group) in [
            ("Reading (Short)", layout.reading_short),
            ("Reading (Long)", layout.reading_long),
            ("Listening", layout.listening),
        ] {
            lines.push(format!(
                "  {}: {} x {}",
                name, group.groups, group.per_group
            ));
        }
        lines.push(format!("  Total questions: {}", layout.total_questions()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn dialog(script: &str) -> GenerationDialog {
        GenerationDialog::new(Arc::new(ConsoleInput::from_reader(Cursor::new(
            script.to_string(),
        ))))
    }

    #[test]
    fn test_parse_count_keeps_default_on_garbage() {
        assert_eq!(parse_count("8", 5), 8);
        assert_eq!(parse_count("", 5), 5);
        assert_eq!(parse_count("many", 5), 5);
        assert_eq!(parse_count("4294967295", 5), 5);
    }

    #[test]
    fn test_parse_group_needs_both_numbers() {
        let current = GroupSize::new(2, 5);
        assert_eq!(parse_group("3 4", current), GroupSize::new(3, 4));
        assert_eq!(parse_group("3x4", current), GroupSize::new(3, 4));
        assert_eq!(parse_group("3", current), current);
        assert_eq!(parse_group("3 a", current), current);
        assert_eq!(parse_group("", current), current);
        assert_eq!(parse_group("100000 100000", current), current);
    }

    #[test]
    fn test_defaults_with_level_reprompt() {
        // kind, bad level, good level, no customization, confirm
        let request = dialog("1\nN6\nn2\n\ny\n").run().unwrap();
        assert_eq!(request.kind, ExamKind::Jlpt);
        assert_eq!(request.level.as_str(), "N2");
        assert_eq!(request.layout, SectionLayout::default_for(ExamKind::Jlpt));
    }

    #[test]
    fn test_customized_jpt_layout() {
        // JPT skips kanji/vocabulary prompts
        let request = dialog("2\n650\ny\n12\n\n1 4\n3\n\n").run().unwrap();
        assert_eq!(request.kind, ExamKind::Jpt);
        assert_eq!(request.layout.grammar, 12);
        assert_eq!(request.layout.reading_short, GroupSize::new(2, 3));
        assert_eq!(request.layout.reading_long, GroupSize::new(1, 4));
        assert_eq!(request.layout.listening, GroupSize::new(2, 5));
    }

    #[test]
    fn test_declining_restarts() {
        let request = dialog("1\nN5\n\nn\n2\n400\n\n\n").run().unwrap();
        assert_eq!(request.kind, ExamKind::Jpt);
        assert_eq!(request.level.as_str(), "400");
    }

    #[test]
    fn test_summary_total() {
        let request = GenerationRequest::new(
            ExamKind::Jlpt,
            ExamKind::Jlpt.parse_level("N3").unwrap(),
        );
        assert!(GenerationDialog::summary(&request).contains("Total questions: 36"));
    }
}
