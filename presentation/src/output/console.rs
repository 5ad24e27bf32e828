//! Console formatting for exam units, feedback and reports
//!
//! Every function returns a `String`; printing is left to the caller.

use colored::Colorize;
use mock_exam_application::SessionNotice;
use mock_exam_domain::{AnswerOptions, Choice, Feedback, Presentation, SessionReport};

/// Formats session output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// `--- Question 3 [Grammar] ---` or `--- Question 4 to 6 [Listening] ---`
    pub fn unit_header(presentation: &Presentation<'_>) -> String {
        let (first, last) = (presentation.first_number(), presentation.last_number());
        let range = if first == last {
            format!("Question {}", first)
        } else {
            format!("Question {} to {}", first, last)
        };
        format!("--- {} [{}] ---", range, presentation.section())
    }

    /// Full text of a unit as shown before any input is read.
    ///
    /// Listening blocks list their sub-questions but not the transcript.
    pub fn format_unit(presentation: &Presentation<'_>) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n",
            Self::unit_header(presentation).cyan().bold()
        ));

        if presentation.unit.is_listening_block() {
            output.push_str(&format!(
                "{}\n",
                "Listen to the conversation, then answer the questions below.".dimmed()
            ));
            for (position, record) in presentation.questions.iter().enumerate() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    format!("{}.", Self::sub_question_label(position)).bold(),
                    record.question()
                ));
                output.push_str(&Self::indent(&Self::options(record.options()), "   "));
                output.push('\n');
            }
            return output;
        }

        if let Some(record) = presentation.questions.first() {
            if !record.content().trim().is_empty() {
                let label = if record.is_reading() {
                    "Reading Passage:"
                } else {
                    "Content:"
                };
                output.push_str(&format!("\n{}\n{}\n", label.yellow().bold(), record.content()));
            }
            output.push_str(&format!("\n{}\n", record.question().bold()));
            output.push_str(&Self::options(record.options()));
            output.push('\n');
        }
        output
    }

    /// Options laid out two per line: `A: ..    B: ..` / `C: ..    D: ..`
    pub fn options(options: &AnswerOptions) -> String {
        let cell = |choice: Choice| format!("{}: {}", choice, options.get(choice));
        format!(
            "{}    {}\n{}    {}",
            cell(Choice::A),
            cell(Choice::B),
            cell(Choice::C),
            cell(Choice::D)
        )
    }

    /// Letter naming the `position`-th sub-question of a block (A, B, C, ...).
    pub fn sub_question_label(position: usize) -> char {
        char::from(b'A' + (position % 26) as u8)
    }

    pub fn block_actions() -> String {
        format!(
            "{} | {} | {}",
            "[1] Play Audio (ONCE)".green(),
            "[2] Show Transcript".yellow(),
            "[3] Start Answering".cyan()
        )
    }

    pub fn transcript(transcript: &str) -> String {
        format!("\n{}\n{}\n", "Transcript:".yellow().bold(), transcript)
    }

    pub fn notice(notice: &SessionNotice) -> String {
        match notice {
            SessionNotice::NarrationStarted => format!("{}", "Playing audio...".green()),
            SessionNotice::NarrationAlreadyUsed => {
                format!("{}", "Audio can only be played once.".yellow())
            }
            SessionNotice::NarrationFailed(reason) => {
                format!("{} {}", "Audio unavailable:".red(), reason)
            }
        }
    }

    /// Verdict, canonical answer and explanation. The answer and the
    /// explanation line are shown whether or not the choice was right.
    pub fn feedback(feedback: &Feedback<'_>) -> String {
        let verdict = if feedback.correct {
            "Correct!".green().bold()
        } else {
            "Wrong!".red().bold()
        };
        format!(
            "{} {}\n{} {}",
            verdict,
            format!("Correct answer: {}", feedback.correct_answer).yellow(),
            "Explanation:".dimmed(),
            feedback.note
        )
    }

    /// Final score line. An aborted session is labelled as partial; its
    /// total is still the full exam length.
    pub fn report(report: &SessionReport) -> String {
        let line = "=".repeat(40);
        let body = if report.is_aborted() {
            format!(
                "{}",
                format!(
                    "Session ended early: {}/{} (answered {})",
                    report.score, report.total, report.answered
                )
                .yellow()
                .bold()
            )
        } else {
            format!(
                "{}",
                format!("Final Score: {}/{}", report.score, report.total)
                    .green()
                    .bold()
            )
        };
        format!("{}\n{}\n{}", line.cyan(), body, line.cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
