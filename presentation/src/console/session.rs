//! Console adapter for [`SessionInteraction`].
//!
//! # User Interface
//!
//! ```text
//! --- Question 4 to 5 [Listening] ---
//! Listen to the conversation, then answer the questions below.
//!
//! A. 男の人はどこへ行きますか。
//!    A: 駅    B: 学校
//!    C: 病院    D: 銀行
//! ...
//! [1] Play Audio (ONCE) | [2] Show Transcript | [3] Start Answering
//! action>
//! ```

use crate::console::input::ConsoleInput;
use crate::output::console::ConsoleFormatter;
use async_trait::async_trait;
use colored::Colorize;
use mock_exam_application::{InteractionError, SessionInteraction, SessionNotice};
use mock_exam_domain::{
    AnswerInput, BlockAction, Feedback, Presentation, QUIT_TOKEN, QuestionRecord, SessionReport,
};
use std::sync::Arc;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Interactive session on stdin/stdout.
pub struct ConsoleSessionInteraction {
    input: Arc<ConsoleInput>,
    clear_between_units: bool,
}

impl ConsoleSessionInteraction {
    pub fn new(input: Arc<ConsoleInput>) -> Self {
        Self {
            input,
            clear_between_units: true,
        }
    }

    /// Keep earlier units on screen.
    pub fn without_clearing(mut self) -> Self {
        self.clear_between_units = false;
        self
    }

    fn answer_prompt(position: usize, in_block: bool) -> String {
        if in_block {
            format!(
                "Answer {} (A-D, {} to quit)>",
                ConsoleFormatter::sub_question_label(position),
                QUIT_TOKEN
            )
        } else {
            format!("Answer (A-D, {} to quit)>", QUIT_TOKEN)
        }
    }
}

#[async_trait]
impl SessionInteraction for ConsoleSessionInteraction {
    async fn session_started(&self, total_questions: usize) {
        if self.clear_between_units {
            print!("{}", CLEAR_SCREEN);
        }
        println!(
            "{}",
            format!("Starting exam: {} questions", total_questions)
                .cyan()
                .bold()
        );
        println!("{}", "Enter Q at any answer prompt to end early.".dimmed());
        println!();
    }

    async fn show_unit(&self, presentation: &Presentation<'_>) {
        println!("{}", ConsoleFormatter::format_unit(presentation));
    }

    async fn choose_block_action(&self) -> Result<BlockAction, InteractionError> {
        println!("{}", ConsoleFormatter::block_actions());
        self.input
            .read_until("action>", "Please enter 1, 2 or 3.", BlockAction::parse)
    }

    async fn show_transcript(&self, transcript: &str) {
        println!("{}", ConsoleFormatter::transcript(transcript));
    }

    async fn show_notice(&self, notice: &SessionNotice) {
        println!("{}", ConsoleFormatter::notice(notice));
    }

    async fn read_answer(
        &self,
        position: usize,
        _question: &QuestionRecord,
        in_block: bool,
    ) -> Result<AnswerInput, InteractionError> {
        self.input.read_until(
            &Self::answer_prompt(position, in_block),
            "Please enter A, B, C, D or Q.",
            AnswerInput::parse,
        )
    }

    async fn show_feedback(&self, feedback: &Feedback<'_>) {
        println!("{}", ConsoleFormatter::feedback(feedback));
        println!();
    }

    async fn finish_unit(&self) -> Result<(), InteractionError> {
        self.input.pause()?;
        if self.clear_between_units {
            print!("{}", CLEAR_SCREEN);
        }
        Ok(())
    }

    async fn show_report(&self, report: &SessionReport) {
        println!();
        println!("{}", ConsoleFormatter::report(report));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_exam_domain::{AnswerOptions, Choice};
    use std::io::Cursor;

    fn interaction(script: &str) -> ConsoleSessionInteraction {
        ConsoleSessionInteraction::new(Arc::new(ConsoleInput::from_reader(Cursor::new(
            script.to_string(),
        ))))
        .without_clearing()
    }

    fn question() -> QuestionRecord {
        QuestionRecord::new("Kanji", "", "q", AnswerOptions::placeholders(), "A", "")
    }

    #[tokio::test]
    async fn test_block_action_reprompts() {
        let console = interaction("9\nplay\n2\n");
        assert_eq!(
            console.choose_block_action().await.unwrap(),
            BlockAction::ShowTranscript
        );
    }

    #[tokio::test]
    async fn test_answer_accepts_letters_and_quit() {
        let console = interaction("e\n\nc\nq\n");
        assert_eq!(
            console.read_answer(0, &question(), false).await.unwrap(),
            AnswerInput::Choice(Choice::C)
        );
        assert_eq!(
            console.read_answer(1, &question(), true).await.unwrap(),
            AnswerInput::Quit
        );
    }

    #[tokio::test]
    async fn test_closed_input_surfaces() {
        let console = interaction("");
        assert_eq!(
            console.read_answer(0, &question(), false).await,
            Err(InteractionError::Closed)
        );
        assert_eq!(console.finish_unit().await, Err(InteractionError::Closed));
    }

    #[test]
    fn test_answer_prompt_names_sub_question() {
        assert!(ConsoleSessionInteraction::answer_prompt(1, true).starts_with("Answer B"));
        assert!(ConsoleSessionInteraction::answer_prompt(1, false).starts_with("Answer ("));
    }
}
