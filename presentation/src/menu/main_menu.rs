//! Main menu and saved-exam selection
//!
//! ```text
//! ==============================
//!   Japanese Mock Exam
//! ==============================
//! 1. Generate New Exam
//! 2. Load Saved Exam
//! 3. Delete Saved Exam
//! 4. Update API Configuration
//! 5. Delete API Configuration
//! 6. Exit
//! ```

use crate::console::input::ConsoleInput;
use colored::Colorize;
use mock_exam_application::{InteractionError, SavedExam};
use std::sync::Arc;
use tracing::debug;

/// Top-level actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Generate,
    LoadSaved,
    DeleteSaved,
    UpdateApiConfig,
    DeleteApiConfig,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Generate,
        MenuChoice::LoadSaved,
        MenuChoice::DeleteSaved,
        MenuChoice::UpdateApiConfig,
        MenuChoice::DeleteApiConfig,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Generate => "Generate New Exam",
            MenuChoice::LoadSaved => "Load Saved Exam",
            MenuChoice::DeleteSaved => "Delete Saved Exam",
            MenuChoice::UpdateApiConfig => "Update API Configuration",
            MenuChoice::DeleteApiConfig => "Delete API Configuration",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Parse a 1-based menu number.
    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }
}

/// Result of picking from a numbered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// 0-based index into the list
    Index(usize),
    /// `q` entered
    Cancel,
    /// Out of range or not a number
    Invalid,
}

impl Selection {
    pub fn parse(input: &str, len: usize) -> Self {
        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Selection::Cancel;
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Selection::Index(n - 1),
            _ => Selection::Invalid,
        }
    }
}

pub struct MainMenu {
    input: Arc<ConsoleInput>,
}

impl MainMenu {
    pub fn new(input: Arc<ConsoleInput>) -> Self {
        Self { input }
    }

    fn display(&self) {
        let line = "=".repeat(30);
        println!();
        println!("{}", line.cyan());
        println!("{}", "  Japanese Mock Exam".bold());
        println!("{}", line.cyan());
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            println!("{}. {}", i + 1, choice.label());
        }
    }

    /// Show the menu until a valid choice is entered.
    pub fn read_choice(&self) -> Result<MenuChoice, InteractionError> {
        loop {
            self.display();
            if let Some(choice) = MenuChoice::parse(&self.input.read_line("Select>")?) {
                debug!("Menu choice: {:?}", choice);
                return Ok(choice);
            }
            println!("{}", "Invalid choice.".yellow());
        }
    }

    /// List saved exams and let the user pick one.
    ///
    /// Returns `None` for an empty list, a cancel, or an invalid pick.
    pub fn select_saved(
        &self,
        saved: &[SavedExam],
        verb: &str,
    ) -> Result<Option<SavedExam>, InteractionError> {
        if saved.is_empty() {
            println!("{}", "No saved exams found.".yellow());
            return Ok(None);
        }

        println!();
        println!("{}", "Saved exams:".cyan().bold());
        for (i, exam) in saved.iter().enumerate() {
            println!("  {}. {}", i + 1, exam);
        }

        let prompt = format!("Select an exam to {} (q to cancel)>", verb);
        match Selection::parse(&self.input.read_line(&prompt)?, saved.len()) {
            Selection::Index(i) => Ok(saved.get(i).cloned()),
            Selection::Cancel | Selection::Invalid => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn menu(script: &str) -> MainMenu {
        MainMenu::new(Arc::new(ConsoleInput::from_reader(Cursor::new(
            script.to_string(),
        ))))
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Generate));
        assert_eq!(MenuChoice::parse(" 6 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("2", 3), Selection::Index(1));
        assert_eq!(Selection::parse("Q", 3), Selection::Cancel);
        assert_eq!(Selection::parse("4", 3), Selection::Invalid);
        assert_eq!(Selection::parse("0", 3), Selection::Invalid);
        assert_eq!(Selection::parse("two", 3), Selection::Invalid);
    }

    #[test]
    fn test_invalid_choice_redisplays() {
        assert_eq!(menu("9\n\n3\n").read_choice().unwrap(), MenuChoice::DeleteSaved);
    }

    #[test]
    fn test_select_saved() {
        let saved = vec![SavedExam::new("JLPT_N3_a.csv"), SavedExam::new("JPT_650_b.csv")];
        assert_eq!(
            menu("2\n").select_saved(&saved, "load").unwrap(),
            Some(SavedExam::new("JPT_650_b.csv"))
        );
        assert_eq!(menu("5\n").select_saved(&saved, "load").unwrap(), None);
        assert_eq!(menu("q\n").select_saved(&saved, "delete").unwrap(), None);
        // An empty list asks nothing
        assert_eq!(menu("").select_saved(&[], "load").unwrap(), None);
    }
}
