//! Presentation layer for mock-exam
//!
//! This crate contains the CLI definition, numbered menus, the console
//! session, output formatting, and generation progress display.

pub mod cli;
pub mod console;
pub mod menu;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use console::{ConsoleInput, ConsoleSessionInteraction};
pub use menu::{CredentialInput, CredentialPrompt, GenerationDialog, MainMenu, MenuChoice};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{GenerationSpinner, SimpleProgress};
