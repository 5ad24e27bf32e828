//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for mock-exam
#[derive(Parser, Debug)]
#[command(name = "mock-exam")]
#[command(author, version, about = "Japanese mock exams (JLPT / JPT) generated on demand")]
#[command(long_about = r#"
Generates Japanese proficiency mock exams with an OpenAI-compatible model,
saves them as CSV, and runs them interactively in the terminal. Listening
questions are narrated with the system text-to-speech engine.

Configuration files are loaded from (in priority order):
1. MOCK_EXAM_* environment variables
2. --config <path>          Explicit config file
3. <data_dir>/config.toml   Credentials saved from the menu
4. ~/.config/mock-exam/config.toml   Global config

Example:
  mock-exam
  mock-exam --data-dir ~/exams --no-narration
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for saved exams, logs and credentials
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable narration of listening questions
    #[arg(long)]
    pub no_narration: bool,

    /// Show a plain progress line instead of a spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Write logs to stderr instead of the log file
    #[arg(long)]
    pub log_stderr: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
