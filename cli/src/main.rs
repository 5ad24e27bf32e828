//! CLI entrypoint for mock-exam
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then runs the numbered menu until the user exits
//! or standard input closes.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use mock_exam_application::{
    DisabledNarrator, ExamGenerator, ExamSessionOrchestrator, FlowOutcome, GenerateExamUseCase,
    GenerationProgress, InteractionError, Narrator, RunSessionUseCase,
};
use mock_exam_infrastructure::{
    ApiCredentials, ConfigLoader, CredentialStore, CsvExamRepository, FileApiConfig,
    FileStorageConfig, GenerationSettings, OpenAiExamGenerator, SystemNarrator,
};
use mock_exam_presentation::{
    Cli, ConsoleInput, ConsoleSessionInteraction, CredentialPrompt, GenerationDialog,
    GenerationSpinner, MainMenu, MenuChoice, SimpleProgress,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "mock-exam.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load(cli.config.as_ref(), cli.data_dir.as_deref())
        .context("Failed to load configuration")?;

    if cli.show_config {
        ConfigLoader::print_config_sources(&config, cli.config.as_ref());
        return Ok(());
    }

    // Held for the life of main so buffered log lines are flushed on exit
    let _log_guard = init_logging(&cli, &config.storage)?;
    info!("Starting mock-exam (data dir {})", config.storage.data_dir.display());

    let input = Arc::new(ConsoleInput::stdin());
    let credential_prompt = CredentialPrompt::new(input.clone());
    let credential_store = CredentialStore::new(config.storage.credential_path());

    // First run: no key from any source
    let credentials = match config.api.credentials() {
        Some(credentials) => credentials,
        None => {
            println!("{}", "No API configuration found.".yellow());
            match prompt_credentials(&credential_prompt, &credential_store, &config.api)? {
                Some(credentials) => credentials,
                None => return Ok(()),
            }
        }
    };

    // === Dependency Injection ===
    let repository = Arc::new(CsvExamRepository::new(config.storage.questions_dir()));
    let narrator: Arc<dyn Narrator> = if cli.no_narration || !config.session.narration {
        info!("Narration disabled");
        Arc::new(DisabledNarrator)
    } else {
        Arc::new(SystemNarrator::detect())
    };
    let progress: Arc<dyn GenerationProgress> = if cli.quiet {
        Arc::new(SimpleProgress)
    } else {
        Arc::new(GenerationSpinner::new())
    };

    let generate = GenerateExamUseCase::new(
        build_generator(credentials, &config.api),
        repository.clone(),
    )
    .with_progress(progress);
    let run_session =
        RunSessionUseCase::new(narrator).with_params(config.session.to_session_params());
    let mut orchestrator = ExamSessionOrchestrator::new(generate, run_session, repository);

    let menu = MainMenu::new(input.clone());
    let dialog = GenerationDialog::new(input.clone());
    let session = ConsoleSessionInteraction::new(input.clone());
    let mut has_credentials = true;

    loop {
        let Some(choice) = until_closed(menu.read_choice())? else {
            break;
        };

        match choice {
            MenuChoice::Generate => {
                if !has_credentials {
                    match prompt_credentials(&credential_prompt, &credential_store, &config.api)? {
                        Some(credentials) => {
                            orchestrator.set_generator(build_generator(credentials, &config.api));
                            has_credentials = true;
                        }
                        None => break,
                    }
                }
                let Some(request) = until_closed(dialog.run())? else {
                    break;
                };
                let outcome = orchestrator.generate_and_run(&request, &session).await?;
                show_outcome(outcome);
            }
            MenuChoice::LoadSaved => {
                let saved = match orchestrator.saved_exams() {
                    Ok(saved) => saved,
                    Err(e) => {
                        println!("{} {}", "Could not list saved exams:".red(), e);
                        continue;
                    }
                };
                let Some(selected) = until_closed(menu.select_saved(&saved, "load"))? else {
                    break;
                };
                if let Some(selected) = selected {
                    let outcome = orchestrator.load_and_run(&selected, &session).await?;
                    show_outcome(outcome);
                }
            }
            MenuChoice::DeleteSaved => {
                let saved = match orchestrator.saved_exams() {
                    Ok(saved) => saved,
                    Err(e) => {
                        println!("{} {}", "Could not list saved exams:".red(), e);
                        continue;
                    }
                };
                let Some(selected) = until_closed(menu.select_saved(&saved, "delete"))? else {
                    break;
                };
                if let Some(selected) = selected {
                    match orchestrator.delete_saved(&selected) {
                        Ok(()) => println!("{} {}", "Deleted".green(), selected),
                        Err(e) => println!("{} {}", "Could not delete exam:".red(), e),
                    }
                }
            }
            MenuChoice::UpdateApiConfig => {
                match prompt_credentials(&credential_prompt, &credential_store, &config.api)? {
                    Some(credentials) => {
                        orchestrator.set_generator(build_generator(credentials, &config.api));
                        has_credentials = true;
                    }
                    None => break,
                }
            }
            MenuChoice::DeleteApiConfig => match credential_store.delete() {
                Ok(true) => {
                    println!("{}", "API configuration deleted.".green());
                    has_credentials = false;
                }
                Ok(false) => println!("{}", "No API configuration file found.".yellow()),
                Err(e) => println!("{} {}", "Could not delete API configuration:".red(), e),
            },
            MenuChoice::Exit => break,
        }
    }

    info!("Exiting");
    println!("Goodbye!");
    Ok(())
}

/// Set up tracing. Logs go to `<data_dir>/logs/mock-exam.log` unless
/// `--log-stderr` is given, since stdout belongs to the exam.
fn init_logging(cli: &Cli, storage: &FileStorageConfig) -> Result<Option<WorkerGuard>> {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        match cli.verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        }
    };

    if cli.log_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    let logs_dir = storage.logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;
    let appender = tracing_appender::rolling::never(&logs_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn build_generator(credentials: ApiCredentials, api: &FileApiConfig) -> Arc<dyn ExamGenerator> {
    Arc::new(OpenAiExamGenerator::new(
        credentials,
        GenerationSettings::from(api),
    ))
}

/// Ask for credentials and persist them. `None` means input closed.
fn prompt_credentials(
    prompt: &CredentialPrompt,
    store: &CredentialStore,
    api: &FileApiConfig,
) -> Result<Option<ApiCredentials>> {
    let Some(entered) = until_closed(prompt.run(&api.base_url, &api.model))? else {
        return Ok(None);
    };
    let credentials = ApiCredentials {
        api_key: entered.api_key,
        base_url: entered.base_url,
        model: entered.model,
    };
    match store.write(&credentials) {
        Ok(()) => println!(
            "{} {}",
            "API configuration saved to".green(),
            store.path().display()
        ),
        Err(e) => {
            warn!("Could not save API configuration: {}", e);
            println!(
                "{} {} (using it for this run only)",
                "Could not save API configuration:".red(),
                e
            );
        }
    }
    Ok(Some(credentials))
}

/// Treat a closed input stream as a request to exit.
fn until_closed<T>(result: Result<T, InteractionError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InteractionError::Closed) => {
            info!("Input closed");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn show_outcome(outcome: FlowOutcome) {
    match outcome {
        FlowOutcome::Finished { saved, .. } => match saved {
            Some(Ok(saved)) => println!("{} {}", "Exam saved as".green(), saved),
            Some(Err(e)) => println!("{} {}", "Exam could not be saved:".red(), e),
            None => {}
        },
        FlowOutcome::NotStarted(reason) => {
            println!("{}", reason.to_string().red());
        }
    }
}
