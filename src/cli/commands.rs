//! CLI command implementations
//!
//! Each command builds its own tokio runtime and blocks on it. Output goes
//! to stdout as one JSON envelope; logs go to stderr.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::Notify;
use tracing::{debug, info};

use super::args::{Cli, Command, SchoolArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};
use crate::api::HttpSchoolApi;
use crate::config::ClientConfig;
use crate::directory::{DirectoryView, LoadState};
use crate::form::{FormController, SubmitOutcome, SUCCESS_MESSAGE};
use crate::observability::{init_logging, LogConfig};
use crate::schema::SchoolSchema;

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    // A missing subscriber only costs log lines.
    if let Err(e) = init_logging(LogConfig {
        verbose: cli.verbose,
        ansi: false,
    }) {
        eprintln!("{}", e);
    }

    let result = run_command(cli);
    if let Err(e) = &result {
        write_error(e)?;
    }
    result
}

/// Run a parsed command
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::List { search } => list(&config, &search),
        Command::Add(args) => add(&config, &args),
        Command::Validate(args) => validate(&args),
    }
}

/// Config file first, then the `--base-url` override
pub fn resolve_config(cli: &Cli) -> CliResult<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
        config.validate()?;
    }

    debug!(base_url = %config.base_url, "Configuration resolved");
    Ok(config)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::setup_failed(format!("Failed to create runtime: {}", e)))
}

/// List schools, optionally filtered by a search query
pub fn list(config: &ClientConfig, search: &str) -> CliResult<()> {
    let api = Arc::new(HttpSchoolApi::new(config)?);
    let view = DirectoryView::new(api, config);

    let rt = runtime()?;
    let state = rt.block_on(view.load());

    if let LoadState::Failed(message) = state {
        return Err(CliError::fetch_failed(message));
    }

    view.set_query(search);
    let snapshot = view.snapshot();
    info!(label = %snapshot.label, "Listing schools");

    write_response(serde_json::to_value(snapshot)?)
}

/// Validate and submit a new school.
///
/// On success the confirmation is written only after the success delay
/// has elapsed and the notification has fired.
pub fn add(config: &ClientConfig, args: &SchoolArgs) -> CliResult<()> {
    let input = args.to_input()?;
    let name = input.name.clone();

    let api = Arc::new(HttpSchoolApi::new(config)?);
    let notified = Arc::new(Notify::new());
    let signal = Arc::clone(&notified);
    let controller = FormController::new(api, config)?.on_success(move || signal.notify_one());
    controller.fill(input);

    let rt = runtime()?;
    let outcome = rt.block_on(async {
        let outcome = controller.submit().await;
        if outcome == SubmitOutcome::Succeeded {
            notified.notified().await;
        }
        outcome
    });

    match outcome {
        SubmitOutcome::Succeeded => write_response(json!({
            "message": SUCCESS_MESSAGE,
            "name": name,
        })),
        SubmitOutcome::Invalid(errors) => Err(CliError::validation_failed(&errors)),
        SubmitOutcome::Failed(message) => Err(CliError::submission_failed(message)),
        SubmitOutcome::InFlight | SubmitOutcome::Discarded => Err(CliError::submission_failed(
            "Submission did not complete",
        )),
    }
}

/// Validate a new school without sending it
pub fn validate(args: &SchoolArgs) -> CliResult<()> {
    let input = args.to_input()?;
    let schema = SchoolSchema::new()?;

    schema
        .validate(&input)
        .map_err(|errors| CliError::validation_failed(&errors))?;

    write_response(json!({ "valid": true }))
}
