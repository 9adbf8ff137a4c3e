//! Janitor - Main Entry Point
//!
//! Resolves configuration from the environment, installs tracing, wires the
//! client core and runs one command.

mod cli;
mod commands;
mod context;
mod error;

use std::process::ExitCode;

use clap::Parser;
use janitor_application::{AppConfig, ApplicationError, SessionMonitor};
use janitor_domain::{LogLevel, SessionState};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::context::AppContext;
use crate::error::CliResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<String> {
    let config = AppConfig::from_env().map_err(ApplicationError::from)?;
    let settings = config.logger_settings();
    init_tracing(settings.level);

    let context = AppContext::from_config(&config)?;
    tracing::debug!(
        api_url = %config.api_url,
        mode = %config.mode,
        data_dir = ?AppContext::data_dir(&config),
        "client core ready"
    );
    let watcher = watch_session(&context.session);

    let output = commands::run(&context, cli.command).await;
    watcher.abort();
    if context.session.invalidations() > 0 && !context.session.state().is_authenticated() {
        eprintln!("Session expired: run `janitor login <key>` to sign in again.");
    }
    output
}

/// Installs the subscriber. `RUST_LOG` overrides the threshold derived from
/// the configured log level.
fn init_tracing(level: LogLevel) {
    let directive = level.as_str().to_lowercase();
    let default_filter = format!(
        "warn,janitor={directive},janitor_application={directive},janitor_infrastructure={directive}"
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Reacts to the pipeline dropping the session.
fn watch_session(session: &SessionMonitor) -> tokio::task::JoinHandle<()> {
    let mut receiver = session.subscribe();
    tokio::spawn(async move {
        while receiver.changed().await.is_ok() {
            if *receiver.borrow_and_update() == SessionState::Unauthenticated {
                tracing::warn!("session invalidated, returning to login");
            }
        }
    })
}
