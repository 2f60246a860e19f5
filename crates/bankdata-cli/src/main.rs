//! bankdata - a command-line client for open-banking account data.
//!
//! Lists banks, links one through a requisition, and shows the linked
//! account's transactions and balance. Tokens are kept valid across runs
//! in the account file named by the config.

mod app;
mod cli;
mod commands;
mod output;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use bankdata_core::{ApiClient, Config};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, Outcome};
use cli::{Cli, Command, Request, USAGE};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug).
    // Logs go to stderr so they never mix with command output.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let request = match Cli::parse().command.map(Command::into_request) {
        Some(Ok(request)) => request,
        Some(Err(usage)) => {
            println!("{}", usage);
            return ExitCode::SUCCESS;
        }
        None => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
    };

    match run(request).await {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::CommandFailed(e)) => {
            eprintln!("Error: {:#}", e);
            ExitCode::SUCCESS
        }
        Ok(Outcome::AuthFailed(e)) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(request: Request) -> Result<Outcome> {
    let config = Config::load()?;
    info!(request = ?request, "bankdata starting");

    let app = App::new(ApiClient::new()?, config);
    let mut stdout = io::stdout().lock();
    app.run(request, &mut stdout).await
}
