//! Core library entry for the `taskboard` CLI.
//!
//! The [`board`] module holds the pure Kanban model and move
//! reconciliation. [`session::BoardSession`] binds a board to the backend
//! through the [`ports`], applying moves optimistically.

pub mod adapters;
pub mod board;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod ports;
pub mod session;
pub mod snapshot;

use clap::Parser;

use crate::config::Config;

/// Run the CLI with the provided arguments.
///
/// Configuration comes from `TASKBOARD_*` environment variables.
///
/// # Errors
///
/// Returns an error string when argument parsing, configuration or command
/// execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    run_cli(&cli)
}

/// Run an already parsed command line with configuration from the
/// environment.
///
/// # Errors
///
/// Returns an error string when configuration or command execution fails.
pub fn run_cli(cli: &cli::Cli) -> Result<(), String> {
    let config = Config::from_env()?;
    run_with_config(cli, &config)
}

/// Run a parsed command against an explicit configuration.
///
/// # Errors
///
/// Returns an error string when the runtime cannot start or the command
/// fails.
pub fn run_with_config(cli: &cli::Cli, config: &Config) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    runtime.block_on(commands::dispatch(&cli.command, config))
}
