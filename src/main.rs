//! Entry point for gai, a natural-language git assistant for the terminal.
//!
//! This binary loads environment variables, installs the tracing
//! subscriber, parses CLI arguments via [`cli`], and dispatches the chosen
//! subcommand.

mod agent;
mod cli;
mod config;
mod constants;
mod context;
mod executor;
mod gate;
mod logging;
mod oneshot;
mod output;
mod proposer;
mod provider;
#[cfg(test)]
mod test_support;
mod validate;

use std::process::ExitCode;

use anyhow::Result;

/// Runs the gai CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    logging::init();
    let cli = cli::parse();
    cli::run(cli).await
}
