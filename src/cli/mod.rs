//! Command-line interface definition and dispatch for gai.
//!
//! Uses [`clap`] for argument parsing with derive macros. `run` and `agent`
//! share the backend flags; prompting lives in the [`prompt`] submodule.

mod prompt;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, info};

use crate::agent::{Agent, FinalStep, Outcome, Request};
use crate::config::Config;
use crate::context::{self, SystemGit};
use crate::executor::ShellExecutor;
use crate::gate::TerminalGate;
use crate::oneshot::{self, OneShot};
use crate::output::WithSpinner;
use crate::proposer::{LlmProposer, Proposer, StubProposer};
use crate::provider::{self, Provider};

/// Top-level CLI structure for gai.
#[derive(Parser)]
#[command(name = "gai", version, about = "Turn plain English into git commands")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands. The `///` comments double as `--help` text.
#[derive(Subcommand)]
pub enum Commands {
    /// Suggest a single command for a request and run it after confirmation
    Run {
        /// What you want to do, in plain English
        request: Vec<String>,
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Work through a request step by step, confirming each command
    Agent {
        /// What you want to do, in plain English
        request: Vec<String>,
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags selecting where proposals come from.
#[derive(Args)]
pub struct BackendArgs {
    /// Use canned responses instead of calling a model
    #[arg(long)]
    mock: bool,
    /// Provider to use (anthropic, openai, openrouter, ollama)
    #[arg(short, long)]
    provider: Option<String>,
    /// Model to use (overrides config)
    #[arg(short, long)]
    model: Option<String>,
}

/// Subcommands for the `config` command.
///
/// Reads and writes the TOML file at the XDG config path
/// (`~/.config/gai/config.toml`).
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current config
    Show,
    /// Set a config value (model, default_provider, mock, provider.<name>.<field>)
    Set { key: String, value: String },
}

/// Parses command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Run { request, backend } => {
            let Some(request) = build_request(request)? else {
                return Ok(ExitCode::SUCCESS);
            };
            let mut config = Config::load()?;
            let proposer = build_proposer(&backend, &mut config)?;
            run_oneshot(&request, proposer.as_ref()).await
        }
        Commands::Agent { request, backend } => {
            let Some(request) = build_request(request)? else {
                return Ok(ExitCode::SUCCESS);
            };
            let mut config = Config::load()?;
            let proposer = build_proposer(&backend, &mut config)?;
            run_agent(request, proposer.as_ref()).await
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    let config = Config::load()?;
                    let path = Config::config_path()?;
                    println!("{} {}", "Config path:".bold(), path.display());
                    println!();
                    println!("{}", toml::to_string_pretty(&config)?);
                }
                ConfigAction::Set { key, value } => {
                    let path = Config::set_global_value(&key, &value)?;
                    println!(
                        "{} {} = {} ({})",
                        "Saved".green().bold(),
                        key,
                        value,
                        path.display()
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Joins the request words, or asks for a request interactively.
/// Snapshots git context; `None` means the user aborted the prompt.
fn build_request(words: Vec<String>) -> Result<Option<Request>> {
    let mut input = words.join(" ").trim().to_string();
    if input.is_empty() {
        match prompt::read_request()? {
            Some(line) => input = line,
            None => return Ok(None),
        }
    }

    let context = match context::gather(&SystemGit) {
        Ok(ctx) => Some(ctx.format_for_llm()),
        Err(e) => {
            info!(err = %e, "continuing without git context");
            None
        }
    };
    Ok(Some(Request::new(input, context)))
}

/// Picks the stub or a live model, running API key setup for the latter.
fn build_proposer(backend: &BackendArgs, config: &mut Config) -> Result<Box<dyn Proposer>> {
    if backend.mock || config.mock_enabled() {
        return Ok(Box::new(StubProposer));
    }

    let selection =
        provider::resolve_model(backend.provider.as_deref(), backend.model.as_deref(), config)?;
    prompt::ensure_api_key(config, selection.provider)?;
    let provider = Provider::from_config(config, &selection)?;

    println!(
        "{} [model: {}]",
        "gai".bold().cyan(),
        selection.model.yellow(),
    );
    Ok(Box::new(WithSpinner::new(LlmProposer::new(provider))))
}

async fn run_agent(request: Request, proposer: &dyn Proposer) -> Result<ExitCode> {
    let executor = ShellExecutor::new();
    let report = Agent::new(proposer, &TerminalGate, &executor)
        .run(request)
        .await;

    debug!(
        iterations = report.iterations,
        executed = report.history.len(),
        "agent report"
    );

    let message = report.outcome.message();
    match &report.outcome {
        Outcome::Refused(_) => {
            println!("{}", message);
            return Ok(ExitCode::SUCCESS);
        }
        Outcome::Completed {
            summary,
            final_step,
        } => {
            if !summary.is_empty() {
                println!("\n{} {}", "Summary:".bold(), summary);
            }
            match final_step {
                FinalStep::Declined => println!("{}", "Final command skipped".yellow()),
                FinalStep::Executed { exit_code } => {
                    debug!(exit_code, "final command finished")
                }
                FinalStep::None => {}
            }
            println!("\n{}", message.green().bold());
        }
        Outcome::Cancelled => println!("\n{}", message.yellow().bold()),
        Outcome::MaxedOut { max_iterations } => println!(
            "\n{} {}",
            message.yellow().bold(),
            format!("({max_iterations} steps)").dimmed()
        ),
        Outcome::Failed(_) => eprintln!("\n{} {}", "error:".red().bold(), message),
    }

    Ok(if report.outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn run_oneshot(request: &Request, proposer: &dyn Proposer) -> Result<ExitCode> {
    let executor = ShellExecutor::new();
    match oneshot::run(request, proposer, &TerminalGate, &executor).await? {
        OneShot::Refused(text) => {
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        OneShot::Cancelled => {
            println!("{}", "Command cancelled".yellow());
            Ok(ExitCode::SUCCESS)
        }
        OneShot::Executed(result) if result.succeeded() => Ok(ExitCode::SUCCESS),
        OneShot::Executed(_) => {
            eprintln!(
                "{} check the output above; the suggested command may need adjusting for your repository",
                "hint:".yellow().bold()
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
