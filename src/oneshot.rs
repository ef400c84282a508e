//! One-shot mode: a single suggested command line, confirmed once.
//!
//! Unlike the agent loop there is no history and no iteration. The
//! suggestion may chain several commands with `&&`, and it runs attached to
//! the terminal so interactive commands (editors, pagers, credential
//! prompts) work.

use tracing::debug;

use crate::agent::Request;
use crate::executor::{CommandExecutor, CommandResult};
use crate::gate::{ConfirmationGate, Decision};
use crate::proposer::{ProposalError, Proposer};
use crate::validate::{validate_command, Refusal};

/// How a one-shot run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum OneShot {
    Executed(CommandResult),
    Cancelled,
    Refused(String),
}

/// Ask for a suggestion, confirm it, and run it.
pub async fn run(
    request: &Request,
    proposer: &dyn Proposer,
    gate: &dyn ConfirmationGate,
    executor: &dyn CommandExecutor,
) -> Result<OneShot, ProposalError> {
    let suggestion = proposer.suggest(request.input(), request.context()).await?;
    debug!(%suggestion, "received suggestion");
    if suggestion.trim().is_empty() {
        return Err(ProposalError::Backend("No command was suggested".to_string()));
    }
    if let Err(Refusal(text)) = validate_command(&suggestion) {
        return Ok(OneShot::Refused(text));
    }

    match gate.confirm(&suggestion, "") {
        Decision::Cancel => Ok(OneShot::Cancelled),
        Decision::Run => Ok(OneShot::Executed(
            executor.execute_inherited(&suggestion).await,
        )),
    }
}
