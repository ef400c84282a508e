//! The iterative agent loop.
//!
//! [`Agent::run`] repeatedly asks the [`Proposer`] for the next command,
//! shows it at the [`ConfirmationGate`], and executes it through the
//! [`CommandExecutor`]. Each result is appended to the session history and
//! fed back on the next pass. The loop stops when the proposer declares the
//! task done, the user cancels, the iteration ceiling is reached, or
//! something goes wrong. Every ending is an [`Outcome`] value; nothing
//! escapes as an error.

mod outcome;
mod session;

pub use outcome::{AgentError, AgentReport, FinalStep, Outcome};
pub use session::{AgentSession, Request};

use colored::Colorize;
use tracing::{debug, info};

use crate::constants::{FINAL_COMMAND_LABEL, MAX_AGENT_ITERATIONS};
use crate::executor::CommandExecutor;
use crate::gate::{ConfirmationGate, Decision};
use crate::proposer::{ProposedAction, Proposer};
use crate::validate::{validate_command, Refusal};

/// Sequences proposer, gate and executor for one request at a time.
pub struct Agent<'a> {
    proposer: &'a dyn Proposer,
    gate: &'a dyn ConfirmationGate,
    executor: &'a dyn CommandExecutor,
    max_iterations: usize,
}

impl<'a> Agent<'a> {
    pub fn new(
        proposer: &'a dyn Proposer,
        gate: &'a dyn ConfirmationGate,
        executor: &'a dyn CommandExecutor,
    ) -> Self {
        Self {
            proposer,
            gate,
            executor,
            max_iterations: MAX_AGENT_ITERATIONS,
        }
    }

    /// Override the iteration ceiling.
    #[cfg(test)]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Runs `request` to completion.
    pub async fn run(&self, request: Request) -> AgentReport {
        let mut session = AgentSession::new(request, self.max_iterations);
        info!(request = session.request.input(), "starting agent run");

        let outcome = self.drive(&mut session).await;
        info!(
            iterations = session.iteration,
            executed = session.history.len(),
            outcome = %outcome.message(),
            "agent run finished"
        );

        AgentReport {
            outcome,
            history: session.history,
            iterations: session.iteration,
        }
    }

    async fn drive(&self, session: &mut AgentSession) -> Outcome {
        loop {
            if !session.begin_iteration() {
                info!(max = session.max_iterations, "iteration ceiling reached");
                return Outcome::MaxedOut {
                    max_iterations: session.max_iterations,
                };
            }
            println!(
                "\n{}",
                format!("Step {}/{}", session.iteration, session.max_iterations)
                    .blue()
                    .bold()
            );

            let action = match self
                .proposer
                .propose(
                    session.request.input(),
                    session.request.context(),
                    &session.history,
                )
                .await
            {
                Ok(action) => action,
                Err(e) => {
                    info!(err = %e, "proposer failed");
                    return Outcome::Failed(e.into());
                }
            };
            debug!(iteration = session.iteration, ?action, "received proposal");

            if action.is_done {
                return self.finish(session, action).await;
            }
            if !action.has_command() {
                return Outcome::Failed(AgentError::EmptyCommand);
            }
            if let Err(Refusal(text)) = validate_command(&action.command) {
                return Outcome::Refused(text);
            }

            if self.gate.confirm(&action.command, &action.reasoning) == Decision::Cancel {
                return Outcome::Cancelled;
            }

            let result = self.executor.execute(&action.command).await;
            if !result.succeeded() {
                info!(
                    command = %result.command,
                    exit_code = result.exit_code,
                    "command failed, continuing"
                );
            }
            session.record(result);
        }
    }

    /// Handles a proposal marked done, running its closing command if any.
    async fn finish(&self, session: &mut AgentSession, action: ProposedAction) -> Outcome {
        if !action.has_command() {
            return Outcome::Completed {
                summary: action.reasoning,
                final_step: FinalStep::None,
            };
        }
        if let Err(Refusal(text)) = validate_command(&action.command) {
            return Outcome::Refused(text);
        }

        let final_step = match self.gate.confirm(&action.command, FINAL_COMMAND_LABEL) {
            Decision::Cancel => {
                debug!(command = %action.command, "final command declined");
                FinalStep::Declined
            }
            Decision::Run => {
                let result = self.executor.execute(&action.command).await;
                let exit_code = result.exit_code;
                if !result.succeeded() {
                    info!(command = %result.command, exit_code, "final command failed");
                    println!(
                        "{} {}",
                        "warning:".yellow().bold(),
                        format!("final command exited with code {exit_code}").yellow()
                    );
                }
                session.record(result);
                FinalStep::Executed { exit_code }
            }
        };

        Outcome::Completed {
            summary: action.reasoning,
            final_step,
        }
    }
}
