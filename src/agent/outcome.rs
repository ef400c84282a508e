//! How an agent run ended.

use thiserror::Error;

use crate::executor::CommandResult;
use crate::proposer::ProposalError;

/// Reasons an agent run fails.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Proposal(#[from] ProposalError),
    /// The proposer said the task is not done but gave nothing to run.
    #[error("No command provided")]
    EmptyCommand,
}

/// What happened to the command attached to a finishing proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalStep {
    /// The proposer finished without a closing command.
    None,
    Executed { exit_code: i32 },
    /// The user cancelled the closing command; the run still completed.
    Declined,
}

/// Terminal state of an agent run.
#[derive(Debug)]
pub enum Outcome {
    Completed { summary: String, final_step: FinalStep },
    Cancelled,
    MaxedOut { max_iterations: usize },
    Failed(AgentError),
    /// The proposer produced a refusal instead of a command.
    Refused(String),
}

impl Outcome {
    /// Human-readable line reported at the end of the run.
    pub fn message(&self) -> String {
        match self {
            Outcome::Completed { .. } => "Agent execution completed successfully".to_string(),
            Outcome::Cancelled => "Agent execution cancelled by user".to_string(),
            Outcome::MaxedOut { .. } => {
                "Agent execution stopped: Maximum iterations reached".to_string()
            }
            Outcome::Failed(e) => format!("Agent execution failed: {e}"),
            Outcome::Refused(text) => text.clone(),
        }
    }

    /// Only failures make the process exit non-zero.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Everything a caller learns from one run.
#[derive(Debug)]
pub struct AgentReport {
    pub outcome: Outcome,
    pub history: Vec<CommandResult>,
    pub iterations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let done = Outcome::Completed {
            summary: "done".into(),
            final_step: FinalStep::None,
        };
        assert_eq!(done.message(), "Agent execution completed successfully");
        assert_eq!(Outcome::Cancelled.message(), "Agent execution cancelled by user");
        assert_eq!(
            Outcome::MaxedOut { max_iterations: 10 }.message(),
            "Agent execution stopped: Maximum iterations reached"
        );
        assert_eq!(
            Outcome::Failed(AgentError::EmptyCommand).message(),
            "Agent execution failed: No command provided"
        );
        let backend = Outcome::Failed(ProposalError::Backend("timed out".into()).into());
        assert_eq!(backend.message(), "Agent execution failed: timed out");
    }

    #[test]
    fn test_only_failed_is_failure() {
        assert!(Outcome::Failed(AgentError::EmptyCommand).is_failure());
        assert!(!Outcome::Cancelled.is_failure());
        assert!(!Outcome::MaxedOut { max_iterations: 10 }.is_failure());
        assert!(!Outcome::Refused("I'm sorry".into()).is_failure());
    }
}
