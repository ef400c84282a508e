//! Command proposers: decide the next command for a request.
//!
//! A [`Proposer`] sees the original request, the repository context, and
//! every command executed so far, and answers with a [`ProposedAction`].
//! [`LlmProposer`] asks a model through [`Provider`](crate::provider::Provider);
//! [`StubProposer`] answers from fixed data without any network call. The
//! choice is made once, when the CLI builds the proposer.

mod llm;
mod prompt;
mod stub;

pub use llm::LlmProposer;
pub use prompt::parse_action;
pub use stub::StubProposer;

use serde::Deserialize;
use thiserror::Error;

use crate::executor::CommandResult;

/// The proposer's answer for one iteration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedAction {
    /// Command to run next; may be empty when the task is finished.
    pub command: String,
    pub reasoning: String,
    /// Whether enough has been done to complete the request.
    pub is_done: bool,
}

impl ProposedAction {
    pub fn has_command(&self) -> bool {
        !self.command.trim().is_empty()
    }
}

/// The proposer could not produce a usable action.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// Transport failure or an error answer from the backend.
    #[error("{0}")]
    Backend(String),
    /// The backend answered, but not with the expected JSON object.
    #[error("Failed to parse agent response as JSON: {content}")]
    Malformed {
        content: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Decides which command to run next.
#[async_trait::async_trait]
pub trait Proposer: Send + Sync {
    /// Next step of an agent run, given everything executed so far.
    async fn propose(
        &self,
        request: &str,
        context: &str,
        history: &[CommandResult],
    ) -> Result<ProposedAction, ProposalError>;

    /// A single, directly executable command line for one-shot mode.
    async fn suggest(&self, request: &str, context: &str) -> Result<String, ProposalError>;
}
