//! Offline proposer for trying gai without an API key.

use colored::Colorize;

use super::{ProposalError, ProposedAction, Proposer};
use crate::constants::{MOCK_AGENT_COMMAND, MOCK_AGENT_REASONING, MOCK_SUGGESTION};
use crate::executor::CommandResult;

/// Always answers with the same canned data and never touches the network.
pub struct StubProposer;

impl StubProposer {
    fn warn() {
        eprintln!(
            "{} using mock response data (set `mock = false` in config or drop --mock for real answers)",
            "warning:".yellow().bold()
        );
    }
}

#[async_trait::async_trait]
impl Proposer for StubProposer {
    async fn propose(
        &self,
        _request: &str,
        _context: &str,
        _history: &[CommandResult],
    ) -> Result<ProposedAction, ProposalError> {
        Self::warn();
        Ok(ProposedAction {
            command: MOCK_AGENT_COMMAND.to_string(),
            reasoning: MOCK_AGENT_REASONING.to_string(),
            is_done: false,
        })
    }

    async fn suggest(&self, _request: &str, _context: &str) -> Result<String, ProposalError> {
        Self::warn();
        Ok(MOCK_SUGGESTION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_ignores_inputs() {
        let history = vec![CommandResult {
            command: "git status".into(),
            output: String::new(),
            exit_code: 0,
        }];
        let first = StubProposer.propose("a", "b", &[]).await.unwrap();
        let second = StubProposer.propose("c", "d", &history).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.command, "git status");
        assert!(!first.is_done);
    }

    #[tokio::test]
    async fn test_stub_suggestion() {
        let suggestion = StubProposer.suggest("update my branch", "ctx").await.unwrap();
        assert_eq!(suggestion, "git pull origin main");
    }
}
