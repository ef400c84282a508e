//! Model-backed proposer.

use tracing::debug;

use super::prompt::{agent_message, oneshot_message};
use super::{parse_action, ProposalError, ProposedAction, Proposer};
use crate::constants::{AGENT_SYSTEM_PROMPT, ONESHOT_SYSTEM_PROMPT};
use crate::executor::CommandResult;
use crate::provider::Provider;

/// Asks an LLM for the next command, one call per iteration.
pub struct LlmProposer {
    provider: Provider,
}

impl LlmProposer {
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    async fn ask(&self, system_prompt: &str, message: &str) -> Result<String, ProposalError> {
        debug!(model = self.provider.model(), "sending prompt");
        self.provider
            .prompt(system_prompt, message)
            .await
            .map_err(|e| ProposalError::Backend(format!("{e:#}")))
    }
}

#[async_trait::async_trait]
impl Proposer for LlmProposer {
    async fn propose(
        &self,
        request: &str,
        context: &str,
        history: &[CommandResult],
    ) -> Result<ProposedAction, ProposalError> {
        let message = agent_message(request, context, history);
        let content = self.ask(AGENT_SYSTEM_PROMPT, &message).await?;
        let action = parse_action(&content)?;
        debug!(?action, "model proposed action");
        Ok(action)
    }

    async fn suggest(&self, request: &str, context: &str) -> Result<String, ProposalError> {
        let message = oneshot_message(request, context);
        let content = self.ask(ONESHOT_SYSTEM_PROMPT, &message).await?;
        Ok(content.trim().to_string())
    }
}
