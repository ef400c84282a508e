//! Prompt text sent to the backend and parsing of its answers.

use super::{ProposalError, ProposedAction};
use crate::executor::CommandResult;

/// Renders the history block appended to the agent prompt.
///
/// Empty history renders as an empty string so the first prompt carries
/// only the request and context.
pub fn format_history(history: &[CommandResult]) -> String {
    if history.is_empty() {
        return String::new();
    }
    let entries = history
        .iter()
        .map(|r| {
            format!(
                "Command: {}\nExit Code: {}\nOutput:\n{}\n---",
                r.command, r.exit_code, r.output
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\nPrevious commands and outputs:\n{}", entries)
}

/// User message for one agent iteration.
pub fn agent_message(request: &str, context: &str, history: &[CommandResult]) -> String {
    format!(
        "User Request: {}\n\nGit Context:\n{}{}",
        request,
        context,
        format_history(history)
    )
}

/// User message for one-shot mode.
pub fn oneshot_message(request: &str, context: &str) -> String {
    format!("Git Context:\n{}\n\nUser Request: {}", context, request)
}

/// Parses the backend's reply into a [`ProposedAction`].
///
/// Surrounding whitespace is ignored; anything else that is not exactly the
/// expected JSON object is an error.
pub fn parse_action(content: &str) -> Result<ProposedAction, ProposalError> {
    let content = content.trim();
    serde_json::from_str(content).map_err(|source| ProposalError::Malformed {
        content: content.to_string(),
        source,
    })
}
