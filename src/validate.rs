//! Content checks applied to every proposed command before it is shown.

use crate::constants::REFUSAL_PHRASE;

/// The model declined the request; carries the text to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refusal(pub String);

/// Rejects commands that are really a refusal message.
///
/// Matches the refusal phrase anywhere in the text, ignoring case. Every
/// other command passes unchanged; there is no syntactic check.
pub fn validate_command(command: &str) -> Result<(), Refusal> {
    if command.to_lowercase().contains(REFUSAL_PHRASE) {
        return Err(Refusal(command.to_string()));
    }
    Ok(())
}
