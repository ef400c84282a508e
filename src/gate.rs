//! Human confirmation before any command runs.
//!
//! [`TerminalGate`] prints the proposed command and the model's reasoning,
//! then blocks on stdin for a run/cancel answer. Anything other than an
//! explicit "run" cancels.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::warn;

/// The user's answer at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Run,
    Cancel,
}

/// Asks a human whether a proposed command may run.
pub trait ConfirmationGate {
    /// Show `command` (and `reasoning`, when non-empty) and wait for a decision.
    fn confirm(&self, command: &str, reasoning: &str) -> Decision;
}

/// Maps a typed answer to a [`Decision`], failing closed.
pub fn parse_decision(answer: &str) -> Decision {
    match answer.trim().to_lowercase().as_str() {
        "r" | "run" | "y" | "yes" => Decision::Run,
        _ => Decision::Cancel,
    }
}

/// Prompts on stderr and reads the answer from stdin.
pub struct TerminalGate;

impl TerminalGate {
    fn ask(command: &str, reasoning: &str) -> io::Result<String> {
        let mut stderr = io::stderr();
        writeln!(stderr, "\n{} {}", ">".cyan().bold(), command.bold())?;
        if !reasoning.is_empty() {
            writeln!(stderr, "{} {}", "reasoning:".dimmed(), reasoning)?;
        }
        write!(stderr, "\nRun this command? [r]un / [c]ancel: ")?;
        stderr.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

impl ConfirmationGate for TerminalGate {
    fn confirm(&self, command: &str, reasoning: &str) -> Decision {
        match Self::ask(command, reasoning) {
            Ok(answer) => parse_decision(&answer),
            Err(e) => {
                warn!(err = %e, "failed to read confirmation, cancelling");
                Decision::Cancel
            }
        }
    }
}
