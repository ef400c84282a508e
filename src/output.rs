//! Terminal progress indicator shown while the model is thinking.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use colored::Colorize;
use tokio::task::JoinHandle;

use crate::constants::{SPINNER_FRAMES, SPINNER_INTERVAL_MS, SPINNER_LABEL};
use crate::executor::CommandResult;
use crate::proposer::{ProposalError, ProposedAction, Proposer};

/// An animated "Processing..." line on stdout.
///
/// The animation runs as a background task and is erased when the spinner
/// is dropped. Nothing is drawn when stdout is not a terminal.
pub struct Spinner {
    task: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start() -> Self {
        if !io::stdout().is_terminal() {
            return Self { task: None };
        }
        let task = tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_millis(SPINNER_INTERVAL_MS));
            for frame in SPINNER_FRAMES.iter().cycle() {
                tick.tick().await;
                let mut stdout = io::stdout();
                write!(stdout, "\r{} {}", frame.cyan(), SPINNER_LABEL).ok();
                stdout.flush().ok();
            }
        });
        Self { task: Some(task) }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();
        let width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);
        let mut stdout = io::stdout();
        write!(stdout, "\r{}\r", " ".repeat(width)).ok();
        stdout.flush().ok();
    }
}

/// Wraps a proposer so every backend call shows a [`Spinner`].
///
/// The spinner is gone by the time the call returns, so it never overlaps
/// the confirmation prompt.
pub struct WithSpinner<P> {
    inner: P,
}

impl<P: Proposer> WithSpinner<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl<P: Proposer> Proposer for WithSpinner<P> {
    async fn propose(
        &self,
        request: &str,
        context: &str,
        history: &[CommandResult],
    ) -> Result<ProposedAction, ProposalError> {
        let _spinner = Spinner::start();
        self.inner.propose(request, context, history).await
    }

    async fn suggest(&self, request: &str, context: &str) -> Result<String, ProposalError> {
        let _spinner = Spinner::start();
        self.inner.suggest(request, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposer::StubProposer;

    #[tokio::test]
    async fn test_wrapped_proposer_passes_answers_through() {
        let proposer = WithSpinner::new(StubProposer);
        let action = proposer.propose("x", "ctx", &[]).await.unwrap();
        assert_eq!(action.command, "git status");
        assert_eq!(
            proposer.suggest("x", "ctx").await.unwrap(),
            "git pull origin main"
        );
    }
}
