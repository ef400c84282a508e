//! Scripted fakes for the agent's collaborators.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::executor::{CommandExecutor, CommandResult};
use crate::gate::{ConfirmationGate, Decision};
use crate::proposer::{ProposalError, ProposedAction, Proposer};

pub fn action(command: &str, reasoning: &str, is_done: bool) -> ProposedAction {
    ProposedAction {
        command: command.to_string(),
        reasoning: reasoning.to_string(),
        is_done,
    }
}

/// Replays queued proposals, then repeats `fallback` forever.
pub struct ScriptedProposer {
    steps: Mutex<VecDeque<Result<ProposedAction, ProposalError>>>,
    fallback: ProposedAction,
    suggestion: String,
    /// History length seen by each `propose` call.
    pub seen_history: Mutex<Vec<usize>>,
    /// Last history passed in, for checking what was fed back.
    pub last_history: Mutex<Vec<CommandResult>>,
}

impl ScriptedProposer {
    pub fn new(steps: Vec<Result<ProposedAction, ProposalError>>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            fallback: action("git status", "still looking", false),
            suggestion: String::new(),
            seen_history: Mutex::new(Vec::new()),
            last_history: Mutex::new(Vec::new()),
        }
    }

    pub fn actions(actions: Vec<ProposedAction>) -> Self {
        Self::new(actions.into_iter().map(Ok).collect())
    }

    /// Never finishes: every proposal is a not-done `command`.
    pub fn endless(command: &str) -> Self {
        let mut proposer = Self::new(Vec::new());
        proposer.fallback = action(command, "one more step", false);
        proposer
    }

    pub fn suggesting(suggestion: &str) -> Self {
        let mut proposer = Self::new(Vec::new());
        proposer.suggestion = suggestion.to_string();
        proposer
    }

    pub fn calls(&self) -> usize {
        self.seen_history.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Proposer for ScriptedProposer {
    async fn propose(
        &self,
        _request: &str,
        _context: &str,
        history: &[CommandResult],
    ) -> Result<ProposedAction, ProposalError> {
        self.seen_history.lock().unwrap().push(history.len());
        *self.last_history.lock().unwrap() = history.to_vec();
        let next = self.steps.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    async fn suggest(&self, _request: &str, _context: &str) -> Result<String, ProposalError> {
        Ok(self.suggestion.clone())
    }
}

/// Answers from a queue of decisions, then `Run`.
#[derive(Default)]
pub struct ScriptedGate {
    decisions: Mutex<VecDeque<Decision>>,
    /// Commands shown at the gate, in order.
    pub shown: Mutex<Vec<String>>,
    /// Reasoning shown alongside each command.
    pub reasons: Mutex<Vec<String>>,
}

impl ScriptedGate {
    pub fn approving() -> Self {
        Self::default()
    }

    pub fn answering(decisions: Vec<Decision>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into()),
            shown: Mutex::new(Vec::new()),
            reasons: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> usize {
        self.shown.lock().unwrap().len()
    }
}

impl ConfirmationGate for ScriptedGate {
    fn confirm(&self, command: &str, reasoning: &str) -> Decision {
        self.shown.lock().unwrap().push(command.to_string());
        self.reasons.lock().unwrap().push(reasoning.to_string());
        self.decisions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Decision::Run)
    }
}

/// Records every command instead of running it.
#[derive(Default)]
pub struct RecordingExecutor {
    exit_codes: Mutex<VecDeque<i32>>,
    pub executed: Mutex<Vec<String>>,
    pub inherited: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    /// Exit codes handed out in order; exhausted queue means 0.
    pub fn with_exit_codes(codes: Vec<i32>) -> Self {
        Self {
            exit_codes: Mutex::new(codes.into()),
            ..Default::default()
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    fn result(&self, command: &str) -> CommandResult {
        let exit_code = self.exit_codes.lock().unwrap().pop_front().unwrap_or(0);
        CommandResult {
            command: command.to_string(),
            output: format!("output of {command}"),
            exit_code,
        }
    }
}

#[async_trait::async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn execute(&self, command: &str) -> CommandResult {
        self.executed.lock().unwrap().push(command.to_string());
        self.result(command)
    }

    async fn execute_inherited(&self, command: &str) -> CommandResult {
        self.inherited.lock().unwrap().push(command.to_string());
        let mut result = self.result(command);
        result.output.clear();
        result
    }
}
