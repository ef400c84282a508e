//! Per-run state owned by the agent loop.

use crate::constants::CONTEXT_UNAVAILABLE;
use crate::executor::CommandResult;

/// What the user asked for, plus the repository snapshot taken at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    input: String,
    context: Option<String>,
}

impl Request {
    pub fn new(input: impl Into<String>, context: Option<String>) -> Self {
        Self {
            input: input.into(),
            context,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The formatted context, or the "not in a repository" placeholder.
    pub fn context(&self) -> &str {
        self.context.as_deref().unwrap_or(CONTEXT_UNAVAILABLE)
    }
}

/// Mutable state of one agent run.
///
/// `iteration` never exceeds `max_iterations`, and `history` holds exactly
/// the commands that were confirmed and executed, in order.
#[derive(Debug)]
pub struct AgentSession {
    pub request: Request,
    pub history: Vec<CommandResult>,
    pub iteration: usize,
    pub max_iterations: usize,
}

impl AgentSession {
    pub fn new(request: Request, max_iterations: usize) -> Self {
        Self {
            request,
            history: Vec::new(),
            iteration: 0,
            max_iterations,
        }
    }

    /// Advances to the next pass. Returns `false` once the ceiling is hit.
    pub fn begin_iteration(&mut self) -> bool {
        if self.iteration >= self.max_iterations {
            return false;
        }
        self.iteration += 1;
        true
    }

    pub fn record(&mut self, result: CommandResult) {
        self.history.push(result);
    }
}
