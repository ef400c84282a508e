//! Centralized constants for gai.
//!
//! All magic numbers, default strings, and prompt texts live here so they
//! can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "gai";

/// Default LLM model identifier (OpenAI is the default provider).
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 1024;

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "gai.toml";

/// Default LLM model identifier for Anthropic.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-6";

/// Default LLM model identifier for OpenRouter.
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o-mini";

/// Default base URL for local Ollama server.
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default LLM model identifier for Ollama.
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3";

// --- Provider defaults ---

/// Default provider when none is configured.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Required prefix for OpenAI API keys entered at the onboarding prompt.
pub const OPENAI_KEY_PREFIX: &str = "sk-";

// --- Agent loop ---

/// Hard ceiling on propose/confirm/execute cycles per agent run.
pub const MAX_AGENT_ITERATIONS: usize = 10;

/// Case-insensitive phrase that marks a proposal as a refusal.
pub const REFUSAL_PHRASE: &str = "i'm sorry";

/// Placeholder context used when git context cannot be gathered.
pub const CONTEXT_UNAVAILABLE: &str = "Not in a git repository";

/// Reasoning shown at the gate for the command that closes a finished run.
pub const FINAL_COMMAND_LABEL: &str = "Final command to complete the task";

// --- Executor ---

/// Marker placed between stdout and stderr in a composed command output.
pub const STDERR_MARKER: &str = "\nSTDERR:\n";

/// Exit code recorded when the child process could not be started.
pub const LAUNCH_FAILURE_EXIT_CODE: i32 = 127;

/// Exit code recorded when the child ended without a numeric code (signal).
pub const UNKNOWN_EXIT_CODE: i32 = -1;

// --- Output ---

/// Spinner frames shown while waiting on the model.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between spinner frames in milliseconds.
pub const SPINNER_INTERVAL_MS: u64 = 80;

/// Label shown next to the spinner.
pub const SPINNER_LABEL: &str = "Processing your git command...";

// --- Stub responses ---

/// Command returned by the stub backend in one-shot mode.
pub const MOCK_SUGGESTION: &str = "git pull origin main";

/// Command returned by the stub backend in agent mode.
pub const MOCK_AGENT_COMMAND: &str = "git status";

/// Reasoning returned by the stub backend in agent mode.
pub const MOCK_AGENT_REASONING: &str = "Mock response - checking repository status";

// --- Prompts ---

/// System prompt for the iterative agent mode.
pub const AGENT_SYSTEM_PROMPT: &str = r#"You are a helpful git assistant that can help with git commands through an iterative process.

You will be given:
1. The user's original request
2. Git repository context
3. Previous commands and their outputs (if any)

Your response should be a JSON object with this exact format:
{
  "command": "git status",
  "reasoning": "I need to check the current status to understand what needs to be done",
  "isDone": false
}

Rules:
- "command": A single git command that can be executed directly (no &&, no multi-line commands)
- "reasoning": Brief explanation of why this command is needed
- "isDone": true only when you have enough information to fully complete the user's request
- If the request is not git-related, set command to "" and isDone to true with reasoning explaining why
- If needed, start with information gathering commands like "git status", "git log --oneline -5", "git branch" etc.
- Be systematic and thorough. Gather all needed information before making changes
- When isDone is true, provide a final summary in the reasoning field

Always respond with valid JSON only, no additional text."#;

/// System prompt for the one-shot translation mode.
pub const ONESHOT_SYSTEM_PROMPT: &str = "You are a helpful assistant that can help with git commands. \
Your response should be directly executable in the terminal, without any additional text. \
If multiple commands are needed for the task, return them so they can be executed all at once divided by &&. \
If the question is not git-related, say \"I'm sorry, I can only help with git commands.\"";
