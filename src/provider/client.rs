//! LLM provider client.
//!
//! Contains the [`Provider`] struct which wraps rig-core provider clients
//! behind enum dispatch, keeping provider-specific details out of the
//! proposer. Supports OpenAI, Anthropic, OpenRouter, and Ollama.

use anyhow::{Context, Result};
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::{anthropic, openai, openrouter};

use super::kind::ProviderKind;
use super::resolve::ModelSelection;
use crate::config::Config;

/// Internal enum wrapping provider-specific clients.
enum ClientKind {
    OpenAI(openai::Client),
    Anthropic(anthropic::Client),
    OpenRouter(openrouter::Client),
    Ollama(openai::Client),
}

/// A configured LLM provider ready to handle completion requests.
///
/// Agents are constructed on each call since they are cheap to create and
/// the agent and one-shot modes use different system prompts.
pub struct Provider {
    client: ClientKind,
    model: String,
}

/// Builds an agent from the given client, model, and system prompt,
/// then executes the provided block with the agent bound to `$agent`.
macro_rules! with_agent {
    ($client:expr, $model:expr, $sys:expr, |$agent:ident| $body:expr) => {{
        let $agent = $client
            .agent($model)
            .preamble($sys)
            .max_tokens(crate::constants::MAX_TOKENS)
            .build();
        $body
    }};
}

/// Dispatches an operation across provider-specific clients.
///
/// Matches on [`ClientKind`] and executes the same block for each variant,
/// letting the compiler monomorphize per provider.
macro_rules! dispatch {
    ($self:expr, |$client:ident| $body:expr) => {
        match &$self.client {
            ClientKind::OpenAI($client) => $body,
            ClientKind::Anthropic($client) => $body,
            ClientKind::OpenRouter($client) => $body,
            ClientKind::Ollama($client) => $body,
        }
    };
}

impl Provider {
    /// Creates a new [`Provider`] from the loaded application config.
    ///
    /// Resolves the API key through gai's config precedence chain
    /// (env var → config file → substitution) and builds the appropriate
    /// provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is found for the selected provider
    /// or if client construction fails.
    pub fn from_config(config: &Config, selection: &ModelSelection) -> Result<Self> {
        let client = match selection.provider {
            ProviderKind::OpenAI => {
                let api_key = config
                    .resolve_api_key("openai")
                    .context("No API key found for OpenAI. Set OPENAI_API_KEY or run `gai config set provider.openai.api_key <key>`")?;
                let client =
                    openai::Client::new(&api_key).context("Failed to create OpenAI client")?;
                ClientKind::OpenAI(client)
            }
            ProviderKind::Anthropic => {
                let api_key = config
                    .resolve_api_key("anthropic")
                    .context("No API key found for Anthropic. Set ANTHROPIC_API_KEY or run `gai config set provider.anthropic.api_key <key>`")?;
                let client = anthropic::Client::new(&api_key)
                    .context("Failed to create Anthropic client")?;
                ClientKind::Anthropic(client)
            }
            ProviderKind::OpenRouter => {
                let api_key = config
                    .resolve_api_key("openrouter")
                    .context("No API key found for OpenRouter. Set OPENROUTER_API_KEY or run `gai config set provider.openrouter.api_key <key>`")?;
                let client = openrouter::Client::new(&api_key)
                    .context("Failed to create OpenRouter client")?;
                ClientKind::OpenRouter(client)
            }
            ProviderKind::Ollama => {
                let base_url = config
                    .provider
                    .ollama
                    .as_ref()
                    .and_then(|o| o.base_url.as_deref())
                    .unwrap_or(crate::constants::OLLAMA_DEFAULT_BASE_URL);
                let client = openai::Client::builder()
                    .api_key("ollama")
                    .base_url(format!("{}/v1", base_url))
                    .build()
                    .context("Failed to create Ollama client")?;
                ClientKind::Ollama(client)
            }
        };

        Ok(Self {
            client,
            model: selection.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a single non-streaming prompt and returns the full response text.
    pub async fn prompt(&self, system_prompt: &str, prompt_text: &str) -> Result<String> {
        dispatch!(self, |client| {
            let response = with_agent!(client, &self.model, system_prompt, |agent| {
                agent.prompt(prompt_text).await
            });
            Ok(response?)
        })
    }
}
