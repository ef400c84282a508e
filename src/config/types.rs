//! Struct definitions and serde defaults for gai configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for gai, deserialized from `config.toml`.
///
/// Fields use serde defaults so gai can run with sensible defaults
/// when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Default model identifier (e.g. `"gpt-4o-mini"`).
    #[serde(default = "default_model")]
    pub model: String,
    /// Default provider name (e.g., "openai", "anthropic").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    /// Answer from a canned stub instead of calling a model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    /// Per-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Returns the default model identifier.
///
/// Used by serde's `#[serde(default)]` attribute during deserialization.
pub(super) fn default_model() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

/// Provider-specific configuration map.
///
/// Each field corresponds to a supported LLM provider. Only providers
/// the user has configured will be `Some`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<ProviderEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<ProviderEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama: Option<ProviderEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openrouter: Option<ProviderEntry>,
}

impl ProviderConfig {
    /// Returns the entry slot for `provider`, or `None` for unknown names.
    pub fn entry_mut(&mut self, provider: &str) -> Option<&mut Option<ProviderEntry>> {
        match provider {
            "openai" => Some(&mut self.openai),
            "anthropic" => Some(&mut self.anthropic),
            "ollama" => Some(&mut self.ollama),
            "openrouter" => Some(&mut self.openrouter),
            _ => None,
        }
    }

    pub fn entry(&self, provider: &str) -> Option<&ProviderEntry> {
        match provider {
            "openai" => self.openai.as_ref(),
            "anthropic" => self.anthropic.as_ref(),
            "ollama" => self.ollama.as_ref(),
            "openrouter" => self.openrouter.as_ref(),
            _ => None,
        }
    }
}

/// Connection details for a single LLM provider.
///
/// Allows overriding the API key, endpoint URL, and model on a
/// per-provider basis.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderEntry {
    /// API key for authentication. Can also be set via environment variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom base URL for the provider's API (useful for proxies or self-hosted instances).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model identifier to use with this provider, overriding the global default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            default_provider: None,
            mock: None,
            provider: ProviderConfig::default(),
        }
    }
}
