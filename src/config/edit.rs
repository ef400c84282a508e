//! Editing and persisting individual config values (`gai config set`).

use anyhow::{bail, Result};
use std::path::PathBuf;

use super::types::{Config, ProviderEntry};

impl Config {
    /// Set a single value addressed by a dotted key.
    ///
    /// Supported keys: `model`, `default_provider`, `mock`, and
    /// `provider.<name>.<api_key|base_url|model>`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key.split('.').collect::<Vec<_>>().as_slice() {
            ["model"] => self.model = value.to_string(),
            ["default_provider"] => self.default_provider = Some(value.to_string()),
            ["mock"] => {
                self.mock = Some(match value.to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => bail!("Invalid value for mock: {other} (expected true or false)"),
                });
            }
            ["provider", name, field] => {
                let Some(slot) = self.provider.entry_mut(name) else {
                    bail!(
                        "Unknown provider: {name}. Supported: anthropic, openai, openrouter, ollama"
                    );
                };
                let entry = slot.get_or_insert_with(ProviderEntry::default);
                let target = match *field {
                    "api_key" => &mut entry.api_key,
                    "base_url" => &mut entry.base_url,
                    "model" => &mut entry.model,
                    other => bail!("Unknown provider field: {other}"),
                };
                *target = Some(value.to_string());
            }
            _ => bail!("Unknown config key: {key}"),
        }
        Ok(())
    }

    /// Set a value in the global config file and save it.
    ///
    /// Works on the raw file contents so `{env:VAR}` placeholders elsewhere
    /// in the file are preserved rather than expanded. Returns the path
    /// that was written.
    pub fn set_global_value(key: &str, value: &str) -> Result<PathBuf> {
        let path = Self::config_path()?;
        let mut config = Self::load_global_from(&path)?;
        config.set_value(key, value)?;
        config.save_to(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_top_level_values() {
        let mut config = Config::default();
        config.set_value("model", "gpt-4.1").unwrap();
        config.set_value("default_provider", "anthropic").unwrap();
        config.set_value("mock", "TRUE").unwrap();
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.default_provider.as_deref(), Some("anthropic"));
        assert_eq!(config.mock, Some(true));
    }

    #[test]
    fn test_set_provider_field_creates_entry() {
        let mut config = Config::default();
        config.set_value("provider.openai.api_key", "sk-abc").unwrap();
        assert_eq!(
            config.provider.openai.unwrap().api_key.as_deref(),
            Some("sk-abc")
        );
    }

    #[test]
    fn test_set_rejects_unknown_keys() {
        let mut config = Config::default();
        assert!(config.set_value("colour", "blue").is_err());
        assert!(config.set_value("provider.mistral.api_key", "x").is_err());
        assert!(config.set_value("provider.openai.token", "x").is_err());
        assert!(config.set_value("mock", "maybe").is_err());
        assert_eq!(config, Config::default());
    }
}
