//! File loading, merging and saving for gai configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{default_model, Config, ProviderConfig, ProviderEntry};

impl Config {
    /// Loads the global config from `~/.config/gai/config.toml`.
    ///
    /// If no config file exists, creates one with sensible defaults
    /// (including `{env:VAR}` placeholders for API keys) and returns it.
    pub(super) fn load_global() -> Result<Self> {
        Self::load_global_from(&Self::config_path()?)
    }

    pub(super) fn load_global_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default_toml = format!(
                r#"model = "{}"
mock = false

[provider]

[provider.openai]
api_key = "{{env:OPENAI_API_KEY}}"

[provider.anthropic]
api_key = "{{env:ANTHROPIC_API_KEY}}"

[provider.openrouter]
api_key = "{{env:OPENROUTER_API_KEY}}"

[provider.ollama]
base_url = "http://localhost:11434"
"#,
                default_model()
            );
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &default_toml)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            let config: Config = toml::from_str(&default_toml)
                .with_context(|| "Failed to parse default config".to_string())?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(config)
    }

    /// Look for gai.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        Self::load_project_from(std::env::current_dir()?)
    }

    pub(super) fn load_project_from(mut dir: PathBuf) -> Result<Option<Config>> {
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                let contents = fs::read_to_string(&candidate)
                    .with_context(|| format!("Failed to read config from {:?}", candidate))?;
                let config: Config = toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config at {:?}", candidate))?;
                return Ok(Some(config));
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            model: if project.model != default_model() {
                project.model
            } else {
                global.model
            },
            default_provider: project.default_provider.or(global.default_provider),
            mock: project.mock.or(global.mock),
            provider: ProviderConfig {
                openai: merge_entry(global.provider.openai, project.provider.openai),
                anthropic: merge_entry(global.provider.anthropic, project.provider.anthropic),
                ollama: merge_entry(global.provider.ollama, project.provider.ollama),
                openrouter: merge_entry(global.provider.openrouter, project.provider.openrouter),
            },
        }
    }

    /// Writes this config as pretty TOML to `path`, creating parent directories.
    pub(super) fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }
}

fn merge_entry(
    global: Option<ProviderEntry>,
    project: Option<ProviderEntry>,
) -> Option<ProviderEntry> {
    match (global, project) {
        (Some(g), Some(p)) => Some(ProviderEntry {
            api_key: p.api_key.or(g.api_key),
            base_url: p.base_url.or(g.base_url),
            model: p.model.or(g.model),
        }),
        (g, p) => p.or(g),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gai_test_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_global_creates_default_file() {
        let dir = scratch_dir("global_default");
        let path = dir.join("nested").join("config.toml");

        let config = Config::load_global_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.model, default_model());
        assert_eq!(config.mock, Some(false));
        assert_eq!(
            config.provider.openai.unwrap().api_key.as_deref(),
            Some("{env:OPENAI_API_KEY}")
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_global_rejects_bad_toml() {
        let dir = scratch_dir("global_bad");
        let path = dir.join("config.toml");
        fs::write(&path, "model = [not toml").unwrap();

        let err = Config::load_global_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_project_stops_at_git_root() {
        let dir = scratch_dir("project_walk");
        let repo = dir.join("repo");
        let nested = repo.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(repo.join(".git")).unwrap();
        // Above the git root, must not be picked up.
        fs::write(dir.join("gai.toml"), "model = \"outer\"").unwrap();

        assert!(Config::load_project_from(nested.clone()).unwrap().is_none());

        fs::write(repo.join("gai.toml"), "model = \"inner\"\nmock = true").unwrap();
        let project = Config::load_project_from(nested).unwrap().unwrap();
        assert_eq!(project.model, "inner");
        assert_eq!(project.mock, Some(true));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_merge_prefers_project_values() {
        let mut global = Config::default();
        global.model = "global-model".into();
        global.mock = Some(false);
        global.provider.openai = Some(ProviderEntry {
            api_key: Some("sk-global".into()),
            base_url: Some("https://global".into()),
            model: None,
        });

        let mut project = Config::default();
        project.mock = Some(true);
        project.provider.openai = Some(ProviderEntry {
            api_key: None,
            base_url: Some("https://project".into()),
            model: None,
        });

        let merged = Config::merge(global, project);
        assert_eq!(merged.model, "global-model");
        assert_eq!(merged.mock, Some(true));
        let openai = merged.provider.openai.unwrap();
        assert_eq!(openai.api_key.as_deref(), Some("sk-global"));
        assert_eq!(openai.base_url.as_deref(), Some("https://project"));
    }

    #[test]
    fn test_save_round_trips_through_load() {
        let dir = scratch_dir("save");
        let path = dir.join("config.toml");
        let mut config = Config::default();
        config.default_provider = Some("anthropic".into());

        config.save_to(&path).unwrap();
        let loaded = Config::load_global_from(&path).unwrap();
        assert_eq!(loaded, config);

        fs::remove_dir_all(&dir).unwrap();
    }
}
