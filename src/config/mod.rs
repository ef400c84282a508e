//! Configuration types and path resolution for gai.
//!
//! gai stores its settings as TOML at the platform's XDG config path
//! (e.g. `~/.config/gai/config.toml` on Linux). A `gai.toml` in the
//! project (searched up to the git root) overrides the global values.

mod edit;
mod loader;
mod paths;
mod resolve;
mod types;

pub use types::Config;
#[cfg(test)]
pub use types::ProviderEntry;

use anyhow::Result;

impl Config {
    /// Load config with precedence: project > global > defaults.
    /// Creates default config file if none exists.
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project()?;

        let mut config = global;
        if let Some(proj) = project {
            config = Self::merge(config, proj);
        }

        config.resolve_substitutions();
        Ok(config)
    }
}
