//! Interactive prompts: the request itself and first-run API key setup.

use std::io::IsTerminal;

use anyhow::{bail, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::Config;
use crate::constants::OPENAI_KEY_PREFIX;
use crate::provider::ProviderKind;

/// Asks for the request when none was given on the command line.
///
/// Blank answers re-prompt. Returns `None` on Ctrl-C or Ctrl-D.
pub fn read_request() -> Result<Option<String>> {
    let mut rl = DefaultEditor::new()?;
    println!("{}", "What git command would you like help with?".bold());
    loop {
        match rl.readline(&format!("{} ", ">".green().bold())) {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    return Ok(Some(line.to_string()));
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Checks the shape of an entered key before it is saved.
pub fn check_api_key(provider: ProviderKind, key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("API key cannot be empty".to_string());
    }
    if provider == ProviderKind::OpenAI && !key.starts_with(OPENAI_KEY_PREFIX) {
        return Err(format!(
            "Invalid OpenAI API key format (should start with '{OPENAI_KEY_PREFIX}')"
        ));
    }
    Ok(())
}

/// Makes sure `provider` has a key, prompting for one and saving it to the
/// global config when missing.
pub fn ensure_api_key(config: &mut Config, provider: ProviderKind) -> Result<()> {
    if !provider.requires_api_key() || config.resolve_api_key(provider.name()).is_some() {
        return Ok(());
    }
    let env_var = format!("{}_API_KEY", provider.name().to_uppercase());
    if !std::io::stdin().is_terminal() {
        bail!(
            "No API key found for {}. Set {} or run `gai config set provider.{}.api_key <key>`",
            provider.name(),
            env_var,
            provider.name()
        );
    }

    println!(
        "{} No {} API key found. Enter one to continue (it is saved to your gai config).",
        "setup:".cyan().bold(),
        provider.name()
    );
    let mut rl = DefaultEditor::new()?;
    let key = loop {
        let line = match rl.readline(&format!("{} ", "API key:".bold())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                bail!("API key setup cancelled")
            }
            Err(e) => return Err(e.into()),
        };
        let key = line.trim().to_string();
        match check_api_key(provider, &key) {
            Ok(()) => break key,
            Err(msg) => eprintln!("{} {}", "error:".red().bold(), msg),
        }
    };

    let field = format!("provider.{}.api_key", provider.name());
    let path = Config::set_global_value(&field, &key)?;
    config.set_value(&field, &key)?;
    println!("{} {}", "API key saved to".green(), path.display());
    Ok(())
}
