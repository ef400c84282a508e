//! Git repository context gathered before a run.
//!
//! The snapshot is formatted into plain text for the model. Failing to read
//! the repository is never fatal: callers fall back to
//! [`CONTEXT_UNAVAILABLE`](crate::constants::CONTEXT_UNAVAILABLE).

use std::process::Command;

use anyhow::{bail, Context, Result};
use thiserror::Error;
use tracing::debug;

/// Point-in-time view of the working repository.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GitContext {
    pub current_branch: String,
    pub is_clean: bool,
    pub untracked_files: Vec<String>,
    pub modified_files: Vec<String>,
    pub staged_files: Vec<String>,
    pub last_commit: String,
    pub remote_url: Option<String>,
}

/// The current directory is not a usable git repository.
#[derive(Debug, Error)]
#[error("Failed to get git context: {0}")]
pub struct ContextUnavailable(String);

/// Runs `git` with the given arguments and returns its stdout.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<String>;
}

/// [`GitRunner`] backed by the `git` binary on `PATH`.
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn file_list(output: &str) -> Vec<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().map(String::from).collect()
}

fn list_files(git: &dyn GitRunner, args: &[&str]) -> Vec<String> {
    git.run(args).map(|s| file_list(&s)).unwrap_or_default()
}

/// Collects a [`GitContext`] using `git`.
///
/// Only the current branch is required; every other field degrades to an
/// empty value when its command fails.
pub fn gather(git: &dyn GitRunner) -> Result<GitContext, ContextUnavailable> {
    let current_branch = git
        .run(&["branch", "--show-current"])
        .map_err(|e| ContextUnavailable(format!("Not a git repository or git command failed ({e})")))?
        .trim()
        .to_string();

    let is_clean = git
        .run(&["status", "--porcelain"])
        .map(|s| s.trim().is_empty())
        .unwrap_or(false);

    let untracked_files = list_files(git, &["ls-files", "--others", "--exclude-standard"]);
    let modified_files = list_files(git, &["diff", "--name-only"]);
    let staged_files = list_files(git, &["diff", "--cached", "--name-only"]);

    let last_commit = git
        .run(&["rev-parse", "HEAD"])
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let remote_url = git
        .run(&["config", "--get", "remote.origin.url"])
        .ok()
        .map(|s| s.trim().to_string());

    let context = GitContext {
        current_branch,
        is_clean,
        untracked_files,
        modified_files,
        staged_files,
        last_commit,
        remote_url,
    };
    debug!(?context, "gathered git context");
    Ok(context)
}

impl GitContext {
    /// Formats the snapshot as the bullet list sent to the model.
    pub fn format_for_llm(&self) -> String {
        let mut out = format!(
            "Current git context:\n- Branch: {}\n- Working directory clean: {}",
            self.current_branch,
            if self.is_clean { "Yes" } else { "No" }
        );

        if !self.is_clean {
            for (label, files) in [
                ("Modified files", &self.modified_files),
                ("Staged files", &self.staged_files),
                ("Untracked files", &self.untracked_files),
            ] {
                if !files.is_empty() {
                    out.push_str(&format!("\n- {}: {}", label, files.join(", ")));
                }
            }
        }

        if !self.last_commit.is_empty() {
            let short: String = self.last_commit.chars().take(8).collect();
            out.push_str(&format!("\n- Last commit: {}", short));
        }

        if let Some(ref url) = self.remote_url {
            out.push_str(&format!("\n- Remote: {}", url));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Answers from a fixed table; unknown commands fail like a broken git.
    struct CannedGit(HashMap<&'static str, &'static str>);

    impl GitRunner for CannedGit {
        fn run(&self, args: &[&str]) -> Result<String> {
            let key = args.join(" ");
            match self.0.get(key.as_str()) {
                Some(out) => Ok(out.to_string()),
                None => bail!("fail"),
            }
        }
    }

    fn full_repo() -> CannedGit {
        CannedGit(HashMap::from([
            ("branch --show-current", "main\n"),
            ("status --porcelain", ""),
            ("ls-files --others --exclude-standard", "untracked.txt\n"),
            ("diff --name-only", "modified.txt\n"),
            ("diff --cached --name-only", "staged.txt\n"),
            ("rev-parse HEAD", "abc1234def5678\n"),
            ("config --get remote.origin.url", "https://github.com/user/repo.git\n"),
        ]))
    }

    #[test]
    fn test_gather_full_context() {
        let context = gather(&full_repo()).unwrap();
        assert_eq!(
            context,
            GitContext {
                current_branch: "main".into(),
                is_clean: true,
                untracked_files: vec!["untracked.txt".into()],
                modified_files: vec!["modified.txt".into()],
                staged_files: vec!["staged.txt".into()],
                last_commit: "abc1234def5678".into(),
                remote_url: Some("https://github.com/user/repo.git".into()),
            }
        );
    }

    #[test]
    fn test_gather_fails_without_branch() {
        let err = gather(&CannedGit(HashMap::new())).unwrap_err();
        assert!(err.to_string().contains("Not a git repository"));
    }

    #[test]
    fn test_gather_degrades_optional_fields() {
        let git = CannedGit(HashMap::from([
            ("branch --show-current", "feature\n"),
            ("status --porcelain", " M file.txt\n"),
        ]));
        let context = gather(&git).unwrap();
        assert!(!context.is_clean);
        assert!(context.untracked_files.is_empty());
        assert!(context.modified_files.is_empty());
        assert_eq!(context.last_commit, "");
        assert_eq!(context.remote_url, None);
    }

    #[test]
    fn test_file_list_splits_lines() {
        assert_eq!(file_list("a.txt\nb.txt\n"), vec!["a.txt", "b.txt"]);
        assert!(file_list("  \n").is_empty());
    }

    #[test]
    fn test_format_dirty_context() {
        let context = GitContext {
            current_branch: "main".into(),
            is_clean: false,
            untracked_files: vec!["file1.ts".into()],
            modified_files: vec!["file2.ts".into()],
            staged_files: vec!["file3.ts".into()],
            last_commit: "abcdef1234567890".into(),
            remote_url: Some("https://github.com/user/repo.git".into()),
        };
        let formatted = context.format_for_llm();
        assert!(formatted.starts_with("Current git context:"));
        assert!(formatted.contains("Branch: main"));
        assert!(formatted.contains("Working directory clean: No"));
        assert!(formatted.contains("Modified files: file2.ts"));
        assert!(formatted.contains("Staged files: file3.ts"));
        assert!(formatted.contains("Untracked files: file1.ts"));
        assert!(formatted.contains("Last commit: abcdef12"));
        assert!(!formatted.contains("abcdef123"));
        assert!(formatted.contains("Remote: https://github.com/user/repo.git"));
    }

    #[test]
    fn test_format_clean_context_hides_file_lists() {
        let context = GitContext {
            current_branch: "main".into(),
            is_clean: true,
            modified_files: vec!["stale.txt".into()],
            ..Default::default()
        };
        let formatted = context.format_for_llm();
        assert!(formatted.contains("Working directory clean: Yes"));
        assert!(!formatted.contains("Modified files"));
        assert!(!formatted.contains("Last commit"));
        assert!(!formatted.contains("Remote"));
    }
}
