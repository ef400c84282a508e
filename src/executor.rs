//! Command execution with live output forwarding.
//!
//! [`ShellExecutor`] runs one command at a time through `sh -c`, echoing the
//! child's stdout and stderr to the terminal as they arrive while also
//! capturing both streams into a [`CommandResult`]. Execution never fails:
//! launch errors are folded into the result as data.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Stdio;

use colored::Colorize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::constants::{LAUNCH_FAILURE_EXIT_CODE, STDERR_MARKER, UNKNOWN_EXIT_CODE};

/// Outcome of running a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub command: String,
    /// Stdout, then `\nSTDERR:\n` and stderr when stderr was non-empty.
    pub output: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    fn launch_failure(command: &str, err: impl std::fmt::Display) -> Self {
        Self {
            command: command.to_string(),
            output: format!("Failed to execute command: {}", err),
            exit_code: LAUNCH_FAILURE_EXIT_CODE,
        }
    }
}

/// Runs proposed commands on behalf of the agent loop.
#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `command` to completion. Never fails; problems are reported in
    /// the returned [`CommandResult`].
    async fn execute(&self, command: &str) -> CommandResult;

    /// Run `command` with the terminal's own stdio attached.
    ///
    /// Used for the standalone one-shot command. Implementations that cannot
    /// hand over the terminal fall back to [`execute`](Self::execute).
    async fn execute_inherited(&self, command: &str) -> CommandResult {
        self.execute(command).await
    }
}

/// Splits a command into program and arguments on whitespace.
///
/// No quoting awareness: `git commit -m "two words"` yields four arguments.
/// Returns `None` for a blank command.
pub fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Joins stdout and stderr into the text stored in [`CommandResult::output`].
pub fn compose_output(stdout: &str, stderr: &str) -> String {
    let mut text = stdout.to_string();
    if !stderr.is_empty() {
        text.push_str(STDERR_MARKER);
        text.push_str(stderr);
    }
    text.trim().to_string()
}

/// Where a captured stream is mirrored while it is read.
#[derive(Debug, Clone, Copy)]
enum Echo {
    Stdout,
    Stderr,
    Off,
}

impl Echo {
    fn write(self, bytes: &[u8]) {
        match self {
            Echo::Stdout => {
                let mut out = io::stdout();
                out.write_all(bytes).ok();
                out.flush().ok();
            }
            Echo::Stderr => {
                let mut err = io::stderr();
                err.write_all(bytes).ok();
                err.flush().ok();
            }
            Echo::Off => {}
        }
    }
}

/// Drains `reader` to EOF, mirroring every chunk through `echo`.
async fn pump<R: AsyncRead + Unpin>(mut reader: R, echo: Echo) -> io::Result<Vec<u8>> {
    let mut captured = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        captured.extend_from_slice(&buf[..n]);
        echo.write(&buf[..n]);
    }
    Ok(captured)
}

/// Executes commands through the system shell.
pub struct ShellExecutor {
    working_dir: Option<PathBuf>,
    echo: bool,
}

impl ShellExecutor {
    /// Create an executor that runs in the current directory and mirrors
    /// output to the terminal.
    pub fn new() -> Self {
        Self {
            working_dir: None,
            echo: true,
        }
    }

    /// Run commands in `dir` instead of the current directory.
    #[cfg(test)]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Capture output without mirroring it to the terminal.
    #[cfg(test)]
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// The confirmed text goes to the shell verbatim; splitting only rejects
    /// blank commands.
    fn shell_command(&self, command: &str) -> Option<Command> {
        let (program, _) = split_command(command)?;
        debug!(program, "preparing shell command");

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::inherit());
        Some(cmd)
    }

    fn announce_start(&self) {
        if self.echo {
            println!("\n{}\n", "Executing command...".cyan());
        }
    }

    fn announce_end(&self, exit_code: i32) {
        if !self.echo {
            return;
        }
        if exit_code == 0 {
            println!("\n{}", "Command completed successfully".green());
        } else {
            println!(
                "\n{} {}",
                "Command failed with exit code".red(),
                exit_code.to_string().red().bold()
            );
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn exit_code_of(command: &str, status: std::process::ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => {
            warn!(command, "child exited without a status code");
            UNKNOWN_EXIT_CODE
        }
    }
}

#[async_trait::async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, command: &str) -> CommandResult {
        let Some(mut cmd) = self.shell_command(command) else {
            return CommandResult::launch_failure(command, "empty command");
        };
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        self.announce_start();
        debug!(command, "spawning child process");
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(command, err = %e, "failed to spawn command");
                return CommandResult::launch_failure(command, e);
            }
        };

        let (out_echo, err_echo) = if self.echo {
            (Echo::Stdout, Echo::Stderr)
        } else {
            (Echo::Off, Echo::Off)
        };

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return CommandResult::launch_failure(command, "child output was not piped");
        };

        let (stdout, stderr) = tokio::join!(pump(stdout, out_echo), pump(stderr, err_echo));
        let status = child.wait().await;

        let (stdout, stderr, status) = match (stdout, stderr, status) {
            (Ok(out), Ok(err), Ok(status)) => (out, err, status),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                warn!(command, err = %e, "failed while waiting on command");
                return CommandResult::launch_failure(command, e);
            }
        };

        let exit_code = exit_code_of(command, status);
        debug!(command, exit_code, "command finished");
        self.announce_end(exit_code);

        CommandResult {
            command: command.to_string(),
            output: compose_output(
                &String::from_utf8_lossy(&stdout),
                &String::from_utf8_lossy(&stderr),
            ),
            exit_code,
        }
    }

    /// The user interacts with the child directly; nothing is captured,
    /// so `output` is empty.
    async fn execute_inherited(&self, command: &str) -> CommandResult {
        let Some(mut cmd) = self.shell_command(command) else {
            return CommandResult::launch_failure(command, "empty command");
        };
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());

        self.announce_start();
        debug!(command, "spawning inherited child");
        let status = match cmd.status().await {
            Ok(status) => status,
            Err(e) => {
                warn!(command, err = %e, "failed to spawn command");
                return CommandResult::launch_failure(command, e);
            }
        };

        let exit_code = exit_code_of(command, status);
        self.announce_end(exit_code);
        CommandResult {
            command: command.to_string(),
            output: String::new(),
            exit_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_output_labels_stderr() {
        assert_eq!(compose_output("a\n", "b\n"), "a\n\nSTDERR:\nb");
    }

    #[test]
    fn compose_output_without_stderr_has_no_marker() {
        let out = compose_output("  branch list\n\n", "");
        assert_eq!(out, "branch list");
        assert!(!out.contains("STDERR:"));
    }

    #[test]
    fn split_command_is_whitespace_only() {
        let (program, args) = split_command("git  commit -m \"two words\"").unwrap();
        assert_eq!(program, "git");
        assert_eq!(args, vec!["commit", "-m", "\"two", "words\""]);
        assert!(split_command("   ").is_none());
    }

    #[tokio::test]
    async fn test_execute_captures_both_streams() {
        let executor = ShellExecutor::new().quiet();
        let result = executor.execute("echo out; echo err 1>&2").await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.output, "out\n\nSTDERR:\nerr");
        assert_eq!(result.command, "echo out; echo err 1>&2");
    }

    #[tokio::test]
    async fn test_execute_keeps_command_spacing() {
        let executor = ShellExecutor::new().quiet();
        let result = executor.execute("printf '%s' 'a   b'").await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.output, "a   b");
        assert_eq!(result.command, "printf '%s' 'a   b'");
    }

    #[tokio::test]
    async fn test_execute_signal_kill_is_unknown_exit() {
        let executor = ShellExecutor::new().quiet();
        let result = executor.execute("kill -9 $$").await;
        assert_eq!(result.exit_code, UNKNOWN_EXIT_CODE);
        assert_eq!(result.exit_code, -1);
        assert!(!result.succeeded());
    }

    #[tokio::test]
    async fn test_execute_reports_nonzero_exit() {
        let executor = ShellExecutor::new().quiet();
        let result = executor.execute("exit 3").await;
        assert_eq!(result.exit_code, 3);
        assert!(!result.succeeded());
        assert_eq!(result.output, "");
    }

    #[tokio::test]
    async fn test_execute_missing_program_is_shell_127() {
        let executor = ShellExecutor::new().quiet();
        let result = executor.execute("definitely-not-a-real-binary-xyz").await;
        assert_eq!(result.exit_code, 127);
        assert!(result.output.contains("STDERR:"));
    }

    #[tokio::test]
    async fn test_execute_launch_failure_is_data() {
        let executor = ShellExecutor::new()
            .quiet()
            .with_working_dir("/nonexistent/gai/dir/xyz");
        let result = executor.execute("echo hi").await;
        assert_eq!(result.exit_code, LAUNCH_FAILURE_EXIT_CODE);
        assert!(result.output.starts_with("Failed to execute command:"));
    }

    #[tokio::test]
    async fn test_execute_blank_command_is_data() {
        let executor = ShellExecutor::new().quiet();
        let result = executor.execute("  ").await;
        assert_ne!(result.exit_code, 0);
        assert!(result.output.contains("empty command"));
    }

    #[tokio::test]
    async fn test_execute_inherited_returns_exit_code() {
        let executor = ShellExecutor::new().quiet();
        let result = executor.execute_inherited("true").await;
        assert_eq!(result.exit_code, 0);
        assert!(result.output.is_empty());
        let result = executor.execute_inherited("false").await;
        assert_eq!(result.exit_code, 1);
    }
}
