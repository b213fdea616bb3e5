//! External command execution.
//!
//! All interaction with `git` and `zip` goes through the [`CommandExecutor`]
//! trait so tests can substitute a stub and exercise the pipeline without
//! spawning processes. Invocations block until the subprocess exits; the
//! tools involved are local and short-lived, so no timeout is imposed.

use crate::error::{PkgshipError, Result};
use log::debug;
use std::process::{Command, Output};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the
    /// command.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pkgship::exec::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run("git", &["--version"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), pkgship::error::PkgshipError>(())
    /// ```
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system.
///
/// # Examples
///
/// ```no_run
/// use pkgship::exec::{CommandExecutor, SystemCommandExecutor};
///
/// let executor = SystemCommandExecutor;
/// let output = executor.run("zip", &["-v"])?;
/// assert!(output.status.success());
/// # Ok::<(), pkgship::error::PkgshipError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        Command::new(cmd)
            .args(args)
            .output()
            .map_err(PkgshipError::from)
    }
}

/// Renders a command and its arguments as a single display line.
#[must_use]
pub fn render_command(cmd: &str, args: &[&str]) -> String {
    let mut line = String::from(cmd);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Runs a command and returns its stdout, treating a non-zero exit as an
/// error.
///
/// The error carries the exact command line and the trimmed combined stdout
/// and stderr of the failed invocation.
///
/// # Errors
///
/// Returns [`PkgshipError::ExternalTool`] if the command exits non-zero, or
/// the underlying error if it could not be run at all.
pub fn run_tool(executor: &dyn CommandExecutor, cmd: &str, args: &[&str]) -> Result<String> {
    let command = render_command(cmd, args);
    debug!("running `{command}`");

    let output = executor.run(cmd, args)?;
    if !output.status.success() {
        return Err(PkgshipError::ExternalTool {
            command,
            output: combined_output(&output),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Returns true if the given command runs and exits successfully.
pub fn command_succeeds(executor: &dyn CommandExecutor, cmd: &str, args: &[&str]) -> bool {
    executor.run(cmd, args).is_ok_and(|o| o.status.success())
}

/// Concatenates trimmed stdout and stderr for error reporting.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut combined = stdout.trim().to_owned();
    if !stderr.trim().is_empty() {
        if !combined.is_empty() {
            combined.push('\n');
        }
        combined.push_str(stderr.trim());
    }
    combined
}
