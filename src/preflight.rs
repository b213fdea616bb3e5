//! Preconditions checked before anything is exported.
//!
//! Two things must hold before a release archive is produced: the external
//! tools the pipeline shells out to must be runnable, and the package root
//! must be a git working copy with nothing uncommitted. Both checks are
//! side-effect free.

use crate::error::{PkgshipError, Result};
use crate::exec::{CommandExecutor, command_succeeds, run_tool};
use camino::Utf8Path;

/// Availability of the external tools the pipeline depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// Whether `git` is runnable.
    pub git: bool,
    /// Whether `zip` is runnable.
    pub zip: bool,
}

impl ToolStatus {
    /// Returns `true` if every required tool is available.
    #[must_use]
    pub fn all_available(&self) -> bool {
        self.git && self.zip
    }

    /// Comma-separated names of the missing tools.
    #[must_use]
    pub fn missing(&self) -> String {
        let mut names = Vec::new();
        if !self.git {
            names.push("git");
        }
        if !self.zip {
            names.push("zip");
        }
        names.join(", ")
    }
}

/// Probes whether the required external tools are runnable.
pub fn check_tools(executor: &dyn CommandExecutor) -> ToolStatus {
    ToolStatus {
        git: command_succeeds(executor, "git", &["--version"]),
        // Info-ZIP prints its version banner when invoked as `zip -v` with
        // no archive argument.
        zip: command_succeeds(executor, "zip", &["-v"]),
    }
}

/// Fails unless both `git` and `zip` are runnable.
///
/// # Errors
///
/// Returns [`PkgshipError::MissingTools`] naming every absent tool.
pub fn check_required_tools(executor: &dyn CommandExecutor) -> Result<()> {
    let status = check_tools(executor);
    if status.all_available() {
        Ok(())
    } else {
        Err(PkgshipError::MissingTools {
            tools: status.missing(),
        })
    }
}

/// Fails unless `root` is a git working copy with a clean status.
///
/// Any non-empty `git status --porcelain` line - staged, unstaged, or
/// untracked - makes the tree dirty: a release archive must only ever
/// contain committed state.
///
/// # Errors
///
/// Returns [`PkgshipError::NotARepository`] if `root` has no `.git`
/// directory, [`PkgshipError::DirtyWorkingTree`] if the status output is
/// non-empty, or [`PkgshipError::ExternalTool`] if git itself fails.
pub fn check_clean_repository(executor: &dyn CommandExecutor, root: &Utf8Path) -> Result<()> {
    if !root.join(".git").is_dir() {
        return Err(PkgshipError::NotARepository {
            path: root.to_owned(),
        });
    }

    let stdout = run_tool(
        executor,
        "git",
        &["-C", root.as_str(), "status", "--porcelain"],
    )?;
    if stdout.lines().any(|line| !line.trim().is_empty()) {
        return Err(PkgshipError::DirtyWorkingTree {
            status: stdout.trim_end().to_owned(),
        });
    }

    Ok(())
}
