//! Error types for the pkgship CLI.
//!
//! This module defines semantic error variants for every way a packaging run
//! can fail. All failures are terminal: nothing is retried, each error
//! propagates to the top level and yields exit code 1.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during a packaging run.
#[derive(Debug, Error)]
pub enum PkgshipError {
    /// One or more required external tools are not runnable.
    #[error("required tools not available: {tools}; install them and re-run")]
    MissingTools {
        /// Comma-separated names of the missing tools.
        tools: String,
    },

    /// The package root is not a git working copy.
    #[error("{path} is not a git working copy (no .git directory)")]
    NotARepository {
        /// Directory that was expected to contain version-control metadata.
        path: Utf8PathBuf,
    },

    /// The working tree has uncommitted or untracked changes.
    #[error("working tree has uncommitted changes; commit or stash them first:\n{status}")]
    DirtyWorkingTree {
        /// The non-empty `git status --porcelain` output.
        status: String,
    },

    /// No ancestor of the starting directory contains a package manifest.
    #[error("package root not found: no controller.php in {start} or any parent directory")]
    RootNotFound {
        /// Directory the upward search started from.
        start: Utf8PathBuf,
    },

    /// The package manifest file does not exist.
    #[error("package manifest not found at {path}")]
    ManifestNotFound {
        /// Path where the manifest was expected.
        path: Utf8PathBuf,
    },

    /// The package manifest exists but could not be read, or was empty.
    #[error("could not read package manifest {path}: {reason}")]
    ManifestRead {
        /// Path to the unreadable manifest.
        path: Utf8PathBuf,
        /// Description of the read failure.
        reason: String,
    },

    /// The package manifest does not match the expected token shape.
    #[error("malformed package manifest: {reason}")]
    ManifestFormat {
        /// Description of the shape violation.
        reason: String,
    },

    /// An external tool exited with a non-zero status.
    #[error("`{command}` failed: {output}")]
    ExternalTool {
        /// The exact command line that was invoked.
        command: String,
        /// Trimmed combined stdout and stderr of the failed invocation.
        output: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

/// Result type alias using [`PkgshipError`].
pub type Result<T> = std::result::Result<T, PkgshipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tools_names_the_tools() {
        let err = PkgshipError::MissingTools {
            tools: "git, zip".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git, zip"));
        assert!(msg.contains("install them"));
    }

    #[test]
    fn dirty_working_tree_includes_status_output() {
        let err = PkgshipError::DirtyWorkingTree {
            status: " M controller.php".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("uncommitted changes"));
        assert!(msg.contains(" M controller.php"));
    }

    #[test]
    fn manifest_not_found_includes_path() {
        let err = PkgshipError::ManifestNotFound {
            path: Utf8PathBuf::from("/repo/controller.php"),
        };
        assert!(err.to_string().contains("/repo/controller.php"));
    }

    #[test]
    fn external_tool_includes_command_and_output() {
        let err = PkgshipError::ExternalTool {
            command: "zip -d foo-1.0.zip foo/composer.json".to_owned(),
            output: "zip error: Nothing to do!".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("zip -d foo-1.0.zip"));
        assert!(msg.contains("Nothing to do!"));
    }

    #[test]
    fn io_error_converts_via_from() {
        let err = PkgshipError::from(std::io::Error::other("disk on fire"));
        assert!(err.to_string().contains("disk on fire"));
    }
}
