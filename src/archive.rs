//! Archive export and post-export cleanup.
//!
//! The release archive is produced by `git archive` from `HEAD`, so the
//! working tree is never read directly and nothing uncommitted can leak
//! into a release. Afterwards a fixed set of repository-only files is
//! deleted from the archive in place with `zip -d`.

use crate::error::Result;
use crate::exec::{CommandExecutor, run_tool};
use crate::manifest::PackageInfo;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// Files stripped from every release archive, relative to the
/// handle-prefixed archive root. Fixed at build time.
pub const CLEANUP_FILES: &[&str] = &["composer.json", "LICENSE.TXT"];

/// The deterministic file name of a release archive,
/// `<handle>-<version>.zip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    handle: String,
    version: String,
}

impl ArchiveName {
    /// Derives the archive name from package metadata.
    #[must_use]
    pub fn for_package(info: &PackageInfo) -> Self {
        Self {
            handle: info.handle().to_owned(),
            version: info.version().to_owned(),
        }
    }

    /// Returns the file name as a string.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}.zip", self.handle, self.version)
    }
}

/// Exports the committed tree at `HEAD` to a zip archive in the package
/// root.
///
/// Every entry inside the archive is prefixed with `<handle>/`, and the
/// archive is written to `<root>/<handle>-<version>.zip`. The working tree
/// and history are not modified.
///
/// # Errors
///
/// Returns [`crate::error::PkgshipError::ExternalTool`] if `git archive`
/// exits non-zero.
pub fn export_zip(
    executor: &dyn CommandExecutor,
    root: &Utf8Path,
    info: &PackageInfo,
) -> Result<Utf8PathBuf> {
    let path = root.join(ArchiveName::for_package(info).filename());
    let prefix = format!("--prefix={}/", info.handle());

    run_tool(
        executor,
        "git",
        &[
            "-C",
            root.as_str(),
            "archive",
            "--format=zip",
            &prefix,
            "-o",
            path.as_str(),
            "HEAD",
        ],
    )?;

    Ok(path)
}

/// Deletes the cleanup-file entries from the produced archive in place.
///
/// No-op when the cleanup list is empty. A listed entry that does not exist
/// in the archive is left to the zip tool's own behaviour (a warning, not a
/// failure).
///
/// # Errors
///
/// Returns [`crate::error::PkgshipError::ExternalTool`] if `zip -d` exits
/// non-zero.
pub fn cleanup_zip(
    executor: &dyn CommandExecutor,
    archive_path: &Utf8Path,
    info: &PackageInfo,
) -> Result<()> {
    if CLEANUP_FILES.is_empty() {
        return Ok(());
    }

    let entries: Vec<String> = CLEANUP_FILES
        .iter()
        .map(|file| format!("{}/{file}", info.handle()))
        .collect();

    let mut args = vec!["-d", archive_path.as_str()];
    args.extend(entries.iter().map(String::as_str));

    run_tool(executor, "zip", &args)?;
    Ok(())
}
