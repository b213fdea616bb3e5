//! Packaging pipeline orchestration.
//!
//! Sequences the whole run: preflight checks, metadata extraction, archive
//! export, and archive cleanup. Every step is synchronous and sequential,
//! and every failure is terminal - no step retries. The one compensating
//! action is deleting a partially produced archive when cleanup fails after
//! export succeeded.

use crate::archive::{cleanup_zip, export_zip};
use crate::error::Result;
use crate::exec::CommandExecutor;
use crate::manifest::{MANIFEST_FILE, read_package_info};
use crate::output::{success_message, write_stderr_line};
use crate::preflight::{check_clean_repository, check_required_tools};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::io::Write;

/// Context for one packaging run.
pub struct PipelineContext<'a> {
    /// Package root directory (contains the manifest and `.git`).
    pub root: &'a Utf8Path,
    /// Suppress progress output.
    pub quiet: bool,
}

/// Runs the packaging pipeline and returns the final archive path.
///
/// Progress goes to `stderr` unless quiet mode is set. If the cleanup step
/// fails after the archive was exported, the partial archive is deleted
/// best-effort before the cleanup error propagates.
///
/// # Errors
///
/// Returns the first error from any step: missing tools, dirty or missing
/// repository, unreadable or malformed manifest, or a failed external tool
/// invocation.
pub fn run(
    context: &PipelineContext<'_>,
    executor: &dyn CommandExecutor,
    stderr: &mut dyn Write,
) -> Result<Utf8PathBuf> {
    check_required_tools(executor)?;
    check_clean_repository(executor, context.root)?;

    if !context.quiet {
        write_stderr_line(
            stderr,
            format!("Reading package metadata from {MANIFEST_FILE}..."),
        );
    }
    let info = read_package_info(context.root)?;

    if !context.quiet {
        write_stderr_line(
            stderr,
            format!("Exporting {} {} from HEAD...", info.handle(), info.version()),
        );
    }
    let archive_path = export_zip(executor, context.root, &info)?;

    if let Err(cleanup_err) = cleanup_zip(executor, &archive_path, &info) {
        discard_partial_archive(&archive_path);
        return Err(cleanup_err);
    }

    if !context.quiet {
        write_stderr_line(stderr, success_message(&archive_path));
    }

    Ok(archive_path)
}

/// Best-effort removal of a partially produced archive.
///
/// A failure here must never mask the cleanup error that triggered it, so
/// it is only logged.
fn discard_partial_archive(archive_path: &Utf8Path) {
    if let Err(remove_err) = std::fs::remove_file(archive_path.as_std_path()) {
        debug!("could not remove partial archive {archive_path}: {remove_err}");
    }
}
