//! Progress and result output for the pkgship CLI.
//!
//! Progress lines go to a caller-supplied writer (stderr in the binary) so
//! the archive path remains the only thing printed to stdout and output is
//! capturable in tests.

use camino::Utf8Path;
use std::io::Write;

/// Writes one line to the given sink, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort progress reporting; ignore write failures.
    }
}

/// Formats the success message for a finished packaging run.
#[must_use]
pub fn success_message(archive_path: &Utf8Path) -> String {
    format!("Package archive created: {archive_path}")
}
