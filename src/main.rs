//! pkgship CLI entrypoint.
//!
//! This binary packages the repository it is run from into a release zip
//! archive named from the manifest's handle and version. The archive path
//! is printed to stdout on success; all progress and errors go to stderr.

use clap::Parser;
use pkgship::cli::Cli;
use pkgship::error::Result;
use pkgship::exec::SystemCommandExecutor;
use pkgship::output::write_stderr_line;
use pkgship::pipeline::{self, PipelineContext};
use pkgship::root::{current_dir_utf8, find_package_root};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let start = current_dir_utf8()?;
    let root = find_package_root(&start)?;

    let executor = SystemCommandExecutor;
    let context = PipelineContext {
        root: &root,
        quiet: cli.quiet,
    };
    let archive_path = pipeline::run(&context, &executor, stderr)?;

    writeln!(stdout, "{archive_path}")?;
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgship::error::PkgshipError;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = PkgshipError::MissingTools {
            tools: "zip".to_owned(),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("required tools not available: zip"));
    }
}
