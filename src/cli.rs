//! CLI argument definitions for pkgship.
//!
//! The tool takes no behavioural flags: which package gets released is
//! determined entirely by the directory it is run from. The only switches
//! are for output control.

use clap::Parser;

/// Package the current repository into a release zip archive.
#[derive(Parser, Debug, Default)]
#[command(name = "pkgship")]
#[command(version, about)]
#[command(long_about = concat!(
    "Package the current repository into a release zip archive.\n\n",
    "pkgship walks upward from the current directory to the nearest one ",
    "containing a controller.php package manifest, reads the package handle ",
    "and version from it, and exports the committed tree at HEAD to ",
    "<handle>-<version>.zip with every entry rooted under <handle>/. ",
    "Repository-only files (composer.json, LICENSE.TXT) are then stripped ",
    "from the archive.\n\n",
    "The working tree must be clean: any staged, unstaged, or untracked ",
    "change aborts the run before anything is written.\n\n",
    "On success the archive path is printed to standard output.",
))]
pub struct Cli {
    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn quiet_flag_parses_in_both_forms() {
        for invocation in [["pkgship", "-q"], ["pkgship", "--quiet"]] {
            let cli = Cli::parse_from(invocation);
            assert!(cli.quiet);
        }
    }

    #[test]
    fn default_invocation_is_not_quiet() {
        let cli = Cli::parse_from(["pkgship"]);
        assert!(!cli.quiet);
    }

    #[test]
    fn positional_arguments_are_rejected() {
        let result = Cli::try_parse_from(["pkgship", "some/path"]);
        assert!(result.is_err(), "behaviour is directory-driven, not flagged");
    }
}
