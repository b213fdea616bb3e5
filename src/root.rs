//! Package-root discovery.
//!
//! pkgship takes no path arguments: the package to release is determined by
//! where it is run from. The root is the nearest ancestor of the starting
//! directory that contains the package manifest.

use crate::error::{PkgshipError, Result};
use crate::manifest::MANIFEST_FILE;
use camino::{Utf8Path, Utf8PathBuf};

/// Walks upward from `start` to the first directory containing the package
/// manifest.
///
/// # Errors
///
/// Returns [`PkgshipError::RootNotFound`] if no ancestor (including `start`
/// itself) contains a manifest file.
pub fn find_package_root(start: &Utf8Path) -> Result<Utf8PathBuf> {
    for dir in start.ancestors() {
        if dir.join(MANIFEST_FILE).is_file() {
            return Ok(dir.to_owned());
        }
    }

    Err(PkgshipError::RootNotFound {
        start: start.to_owned(),
    })
}

/// Gets the current directory as a UTF-8 path.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read or is not
/// valid UTF-8.
pub fn current_dir_utf8() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|err| {
        PkgshipError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("current directory is not valid UTF-8: {err}"),
        ))
    })
}
