use std::{env, path::Path};

use litt::repo::{OnDisk, Result};

// Find the repository that encloses `path`, searching upward through
// parent directories.
//
// Returns `litt::repo::Error::NotFound` if there is none.
pub(crate) fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDisk> {
    OnDisk::find(path)
}

// Find the repository that encloses the current working directory.
pub(crate) fn from_current_dir() -> Result<OnDisk> {
    let path = env::current_dir()?;
    from_path(path)
}
