use std::fs;
use std::path::Path;

use tracing::debug;

use super::OnDisk;
use crate::repo::{Error, Result, GIT_DIR_NAME};

impl OnDisk {
    /// Find the repository enclosing `start`.
    ///
    /// Looks for a `.git` directory in `start` and then in each of its parents
    /// in turn, and opens the first one found with [`OnDisk::open`] (so a repository
    /// with a missing or unsupported config is an error, not a reason to keep
    /// looking).
    ///
    /// `start` is canonicalized first, which resolves symlinks and `..`. If the
    /// filesystem root is reached without finding anything, the result is
    /// [`Error::NotFound`].
    pub fn find<P: AsRef<Path>>(start: P) -> Result<Self> {
        let start = fs::canonicalize(start.as_ref())?;
        let mut current = start.as_path();

        loop {
            if current.join(GIT_DIR_NAME).is_dir() {
                debug!(work_dir = %current.display(), "found repository");
                return OnDisk::open(current);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        debug!(start = %start.display(), "reached filesystem root");
        Err(Error::NotFound(start))
    }

    /// Like [`OnDisk::find`], but when `required` is false, reaching the
    /// filesystem root gives `Ok(None)` instead of [`Error::NotFound`].
    pub fn discover<P: AsRef<Path>>(start: P, required: bool) -> Result<Option<Self>> {
        match OnDisk::find(start) {
            Ok(repo) => Ok(Some(repo)),
            Err(Error::NotFound(_)) if !required => Ok(None),
            Err(err) => Err(err),
        }
    }
}
