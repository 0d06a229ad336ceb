//! A repository that stores its metadata in a `.git` directory on the local
//! file system.
//!
//! The layout intentionally follows command-line git's, so that tools which
//! understand a `.git` directory can make sense of a litt repository:
//!
//! ```text
//! .git/
//!     HEAD          ref: refs/heads/master
//!     config        [core] section
//!     description
//!     branches/
//!     objects/
//!     refs/heads/
//!     refs/tags/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Config, Error, Result, GIT_DIR_NAME};

mod discover;
mod init;

/// Handle on a repository whose metadata lives in `<work_dir>/.git`.
///
/// A handle is immutable once constructed. Each call to [`OnDisk::open`],
/// [`OnDisk::init`], or [`OnDisk::discover`] builds a fresh one; nothing is
/// cached between calls.
#[derive(Debug)]
pub struct OnDisk {
    work_dir: PathBuf,
    git_dir: PathBuf,
    config: Option<Config>,
}

impl OnDisk {
    /// Open the existing repository whose working directory is `work_dir`.
    ///
    /// This is a strict open: `work_dir/.git` must be a directory, its `config`
    /// file must exist and parse, and it must declare
    /// `core.repositoryformatversion = 0`. Use [`OnDisk::init`] to create an
    /// empty repository, or [`OnDisk::discover`] to search parent directories.
    pub fn open<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref();
        if !work_dir.join(GIT_DIR_NAME).is_dir() {
            return Err(Error::NotARepository(work_dir.to_path_buf()));
        }

        let work_dir = fs::canonicalize(work_dir)?;
        let git_dir = work_dir.join(GIT_DIR_NAME);
        let config = Config::load(&git_dir, true)?;

        debug!(work_dir = %work_dir.display(), "opened repository");

        Ok(OnDisk {
            work_dir,
            git_dir,
            config,
        })
    }

    // Builds a handle without checking that the metadata directory exists.
    // The config is read if present and not validated.
    pub(crate) fn new_permissive(work_dir: PathBuf) -> Result<Self> {
        let git_dir = work_dir.join(GIT_DIR_NAME);
        let config = Config::load(&git_dir, false)?;

        Ok(OnDisk {
            work_dir,
            git_dir,
            config,
        })
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    /// Return the repository configuration.
    ///
    /// Always present on a handle from [`OnDisk::open`], [`OnDisk::discover`],
    /// or [`OnDisk::init`].
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// Join `segments` onto the `.git` directory. Performs no I/O.
    pub fn path(&self, segments: &[&str]) -> PathBuf {
        let mut path = self.git_dir.clone();
        path.extend(segments);
        path
    }

    /// Resolve a directory under `.git`.
    ///
    /// Returns the path if the directory exists. If it doesn't, `create` decides
    /// between creating it (along with any missing parents) and returning
    /// `Ok(None)`. Calling this again for a directory that was already created
    /// returns the same path.
    ///
    /// Fails with [`Error::NotADirectory`] if the path, or any component of it
    /// below `.git`, exists as something other than a directory.
    pub fn dir(&self, segments: &[&str], create: bool) -> Result<Option<PathBuf>> {
        if let Some(blocker) = self.first_non_dir(segments) {
            return Err(Error::NotADirectory(blocker));
        }

        let path = self.path(segments);
        if path.is_dir() {
            return Ok(Some(path));
        }

        if !create {
            return Ok(None);
        }

        fs::create_dir_all(&path)?;
        debug!(path = %path.display(), "created directory");

        Ok(Some(path))
    }

    /// Resolve a file under `.git`.
    ///
    /// All but the last segment name the parent directory, which is resolved
    /// with [`OnDisk::dir`]. Returns `Ok(None)` if that directory doesn't exist
    /// and `create_parents` is false. The file itself is neither checked nor
    /// created.
    pub fn file(&self, segments: &[&str], create_parents: bool) -> Result<Option<PathBuf>> {
        match segments.split_last() {
            Some((name, parents)) => Ok(self
                .dir(parents, create_parents)?
                .map(|parent| parent.join(name))),
            None => self.dir(segments, create_parents),
        }
    }

    // Walks from `.git` down through `segments` and returns the first entry that
    // exists but isn't a directory.
    fn first_non_dir(&self, segments: &[&str]) -> Option<PathBuf> {
        let mut path = self.git_dir.clone();
        let mut segments = segments.iter();

        loop {
            match fs::metadata(&path) {
                Ok(meta) if !meta.is_dir() => return Some(path),
                Ok(_) => {}
                Err(_) => return None,
            }

            path.push(segments.next()?);
        }
    }
}

#[cfg(test)]
mod tests;
