use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::OnDisk;
use crate::repo::{Config, Error, Result, GIT_DIR_NAME};

const DESCRIPTION_TXT: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

const HEAD_TXT: &str = "ref: refs/heads/master\n";

const SKELETON_DIRS: &[&[&str]] = &[
    &["branches"],
    &["objects"],
    &["refs", "heads"],
    &["refs", "tags"],
];

impl OnDisk {
    /// Creates a new, empty repository on the local file system.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init), with one
    /// difference: `work_dir` must either not exist (it is then created, along
    /// with any missing parents) or be an empty directory. A relative `work_dir`
    /// is taken relative to the current directory.
    ///
    /// The `.git` directory itself is created with a single exclusive
    /// `mkdir`, so if two processes race to initialize the same path, one of
    /// them fails with [`Error::NotEmpty`] before writing anything.
    ///
    /// Initialization is not transactional. If it fails partway, whatever was
    /// already written stays on disk, and running `init` again on the same path
    /// fails with [`Error::NotEmpty`].
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = absolute(work_dir.as_ref())?;
        prepare_work_dir(&work_dir)?;

        let work_dir = fs::canonicalize(&work_dir)?;
        let git_dir = work_dir.join(GIT_DIR_NAME);

        match fs::create_dir(&git_dir) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::NotEmpty(work_dir));
            }
            Err(err) => return Err(err.into()),
        }

        let repo = OnDisk::new_permissive(work_dir)?;

        for segments in SKELETON_DIRS {
            repo.dir(segments, true)?;
        }

        create_file(&repo, &["description"], DESCRIPTION_TXT)?;
        create_file(&repo, &["HEAD"], HEAD_TXT)?;

        let config = Config::repository_defaults();
        config.save(repo.git_dir())?;

        info!(work_dir = %repo.work_dir().display(), "initialized empty repository");

        Ok(OnDisk {
            config: Some(config),
            ..repo
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

fn prepare_work_dir(work_dir: &Path) -> Result<()> {
    match fs::metadata(work_dir) {
        Ok(meta) if !meta.is_dir() => Err(Error::NotADirectory(work_dir.to_path_buf())),
        Ok(_) => {
            if fs::read_dir(work_dir)?.next().is_some() {
                Err(Error::NotEmpty(work_dir.to_path_buf()))
            } else {
                Ok(())
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(work_dir)?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn create_file(repo: &OnDisk, segments: &[&str], contents: &str) -> Result<()> {
    let path = repo
        .file(segments, true)?
        .unwrap_or_else(|| repo.path(segments));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)?;

    file.write_all(contents.as_bytes())?;
    Ok(())
}
