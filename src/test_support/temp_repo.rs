use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::repo::OnDisk;

/// A `TempRepo` is a freshly initialized repository in a temporary
/// directory, deleted again when the struct is dropped.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub(crate) struct TempRepo {
    _tempdir: TempDir,
    repo: OnDisk,
}

impl TempRepo {
    pub fn new() -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let repo = OnDisk::init(tempdir.path()).unwrap();

        TempRepo {
            _tempdir: tempdir,
            repo,
        }
    }

    // Canonical path of the working directory.
    pub fn path(&self) -> &Path {
        self.repo.work_dir()
    }

    pub fn repo(&self) -> &OnDisk {
        &self.repo
    }

    // Create a (possibly nested) directory inside the working directory.
    pub fn mkdirs(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    // Replace the repo's config file with arbitrary text.
    pub fn write_config(&self, txt: &str) {
        fs::write(self.repo.git_dir().join("config"), txt).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::TempRepo;

    #[test]
    fn removed_on_drop() {
        let path = {
            let r = TempRepo::new();
            assert!(r.repo().git_dir().is_dir());
            r.path().to_path_buf()
        };

        assert!(!path.is_dir());
    }
}
