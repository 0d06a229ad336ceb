use std::{
    env,
    path::{Path, PathBuf},
};

// Changes the process's working directory for as long as the guard lives,
// and switches back on drop, including when a test panics.
//
// The working directory is process-wide, so every test that uses this
// must be marked #[serial].
pub(crate) struct TempCwd {
    previous: PathBuf,
}

impl TempCwd {
    pub fn new<P: AsRef<Path>>(path: P) -> TempCwd {
        let previous = env::current_dir().unwrap();
        env::set_current_dir(path).unwrap();

        TempCwd { previous }
    }
}

impl Drop for TempCwd {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.previous);
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use serial_test::serial;

    use super::TempCwd;

    #[test]
    #[serial]
    fn restores_on_drop() {
        let old_path = env::current_dir().unwrap();
        let tempdir = tempfile::tempdir().unwrap();

        {
            let _cwd = TempCwd::new(tempdir.path());
            assert_eq!(
                env::current_dir().unwrap(),
                fs::canonicalize(tempdir.path()).unwrap()
            );
        }

        assert_eq!(env::current_dir().unwrap(), old_path);
    }
}
