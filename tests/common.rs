use std::path::Path;

use assert_cmd::Command;

// Build a `litt` command that runs in `dir`.
pub fn litt_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("litt").unwrap();
    cmd.current_dir(dir).env_remove("LITT_LOG");
    cmd
}
