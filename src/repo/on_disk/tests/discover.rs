use std::fs;

use super::super::*;

use crate::test_support::TempRepo;

#[test]
fn from_work_dir() {
    let tr = TempRepo::new();

    let r = OnDisk::discover(tr.path(), true).unwrap().unwrap();
    assert_eq!(r.work_dir(), tr.path());
    assert_eq!(r.git_dir(), tr.repo().git_dir());
}

#[test]
fn from_nested_dirs() {
    let tr = TempRepo::new();
    let deep = tr.mkdirs("a/b/c/d");

    for start in &[tr.path().join("a"), tr.path().join("a/b"), deep] {
        let r = OnDisk::discover(start, true).unwrap().unwrap();
        assert_eq!(r.git_dir(), tr.repo().git_dir());
    }
}

#[test]
fn from_inside_git_dir() {
    let tr = TempRepo::new();
    let refs = tr.repo().path(&["refs", "heads"]);

    let r = OnDisk::discover(&refs, true).unwrap().unwrap();
    assert_eq!(r.work_dir(), tr.path());
}

#[test]
fn resolves_dot_dot() {
    let tr = TempRepo::new();
    tr.mkdirs("a/b");
    tr.mkdirs("c");

    let start = tr.path().join("a/b/../../c/.");
    let r = OnDisk::discover(&start, true).unwrap().unwrap();
    assert_eq!(r.work_dir(), tr.path());
}

#[test]
fn nearest_repo_wins() {
    let outer = TempRepo::new();
    let inner_dir = outer.mkdirs("vendor/inner");
    let inner = OnDisk::init(&inner_dir).unwrap();
    let start = outer.mkdirs("vendor/inner/src");

    let r = OnDisk::discover(&start, true).unwrap().unwrap();
    assert_eq!(r.git_dir(), inner.git_dir());

    let r = OnDisk::discover(outer.path().join("vendor"), true)
        .unwrap()
        .unwrap();
    assert_eq!(r.git_dir(), outer.repo().git_dir());
}

#[test]
fn skips_git_file() {
    let tr = TempRepo::new();
    let sub = tr.mkdirs("sub");
    fs::write(sub.join(".git"), "gitdir: ../elsewhere\n").unwrap();

    let r = OnDisk::discover(&sub, true).unwrap().unwrap();
    assert_eq!(r.work_dir(), tr.path());
}

#[test]
fn stops_at_bad_repo() {
    let tr = TempRepo::new();
    tr.write_config("[core]\n\trepositoryformatversion = 1\n");
    let sub = tr.mkdirs("sub");

    let err = OnDisk::discover(&sub, false).unwrap_err();
    assert!(matches!(err, Error::UnsupportedVersion(_)));
}

#[test]
fn not_found() {
    let tempdir = tempfile::tempdir().unwrap();
    let start = tempdir.path().join("x/y");
    fs::create_dir_all(&start).unwrap();

    let err = OnDisk::discover(&start, true).unwrap_err();
    if let Error::NotFound(path) = err {
        assert_eq!(path, fs::canonicalize(&start).unwrap());
    } else {
        panic!("wrong error: {:?}", err);
    }

    assert!(OnDisk::discover(&start, false).unwrap().is_none());
}

#[test]
fn find_returns_handle_or_not_found() {
    let tr = TempRepo::new();
    let deep = tr.mkdirs("x/y");

    let r = OnDisk::find(&deep).unwrap();
    assert_eq!(r.git_dir(), tr.repo().git_dir());

    let tempdir = tempfile::tempdir().unwrap();
    let err = OnDisk::find(tempdir.path()).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn start_doesnt_exist() {
    let tempdir = tempfile::tempdir().unwrap();
    let err = OnDisk::discover(tempdir.path().join("nope"), false).unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}

#[cfg(unix)]
#[test]
fn symlink_loop_terminates() {
    use std::os::unix::fs::symlink;

    let tr = TempRepo::new();
    let sub = tr.mkdirs("sub");
    symlink(&sub, sub.join("again")).unwrap();

    let start = sub.join("again/again/again/again");
    let r = OnDisk::discover(&start, true).unwrap().unwrap();
    assert_eq!(r.work_dir(), tr.path());
}

#[cfg(unix)]
#[test]
fn follows_symlink_to_real_location() {
    use std::os::unix::fs::symlink;

    let tr = TempRepo::new();
    let real = tr.mkdirs("real/deep");
    let elsewhere = tempfile::tempdir().unwrap();
    let link = elsewhere.path().join("link");
    symlink(&real, &link).unwrap();

    let r = OnDisk::discover(&link, true).unwrap().unwrap();
    assert_eq!(r.work_dir(), tr.path());
}
