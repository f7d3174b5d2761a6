//! Throwaway git repositories for working-tree drift tests.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .status()
        .expect("spawn git");
    assert!(status.success(), "git {args:?} failed");
}

/// A repository with one committed file, `localwheels/demo/sha256sums.txt`.
pub fn init() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["config", "user.email", "ci@example.com"]);
    git(dir.path(), &["config", "user.name", "CI"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);
    let wheel_dir = dir.path().join("localwheels").join("demo");
    fs::create_dir_all(&wheel_dir).unwrap();
    fs::write(wheel_dir.join("sha256sums.txt"), "").unwrap();
    git(dir.path(), &["add", "."]);
    git(dir.path(), &["commit", "-q", "-m", "init"]);
    dir
}
