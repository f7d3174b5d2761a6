//! The handful of git operations the build and drift checks need.

use std::path::Path;
use std::process::Command;

use crate::process::{self, ProcessError};

fn git(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C")
        .arg(dir)
        .env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

/// Shallow clone `url` into `dest` (which must not exist yet).
pub fn clone_shallow(url: &str, dest: &Path) -> Result<(), ProcessError> {
    let mut cmd = Command::new("git");
    cmd.args(["clone", "--depth", "1", "--", url])
        .arg(dest)
        .env("GIT_TERMINAL_PROMPT", "0");
    process::run_captured(&mut cmd)?;
    Ok(())
}

/// Tracked files whose working copy differs from the index (what `git diff` reports).
pub fn modified_files(dir: &Path) -> Result<Vec<String>, ProcessError> {
    let mut cmd = git(dir);
    cmd.args(["diff", "--name-only"]);
    let out = process::run_captured(&mut cmd)?;
    Ok(lines(&out.stdout))
}

/// `git diff --exit-code`: true when tracked files match the index.
pub fn diff_is_clean(dir: &Path) -> Result<bool, ProcessError> {
    let mut cmd = git(dir);
    cmd.args(["diff", "--exit-code", "--quiet"]);
    let out = process::capture(&mut cmd)?;
    match out.status.code() {
        Some(0) => Ok(true),
        Some(1) => Ok(false),
        _ => Err(ProcessError::Failed {
            command: process::describe(&cmd),
            status: process::describe_status(out.status),
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        }),
    }
}

/// `git status --porcelain` lines; empty when the working tree is clean.
pub fn status_porcelain(dir: &Path) -> Result<Vec<String>, ProcessError> {
    let mut cmd = git(dir);
    cmd.args(["status", "--porcelain"]);
    let out = process::run_captured(&mut cmd)?;
    Ok(lines(&out.stdout))
}

fn lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}
