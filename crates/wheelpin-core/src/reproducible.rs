//! Reproducibility check: rebuilding a repository's wheels must not change the
//! working tree of the repository holding them.
//!
//! The build is an external command, run as
//! `<program> <args…> --pkg-dir <url> --project <repo> --clobber` from the
//! checked-out wheel repository. Afterwards `git diff --exit-code` must pass
//! and `git status --porcelain` must be empty.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::config::WheelpinConfig;
use crate::git;
use crate::process::{self, ProcessError};

#[derive(Debug, Error)]
pub enum ReproError {
    #[error("{repo}: wheel build failed")]
    Build {
        repo: String,
        #[source]
        source: ProcessError,
    },

    #[error("{repo}: wheel build modified tracked files: {}", .files.join(", "))]
    Modified { repo: String, files: Vec<String> },

    #[error("{repo}: wheel build left the working tree dirty: {}", .entries.join(", "))]
    Dirty { repo: String, entries: Vec<String> },

    #[error("{repo}: git failed")]
    Git {
        repo: String,
        #[source]
        source: ProcessError,
    },
}

/// Program plus leading arguments that builds one repository's wheels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl BuildCommand {
    /// The configured `build_command`, or this executable's `build-wheels` subcommand.
    pub fn from_config(cfg: &WheelpinConfig) -> Result<Self> {
        if let Some(parts) = &cfg.build_command {
            let (program, args) = parts
                .split_first()
                .context("build_command in config is empty")?;
            return Ok(Self {
                program: PathBuf::from(program),
                args: args.to_vec(),
            });
        }
        let exe = std::env::current_exe().context("locate wheelpin executable")?;
        Ok(Self {
            program: exe,
            args: vec!["build-wheels".to_string()],
        })
    }

    fn command(&self, workdir: &Path, repo_url: &str, project: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .args(["--pkg-dir", repo_url, "--project", project, "--clobber"])
            .current_dir(workdir);
        cmd
    }
}

/// Fail if `workdir` has modified tracked files or anything `git status` reports.
pub fn check_tree_clean(workdir: &Path, repo: &str) -> Result<(), ReproError> {
    let git_err = |source| ReproError::Git {
        repo: repo.to_string(),
        source,
    };
    if !git::diff_is_clean(workdir).map_err(git_err)? {
        let files = git::modified_files(workdir).map_err(git_err)?;
        return Err(ReproError::Modified {
            repo: repo.to_string(),
            files,
        });
    }
    let entries = git::status_porcelain(workdir).map_err(git_err)?;
    if !entries.is_empty() {
        return Err(ReproError::Dirty {
            repo: repo.to_string(),
            entries,
        });
    }
    Ok(())
}

/// Build `repo` (fetched from `base_url/repo`) and check that nothing changed.
pub fn check_repo(
    build: &BuildCommand,
    workdir: &Path,
    base_url: &str,
    repo: &str,
) -> Result<(), ReproError> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), repo);
    tracing::info!(%repo, %url, "building wheels for reproducibility check");
    let mut cmd = build.command(workdir, &url, repo);
    process::run_inherited(&mut cmd).map_err(|source| ReproError::Build {
        repo: repo.to_string(),
        source,
    })?;
    check_tree_clean(workdir, repo)?;
    tracing::info!(%repo, "wheel build is reproducible");
    Ok(())
}

/// Check each repository in order, stopping at the first failure.
/// Returns how many were checked.
pub fn check_all(
    build: &BuildCommand,
    workdir: &Path,
    base_url: &str,
    repos: &[String],
) -> Result<usize, ReproError> {
    for repo in repos {
        check_repo(build, workdir, base_url, repo)?;
    }
    Ok(repos.len())
}
