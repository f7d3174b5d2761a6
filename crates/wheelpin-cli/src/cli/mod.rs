//! CLI for wheelpin.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wheelpin_core::config::{self, WheelpinConfig};

use commands::{
    run_build_wheels, run_check_reproducible, run_checksum, run_completions, run_man,
    run_update_requirements, run_verify_sums,
};

/// Top-level CLI for wheelpin.
#[derive(Debug, Parser)]
#[command(name = "wheelpin")]
#[command(about = "Reproducible wheel builds and hash-locked build requirements", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Build wheels for a package from source and refresh its sha256sums.txt.
    BuildWheels {
        /// Package directory, or an https:// git URL to clone.
        #[arg(long)]
        pkg_dir: String,
        /// Project name (defaults to the last component of --pkg-dir).
        #[arg(long)]
        project: Option<String>,
        /// Requirements directory inside the package.
        #[arg(long, value_name = "DIR")]
        requirements: Option<PathBuf>,
        /// Replace existing wheels and source tarballs.
        #[arg(long)]
        clobber: bool,
    },

    /// Write build-requirements.txt pinned to the wheel sha256sums of a project.
    UpdateRequirements {
        /// Local package directory.
        #[arg(long)]
        pkg_dir: String,
        /// Project name (defaults to the last component of --pkg-dir).
        #[arg(long)]
        project: Option<String>,
        /// Requirements directory inside the package.
        #[arg(long, value_name = "DIR")]
        requirements: Option<PathBuf>,
        /// Also check the signature with gpg.
        #[arg(long)]
        gpg_verify: bool,
    },

    /// Check that a project's sha256sums.txt and its signature are present.
    VerifySums {
        /// Project name.
        #[arg(long)]
        project: String,
        /// Also check the signature with gpg.
        #[arg(long)]
        gpg_verify: bool,
    },

    /// Rebuild wheels for each repository and fail if the working tree changes.
    CheckReproducible {
        /// Repositories to check (defaults to the configured list).
        repos: Vec<String>,
    },

    /// Compute SHA-256 of a file, in sha256sums.txt format.
    Checksum {
        /// Path to the file.
        path: String,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let load_config = || -> Result<WheelpinConfig> {
            let cfg = config::load_or_init()?;
            tracing::debug!("loaded config: {:?}", cfg);
            Ok(cfg)
        };

        match cli.command {
            CliCommand::BuildWheels {
                pkg_dir,
                project,
                requirements,
                clobber,
            } => run_build_wheels(&load_config()?, &pkg_dir, project, requirements, clobber)?,
            CliCommand::UpdateRequirements {
                pkg_dir,
                project,
                requirements,
                gpg_verify,
            } => run_update_requirements(
                &load_config()?,
                &pkg_dir,
                project,
                requirements,
                gpg_verify,
            )?,
            CliCommand::VerifySums {
                project,
                gpg_verify,
            } => run_verify_sums(&load_config()?, &project, gpg_verify)?,
            CliCommand::CheckReproducible { repos } => {
                run_check_reproducible(&load_config()?, repos)?
            }
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
