//! `wheelpin update-requirements` – pin build requirements to local wheel hashes.

use anyhow::Result;
use std::path::PathBuf;
use wheelpin_core::build::PackageSource;
use wheelpin_core::config::WheelpinConfig;
use wheelpin_core::update::{self, UpdateOptions};

pub fn run_update_requirements(
    cfg: &WheelpinConfig,
    pkg_dir: &str,
    project: Option<String>,
    requirements: Option<PathBuf>,
    gpg_verify: bool,
) -> Result<()> {
    let opts = UpdateOptions {
        source: PackageSource::parse(pkg_dir),
        project,
        requirements_dir: requirements,
        gpg_verify,
    };
    let summary = update::update_requirements(cfg, &opts)?;
    println!(
        "Wrote {} requirements for {} to {}",
        summary.requirements,
        summary.project,
        summary.output.display()
    );
    Ok(())
}
