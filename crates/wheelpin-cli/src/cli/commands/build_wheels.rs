//! `wheelpin build-wheels` – build a package's wheels and refresh its checksums.

use anyhow::Result;
use std::path::PathBuf;
use wheelpin_core::build::{self, BuildOptions, PackageSource};
use wheelpin_core::config::WheelpinConfig;

pub fn run_build_wheels(
    cfg: &WheelpinConfig,
    pkg_dir: &str,
    project: Option<String>,
    requirements: Option<PathBuf>,
    clobber: bool,
) -> Result<()> {
    let opts = BuildOptions {
        source: PackageSource::parse(pkg_dir),
        project,
        requirements_dir: requirements,
        clobber,
    };
    let summary = build::build_wheels(cfg, &opts)?;
    println!(
        "{}: {} artifacts in {} ({} new, {} kept)",
        summary.project,
        summary.artifacts,
        summary.wheel_dir.display(),
        summary.copied,
        summary.kept
    );
    if summary.manifest_changed {
        eprintln!(
            "warning: {}/sha256sums.txt changed; sign it before running update-requirements",
            summary.wheel_dir.display()
        );
    }
    Ok(())
}
