//! Regenerate a package's hash-locked build requirements from the signed
//! checksums of its locally built wheels.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::annotate;
use crate::build::{resolve_project, PackageSource};
use crate::config::WheelpinConfig;
use crate::requirements;
use crate::verify;

#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub source: PackageSource,
    pub project: Option<String>,
    pub requirements_dir: Option<PathBuf>,
    /// Run `gpg --verify` in addition to the presence checks.
    pub gpg_verify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub project: String,
    pub output: PathBuf,
    pub requirements: usize,
}

/// Read `<pkg>/<requirements>/requirements.txt`, verify the project's checksums
/// and write `<pkg>/<requirements>/build-requirements.txt` with wheel hashes.
pub fn update_requirements(cfg: &WheelpinConfig, opts: &UpdateOptions) -> Result<UpdateSummary> {
    let pkg_dir = match &opts.source {
        PackageSource::Local(p) => p.clone(),
        PackageSource::Remote(url) => {
            bail!("update-requirements needs a local checkout, not {url}; clone it first")
        }
    };
    let project = resolve_project(&opts.source, opts.project.as_deref())?;

    let input = cfg.requirements_path(&pkg_dir, opts.requirements_dir.as_deref());
    let text = fs::read_to_string(&input)
        .with_context(|| format!("read requirements {}", input.display()))?;
    let reqs = requirements::parse_requirements(&text)
        .with_context(|| format!("parse {}", input.display()))?;

    let wheel_dir = cfg.project_wheel_dir(&project);
    let sums = verify::verify(&wheel_dir, opts.gpg_verify || cfg.verify_signature)?;

    let output = cfg.build_requirements_path(&pkg_dir, opts.requirements_dir.as_deref());
    let written = annotate::add_sha256sums(&output, &reqs, &sums.sums)
        .with_context(|| format!("update {}", output.display()))?;

    Ok(UpdateSummary {
        project,
        output,
        requirements: written,
    })
}
