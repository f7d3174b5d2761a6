//! Wheel builder: build every pinned requirement of a package from source and
//! record the resulting artifacts in the project's checksums file.
//!
//! Sources come from `pip download --no-binary :all:`, wheels from an offline
//! `pip wheel` over those sources. Both land in `<wheels_dir>/<project>/`,
//! which is tracked in version control; rebuilding the same pins must leave
//! that directory byte-identical.

mod artifacts;
mod pip;

pub use artifacts::{generate_manifest, write_manifest};

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::WheelpinConfig;
use crate::git;

/// Where the package being built comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    Local(PathBuf),
    /// An `https://` git URL, cloned to a scratch directory for the build.
    Remote(String),
}

impl PackageSource {
    pub fn parse(pkg_dir: &str) -> Self {
        if pkg_dir.starts_with("https://") {
            PackageSource::Remote(pkg_dir.to_string())
        } else {
            PackageSource::Local(PathBuf::from(pkg_dir))
        }
    }

    /// Last path or URL component, without a `.git` suffix.
    pub fn project_name(&self) -> Option<String> {
        let s = match self {
            PackageSource::Local(p) => p.to_string_lossy().into_owned(),
            PackageSource::Remote(u) => u.clone(),
        };
        let last = s.trim_end_matches('/').rsplit('/').next()?;
        let last = last.strip_suffix(".git").unwrap_or(last);
        if last.is_empty() || last == "." || last == ".." {
            return None;
        }
        Some(last.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub source: PackageSource,
    /// Defaults to [`PackageSource::project_name`].
    pub project: Option<String>,
    /// Requirements directory inside the package; defaults to the config's.
    pub requirements_dir: Option<PathBuf>,
    /// Replace existing artifacts instead of keeping them.
    pub clobber: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub project: String,
    pub wheel_dir: PathBuf,
    pub copied: usize,
    pub kept: usize,
    pub artifacts: usize,
    /// The checksums file was rewritten and needs a fresh signature.
    pub manifest_changed: bool,
}

/// Resolve the project name from explicit options or the package source.
pub fn resolve_project(source: &PackageSource, project: Option<&str>) -> Result<String> {
    match project {
        Some(p) if !p.is_empty() => Ok(p.to_string()),
        _ => source
            .project_name()
            .with_context(|| format!("cannot derive a project name from {source:?}; pass --project")),
    }
}

/// Build wheels for `opts.source` into `<wheels_dir>/<project>/` and refresh its checksums.
pub fn build_wheels(cfg: &WheelpinConfig, opts: &BuildOptions) -> Result<BuildSummary> {
    let project = resolve_project(&opts.source, opts.project.as_deref())?;
    let scratch = tempfile::Builder::new()
        .prefix("wheelpin-build-")
        .tempdir()
        .context("create scratch directory")?;

    let pkg_dir = match &opts.source {
        PackageSource::Local(p) => p.clone(),
        PackageSource::Remote(url) => {
            let dest = scratch.path().join(&project);
            tracing::info!(%url, dest = %dest.display(), "cloning package");
            git::clone_shallow(url, &dest).with_context(|| format!("clone {url}"))?;
            dest
        }
    };

    let requirements = cfg.requirements_path(&pkg_dir, opts.requirements_dir.as_deref());
    if !requirements.is_file() {
        bail!("requirements file not found: {}", requirements.display());
    }

    let wheel_dir = cfg.project_wheel_dir(&project);
    fs::create_dir_all(&wheel_dir)
        .with_context(|| format!("create {}", wheel_dir.display()))?;
    if opts.clobber {
        let removed = artifacts::clear_artifacts(&wheel_dir)?;
        tracing::info!(removed, dir = %wheel_dir.display(), "clobbered existing artifacts");
    }

    let sources = scratch.path().join("sources");
    let wheels = scratch.path().join("wheels");
    fs::create_dir_all(&sources)?;
    fs::create_dir_all(&wheels)?;

    tracing::info!(%project, requirements = %requirements.display(), "downloading sources");
    pip::download_sources(cfg, &requirements, &sources).context("pip download")?;
    tracing::info!(%project, "building wheels");
    pip::build_wheels(cfg, &requirements, &sources, &wheels).context("pip wheel")?;

    let (src_copied, src_kept) = artifacts::copy_artifacts(&sources, &wheel_dir)?;
    let (whl_copied, whl_kept) = artifacts::copy_artifacts(&wheels, &wheel_dir)?;

    let summary = finish(&project, &wheel_dir, src_copied + whl_copied, src_kept + whl_kept)?;
    Ok(summary)
}

/// Regenerate the checksums file of `wheel_dir` and report.
fn finish(project: &str, wheel_dir: &Path, copied: usize, kept: usize) -> Result<BuildSummary> {
    let manifest = generate_manifest(wheel_dir)?;
    let manifest_changed = write_manifest(wheel_dir, &manifest)?;
    if manifest_changed {
        tracing::warn!(
            dir = %wheel_dir.display(),
            "checksums changed; sign sha256sums.txt before updating requirements"
        );
    }
    Ok(BuildSummary {
        project: project.to_string(),
        wheel_dir: wheel_dir.to_path_buf(),
        copied,
        kept,
        artifacts: manifest.entries().len(),
        manifest_changed,
    })
}
