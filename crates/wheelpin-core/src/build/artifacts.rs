//! Artifacts in a project's wheel directory and the checksums file over them.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum;
use crate::config::{SHA256SUMS_FILE, SHA256SUMS_SIGNATURE_FILE};
use crate::manifest::{ArtifactKind, ChecksumEntry, Manifest};

/// Wheel and sdist files directly inside `dir`, sorted by filename.
pub(crate) fn list_artifacts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    if !dir.exists() {
        return Ok(out);
    }
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == SHA256SUMS_FILE || name == SHA256SUMS_SIGNATURE_FILE {
            continue;
        }
        match ArtifactKind::of(&name) {
            ArtifactKind::Wheel | ArtifactKind::Sdist => out.push(entry.path()),
            ArtifactKind::Other => tracing::debug!(file = %name, "ignoring non-artifact file"),
        }
    }
    out.sort();
    Ok(out)
}

/// Delete every wheel and sdist in `dir`. The checksums file and signature stay.
pub(crate) fn clear_artifacts(dir: &Path) -> Result<usize> {
    let artifacts = list_artifacts(dir)?;
    for path in &artifacts {
        fs::remove_file(path).with_context(|| format!("remove {}", path.display()))?;
    }
    Ok(artifacts.len())
}

/// Copy artifacts from `from` into `to`. Files already present in `to` are kept.
/// Returns `(copied, kept)`.
pub(crate) fn copy_artifacts(from: &Path, to: &Path) -> Result<(usize, usize)> {
    let mut copied = 0;
    let mut kept = 0;
    for src in list_artifacts(from)? {
        let Some(name) = src.file_name() else {
            continue;
        };
        let dest = to.join(name);
        if dest.exists() {
            tracing::debug!(file = %dest.display(), "keeping existing artifact");
            kept += 1;
            continue;
        }
        fs::copy(&src, &dest)
            .with_context(|| format!("copy {} to {}", src.display(), dest.display()))?;
        copied += 1;
    }
    Ok((copied, kept))
}

/// Hash every artifact in `dir`.
pub fn generate_manifest(dir: &Path) -> Result<Manifest> {
    let mut entries = Vec::new();
    for path in list_artifacts(dir)? {
        let hash = checksum::sha256_path(&path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        entries.push(ChecksumEntry { hash, filename });
    }
    Ok(Manifest::new(entries))
}

/// Write `manifest` as `dir/sha256sums.txt` unless the file already has identical contents.
///
/// When the contents change, a now-stale detached signature is removed.
/// Returns true if the file was (re)written.
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<bool> {
    let path = dir.join(SHA256SUMS_FILE);
    let rendered = manifest.render();
    match fs::read_to_string(&path) {
        Ok(existing) if existing == rendered => {
            tracing::debug!(path = %path.display(), "checksums unchanged");
            return Ok(false);
        }
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    }
    fs::write(&path, rendered).with_context(|| format!("write {}", path.display()))?;

    let sig = dir.join(SHA256SUMS_SIGNATURE_FILE);
    match fs::remove_file(&sig) {
        Ok(()) => tracing::warn!(path = %sig.display(), "removed stale checksums signature"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).with_context(|| format!("remove {}", sig.display())),
    }
    Ok(true)
}
