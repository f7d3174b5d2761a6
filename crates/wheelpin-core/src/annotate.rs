//! Hash annotator: pins each requirement to the SHA-256 of its locally built wheel(s).
//!
//! Source-distribution hashes in the checksums file are never emitted; the
//! output is meant for installing from the wheel directory only.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::manifest::{Manifest, ManifestError};
use crate::requirements::Requirement;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("no wheel sha256sum found for {requirement}")]
    MissingWheel { requirement: String },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A requirement with the hashes of every wheel that satisfies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRequirement {
    pub requirement: Requirement,
    pub hashes: Vec<String>,
}

impl fmt::Display for AnnotatedRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.requirement)?;
        for h in &self.hashes {
            write!(f, " --hash=sha256:{h}")?;
        }
        Ok(())
    }
}

/// Match every requirement against the wheel entries of `manifest`.
/// Fails on the first requirement without a wheel.
pub fn annotate(
    requirements: &[Requirement],
    manifest: &Manifest,
) -> Result<Vec<AnnotatedRequirement>, AnnotateError> {
    let mut out = Vec::with_capacity(requirements.len());
    for req in requirements {
        let mut hashes: Vec<String> = Vec::new();
        for entry in manifest.wheels() {
            let Some((dist, version)) = entry.wheel_name_version() else {
                continue;
            };
            if req.matches(dist, version) && !hashes.contains(&entry.hash) {
                hashes.push(entry.hash.clone());
            }
        }
        if hashes.is_empty() {
            return Err(AnnotateError::MissingWheel {
                requirement: req.to_string(),
            });
        }
        tracing::debug!(requirement = %req, wheels = hashes.len(), "matched wheel hashes");
        out.push(AnnotatedRequirement {
            requirement: req.clone(),
            hashes,
        });
    }
    Ok(out)
}

/// Render annotated requirements, one per line, newline-terminated.
pub fn render(annotated: &[AnnotatedRequirement]) -> String {
    let mut s = String::new();
    for a in annotated {
        s.push_str(&a.to_string());
        s.push('\n');
    }
    s
}

/// Read `path_shasums`, annotate `requirements` with their wheel hashes and write
/// the result to `path_result`. Nothing is written if any requirement is unmatched.
///
/// Returns the number of requirement lines written.
pub fn add_sha256sums(
    path_result: &Path,
    requirements: &[Requirement],
    path_shasums: &Path,
) -> Result<usize, AnnotateError> {
    let manifest = Manifest::read(path_shasums)?;
    let annotated = annotate(requirements, &manifest)?;
    write_atomic(path_result, render(&annotated).as_bytes())?;
    tracing::info!(
        output = %path_result.display(),
        requirements = annotated.len(),
        "wrote hash-locked requirements"
    );
    Ok(annotated.len())
}

/// Write via a temp file in the same directory, then rename over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), AnnotateError> {
    let write_err = |source| AnnotateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
