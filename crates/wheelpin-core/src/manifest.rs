//! Checksums file (`sha256sums.txt`): one `<hex-sha256>  <filename>` line per artifact.
//!
//! The filename encodes package name, version and artifact kind. Wheels follow
//! `{dist}-{version}(-{build})?-{py}-{abi}-{plat}.whl`; everything else in the
//! wheel directory is a source distribution.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::checksum;

/// Source-distribution archive suffixes produced by `pip download --no-binary :all:`.
const SDIST_SUFFIXES: &[&str] = &[".tar.gz", ".tar.bz2", ".tar.xz", ".zip", ".tgz"];

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read checksums file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("checksums line {line}: expected `<sha256>  <filename>`, got {content:?}")]
    Malformed { line: usize, content: String },

    #[error("checksums line {line}: {hash:?} is not a hex SHA-256 digest")]
    BadHash { line: usize, hash: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Wheel,
    Sdist,
    Other,
}

impl ArtifactKind {
    pub fn of(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".whl") {
            ArtifactKind::Wheel
        } else if SDIST_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            ArtifactKind::Sdist
        } else {
            ArtifactKind::Other
        }
    }
}

/// Entries written back to back without a line break leave the next entry's
/// hash glued to the end of this filename: `a-1.0-py3-none-any.whl<sha256>  a-1.0.tar.gz`.
fn split_glued_hash(name: &str, more_tokens: bool) -> (&str, Option<&str>) {
    if !more_tokens || name.len() <= 64 || !name.is_char_boundary(name.len() - 64) {
        return (name, None);
    }
    let (filename, tail) = name.split_at(name.len() - 64);
    if checksum::is_sha256_hex(tail) {
        (filename, Some(tail))
    } else {
        (name, None)
    }
}

/// One `(hash, filename)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    /// Lowercase hex SHA-256.
    pub hash: String,
    pub filename: String,
}

impl ChecksumEntry {
    pub fn kind(&self) -> ArtifactKind {
        ArtifactKind::of(&self.filename)
    }

    /// `(distribution, version)` encoded in a wheel filename; `None` for non-wheels.
    pub fn wheel_name_version(&self) -> Option<(&str, &str)> {
        if self.kind() != ArtifactKind::Wheel {
            return None;
        }
        let stem = &self.filename[..self.filename.len() - ".whl".len()];
        let mut parts = stem.split('-');
        let dist = parts.next().filter(|s| !s.is_empty())?;
        let version = parts.next().filter(|s| !s.is_empty())?;
        // py, abi and platform tags must follow.
        if parts.count() < 3 {
            return None;
        }
        Some((dist, version))
    }
}

impl fmt::Display for ChecksumEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.hash, self.filename)
    }
}

/// Parsed checksums file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ChecksumEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ChecksumEntry>) -> Self {
        Self { entries }
    }

    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let malformed = || ManifestError::Malformed {
                line: idx + 1,
                content: raw.to_string(),
            };
            let mut tokens = raw.split_whitespace().peekable();
            let mut glued: Option<&str> = None;
            loop {
                let Some(hash) = glued.take().or_else(|| tokens.next()) else {
                    break;
                };
                let name = tokens.next().ok_or_else(malformed)?;
                // `sha256sum -b` marks binary mode with a leading `*`.
                let name = name.strip_prefix('*').unwrap_or(name);
                if name.is_empty() {
                    return Err(malformed());
                }
                if !checksum::is_sha256_hex(hash) {
                    return Err(ManifestError::BadHash {
                        line: idx + 1,
                        hash: hash.to_string(),
                    });
                }
                let (filename, next_hash) = split_glued_hash(name, tokens.peek().is_some());
                glued = next_hash;
                entries.push(ChecksumEntry {
                    hash: hash.to_ascii_lowercase(),
                    filename: filename.to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn entries(&self) -> &[ChecksumEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn wheels(&self) -> impl Iterator<Item = &ChecksumEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind() == ArtifactKind::Wheel)
    }

    /// Render in `sha256sum` output form, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            out.push_str(&e.to_string());
            out.push('\n');
        }
        out
    }
}
