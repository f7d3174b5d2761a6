//! Checksum verifier: the checksums file and its detached signature must both
//! be on disk before any hash is trusted.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::config::{SHA256SUMS_FILE, SHA256SUMS_SIGNATURE_FILE};
use crate::process::{self, ProcessError};

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("checksums file not found: {}", .0.display())]
    MissingChecksums(PathBuf),

    #[error("checksums signature not found: {} (sign {} first)", .signature.display(), .sums.display())]
    MissingSignature { sums: PathBuf, signature: PathBuf },

    #[error("signature check failed for {}", .sums.display())]
    BadSignature {
        sums: PathBuf,
        #[source]
        source: ProcessError,
    },
}

/// Paths of a checksums file whose signature is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedSums {
    pub sums: PathBuf,
    pub signature: PathBuf,
}

impl SignedSums {
    pub fn in_dir(wheel_dir: &Path) -> Self {
        Self {
            sums: wheel_dir.join(SHA256SUMS_FILE),
            signature: wheel_dir.join(SHA256SUMS_SIGNATURE_FILE),
        }
    }
}

/// Check that `sha256sums.txt` and then `sha256sums.txt.asc` exist in `wheel_dir`.
pub fn verify_sha256sums_file(wheel_dir: &Path) -> Result<SignedSums, VerifyError> {
    let paths = SignedSums::in_dir(wheel_dir);
    if !paths.sums.exists() {
        return Err(VerifyError::MissingChecksums(paths.sums));
    }
    if !paths.signature.exists() {
        return Err(VerifyError::MissingSignature {
            sums: paths.sums,
            signature: paths.signature,
        });
    }
    tracing::debug!(sums = %paths.sums.display(), "checksums and signature present");
    Ok(paths)
}

/// `gpg --verify <signature> <sums>`; the signing key must already be in the keyring.
pub fn gpg_verify(paths: &SignedSums) -> Result<(), VerifyError> {
    let mut cmd = Command::new("gpg");
    cmd.args(["--batch", "--verify"])
        .arg(&paths.signature)
        .arg(&paths.sums);
    process::run_captured(&mut cmd).map_err(|source| VerifyError::BadSignature {
        sums: paths.sums.clone(),
        source,
    })?;
    tracing::info!(sums = %paths.sums.display(), "gpg signature verified");
    Ok(())
}

/// Presence check, plus a gpg signature check when `check_signature` is set.
pub fn verify(wheel_dir: &Path, check_signature: bool) -> Result<SignedSums, VerifyError> {
    let paths = verify_sha256sums_file(wheel_dir)?;
    if check_signature {
        gpg_verify(&paths)?;
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn fails_if_sha256_sums_absent() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_sha256sums_file(dir.path()).unwrap_err();
        assert!(matches!(err, VerifyError::MissingChecksums(ref p) if p.ends_with(SHA256SUMS_FILE)));
    }

    #[test]
    fn sums_absent_wins_even_if_signature_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SHA256SUMS_SIGNATURE_FILE), "sig").unwrap();
        let err = verify_sha256sums_file(dir.path()).unwrap_err();
        assert!(matches!(err, VerifyError::MissingChecksums(_)));
    }

    #[test]
    fn fails_if_sha256_signature_absent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SHA256SUMS_FILE), "").unwrap();
        let err = verify_sha256sums_file(dir.path()).unwrap_err();
        match err {
            VerifyError::MissingSignature { signature, .. } => {
                assert!(signature.ends_with(SHA256SUMS_SIGNATURE_FILE));
            }
            other => panic!("expected MissingSignature, got {other:?}"),
        }
    }

    #[test]
    fn passes_when_both_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SHA256SUMS_FILE), "").unwrap();
        fs::write(dir.path().join(SHA256SUMS_SIGNATURE_FILE), "").unwrap();
        let paths = verify(dir.path(), false).unwrap();
        assert_eq!(paths, SignedSums::in_dir(dir.path()));
    }
}
