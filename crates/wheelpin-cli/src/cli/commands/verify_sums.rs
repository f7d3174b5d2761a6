//! `wheelpin verify-sums` – checksums file and signature must be present.

use anyhow::Result;
use wheelpin_core::config::WheelpinConfig;
use wheelpin_core::verify;

pub fn run_verify_sums(cfg: &WheelpinConfig, project: &str, gpg_verify: bool) -> Result<()> {
    let wheel_dir = cfg.project_wheel_dir(project);
    let paths = verify::verify(&wheel_dir, gpg_verify || cfg.verify_signature)?;
    println!("OK {}", paths.sums.display());
    Ok(())
}
