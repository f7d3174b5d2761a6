//! `wheelpin check-reproducible` – rebuild wheels per repository and require a clean tree.

use anyhow::Result;
use wheelpin_core::config::WheelpinConfig;
use wheelpin_core::reproducible::{self, BuildCommand};

/// Runs from the current directory, which must be the checkout holding the wheels.
pub fn run_check_reproducible(cfg: &WheelpinConfig, repos: Vec<String>) -> Result<()> {
    let repos = if repos.is_empty() {
        cfg.repos.clone()
    } else {
        repos
    };
    if repos.is_empty() {
        anyhow::bail!("no repositories to check; pass some or set `repos` in the config");
    }
    let build = BuildCommand::from_config(cfg)?;
    let workdir = std::env::current_dir()?;
    let checked = reproducible::check_all(&build, &workdir, &cfg.repo_base_url, &repos)?;
    println!("{checked} repositories build reproducibly");
    Ok(())
}
