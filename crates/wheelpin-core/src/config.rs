use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the checksums file kept next to the built artifacts.
pub const SHA256SUMS_FILE: &str = "sha256sums.txt";
/// Detached signature of [`SHA256SUMS_FILE`].
pub const SHA256SUMS_SIGNATURE_FILE: &str = "sha256sums.txt.asc";
/// Input requirements file inside the requirements directory.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";
/// Hash-locked output written by `update-requirements`.
pub const BUILD_REQUIREMENTS_FILE: &str = "build-requirements.txt";

/// Global configuration loaded from `~/.config/wheelpin/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelpinConfig {
    /// Directory holding one subdirectory of wheels and sources per project.
    pub wheels_dir: PathBuf,
    /// Requirements directory, relative to the package directory.
    pub requirements_dir: PathBuf,
    /// Python interpreter used to run pip.
    pub python: String,
    /// Base URL the reproducibility check clones repositories from.
    pub repo_base_url: String,
    /// Repositories checked by `check-reproducible` when none are given.
    pub repos: Vec<String>,
    /// Also run `gpg --verify` on the checksums signature, not just check it exists.
    #[serde(default)]
    pub verify_signature: bool,
    /// Exported as SOURCE_DATE_EPOCH to pip when set.
    #[serde(default)]
    pub source_date_epoch: Option<u64>,
    /// Build command used by the reproducibility check (program followed by
    /// leading args). If missing, the running executable's `build-wheels` is used.
    #[serde(default)]
    pub build_command: Option<Vec<String>>,
}

impl Default for WheelpinConfig {
    fn default() -> Self {
        Self {
            wheels_dir: PathBuf::from("localwheels"),
            requirements_dir: PathBuf::from("requirements"),
            python: "python3".to_string(),
            repo_base_url: "https://github.com/freedomofpress".to_string(),
            repos: vec![
                "securedrop-client".to_string(),
                "securedrop-export".to_string(),
                "securedrop-log".to_string(),
                "securedrop-proxy".to_string(),
            ],
            verify_signature: false,
            source_date_epoch: None,
            build_command: None,
        }
    }
}

impl WheelpinConfig {
    /// Directory holding the artifacts and checksums of `project`.
    pub fn project_wheel_dir(&self, project: &str) -> PathBuf {
        self.wheels_dir.join(project)
    }

    /// `<pkg_dir>/<requirements_dir>/requirements.txt`.
    pub fn requirements_path(&self, pkg_dir: &Path, requirements_dir: Option<&Path>) -> PathBuf {
        pkg_dir
            .join(requirements_dir.unwrap_or(self.requirements_dir.as_path()))
            .join(REQUIREMENTS_FILE)
    }

    /// `<pkg_dir>/<requirements_dir>/build-requirements.txt`.
    pub fn build_requirements_path(
        &self,
        pkg_dir: &Path,
        requirements_dir: Option<&Path>,
    ) -> PathBuf {
        pkg_dir
            .join(requirements_dir.unwrap_or(self.requirements_dir.as_path()))
            .join(BUILD_REQUIREMENTS_FILE)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wheelpin")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WheelpinConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WheelpinConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: WheelpinConfig = toml::from_str(&data)?;
    Ok(cfg)
}
