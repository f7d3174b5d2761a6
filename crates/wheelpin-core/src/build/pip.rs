//! pip invocations: fetch sources, then build wheels from them offline.

use std::path::Path;
use std::process::Command;

use crate::config::WheelpinConfig;
use crate::process::{self, ProcessError};

fn pip(cfg: &WheelpinConfig) -> Command {
    let mut cmd = Command::new(&cfg.python);
    cmd.args(["-m", "pip"])
        .env("PYTHONHASHSEED", "0")
        .env("PIP_DISABLE_PIP_VERSION_CHECK", "1");
    if let Some(epoch) = cfg.source_date_epoch {
        cmd.env("SOURCE_DATE_EPOCH", epoch.to_string());
    }
    cmd
}

/// `pip download --no-binary :all:` every pinned requirement into `dest`.
pub(crate) fn download_sources(
    cfg: &WheelpinConfig,
    requirements: &Path,
    dest: &Path,
) -> Result<(), ProcessError> {
    let mut cmd = pip(cfg);
    cmd.args(["download", "--no-binary", ":all:", "--no-deps", "-r"])
        .arg(requirements)
        .arg("-d")
        .arg(dest);
    process::run_inherited(&mut cmd)
}

/// `pip wheel` from the downloaded sources only (no index access).
pub(crate) fn build_wheels(
    cfg: &WheelpinConfig,
    requirements: &Path,
    sources: &Path,
    dest: &Path,
) -> Result<(), ProcessError> {
    let mut cmd = pip(cfg);
    cmd.args(["wheel", "--no-binary", ":all:", "--no-deps", "--no-index"])
        .arg("--find-links")
        .arg(sources)
        .arg("-w")
        .arg(dest)
        .arg("-r")
        .arg(requirements);
    process::run_inherited(&mut cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pip_sets_reproducibility_env() {
        let cfg = WheelpinConfig {
            source_date_epoch: Some(315532800),
            ..WheelpinConfig::default()
        };
        let cmd = pip(&cfg);
        let envs: Vec<_> = cmd
            .get_envs()
            .map(|(k, v)| (k.to_string_lossy().into_owned(), v.map(|v| v.to_string_lossy().into_owned())))
            .collect();
        assert!(envs.contains(&("PYTHONHASHSEED".into(), Some("0".into()))));
        assert!(envs.contains(&("SOURCE_DATE_EPOCH".into(), Some("315532800".into()))));
        assert_eq!(process::describe(&cmd), "python3 -m pip");
    }

    #[test]
    fn pip_without_epoch_leaves_it_unset() {
        let cmd = pip(&WheelpinConfig::default());
        assert!(cmd.get_envs().all(|(k, _)| k != "SOURCE_DATE_EPOCH"));
    }
}
