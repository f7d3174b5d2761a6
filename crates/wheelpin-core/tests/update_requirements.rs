//! Integration tests: `update_requirements` over a package directory and a wheel directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use wheelpin_core::annotate::AnnotateError;
use wheelpin_core::build::PackageSource;
use wheelpin_core::config::WheelpinConfig;
use wheelpin_core::update::{update_requirements, UpdateOptions};
use wheelpin_core::verify::VerifyError;

const TEST_SOURCE_HASH: &str = "8eb170f8d0d61825e09a95b38be068299ddeda82f35e96c3301a8a5e7604cb83";
const TEST_WHEEL_HASH: &str = "8e276e2bf50a9a06c36e20f03b050e59b63dfe0678e37164333deb87af03b6ad";

struct Fixture {
    pkg: TempDir,
    wheels: TempDir,
    cfg: WheelpinConfig,
}

impl Fixture {
    fn new(requirements: &str) -> Self {
        let pkg = tempfile::tempdir().unwrap();
        let wheels = tempfile::tempdir().unwrap();
        fs::create_dir_all(pkg.path().join("requirements")).unwrap();
        fs::write(pkg.path().join("requirements/requirements.txt"), requirements).unwrap();
        fs::create_dir_all(wheels.path().join("demo")).unwrap();
        let cfg = WheelpinConfig {
            wheels_dir: wheels.path().to_path_buf(),
            ..WheelpinConfig::default()
        };
        Self { pkg, wheels, cfg }
    }

    fn wheel_file(&self, name: &str) -> std::path::PathBuf {
        self.wheels.path().join("demo").join(name)
    }

    fn opts(&self) -> UpdateOptions {
        UpdateOptions {
            source: PackageSource::Local(self.pkg.path().to_path_buf()),
            project: Some("demo".into()),
            requirements_dir: None,
            gpg_verify: false,
        }
    }

    fn output(&self) -> std::path::PathBuf {
        self.pkg.path().join("requirements/build-requirements.txt")
    }
}

fn write(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
}

#[test]
fn writes_wheel_hashes_only() {
    let fx = Fixture::new(&format!(
        "pathlib2==2.3.2 \\\n    --hash=sha256:{TEST_SOURCE_HASH}\n"
    ));
    write(
        &fx.wheel_file("sha256sums.txt"),
        &format!(
            "{TEST_WHEEL_HASH}  pathlib2-2.3.2-py2.py3-none-any.whl\n{TEST_SOURCE_HASH}  pathlib2-2.3.2.tar.gz\n"
        ),
    );
    write(&fx.wheel_file("sha256sums.txt.asc"), "signature");

    let summary = update_requirements(&fx.cfg, &fx.opts()).unwrap();
    assert_eq!(summary.requirements, 1);
    assert_eq!(summary.output, fx.output());

    let result = fs::read_to_string(fx.output()).unwrap();
    assert_eq!(
        result,
        format!("pathlib2==2.3.2 --hash=sha256:{TEST_WHEEL_HASH}\n")
    );
    assert!(!result.contains(TEST_SOURCE_HASH));
}

#[test]
fn missing_checksums_file_fails() {
    let fx = Fixture::new("pathlib2==2.3.2\n");
    let err = update_requirements(&fx.cfg, &fx.opts()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VerifyError>(),
        Some(VerifyError::MissingChecksums(_))
    ));
    assert!(!fx.output().exists());
}

#[test]
fn missing_signature_fails() {
    let fx = Fixture::new("pathlib2==2.3.2\n");
    write(&fx.wheel_file("sha256sums.txt"), "");
    let err = update_requirements(&fx.cfg, &fx.opts()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VerifyError>(),
        Some(VerifyError::MissingSignature { .. })
    ));
}

#[test]
fn empty_checksums_fail_for_any_requirement() {
    let fx = Fixture::new("pathlib2==2.3.2\n");
    write(&fx.wheel_file("sha256sums.txt"), "");
    write(&fx.wheel_file("sha256sums.txt.asc"), "signature");
    let err = update_requirements(&fx.cfg, &fx.opts()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AnnotateError>(),
        Some(AnnotateError::MissingWheel { .. })
    ));
    assert!(!fx.output().exists());
}

#[test]
fn remote_package_is_rejected() {
    let fx = Fixture::new("pathlib2==2.3.2\n");
    let opts = UpdateOptions {
        source: PackageSource::parse("https://github.com/freedomofpress/securedrop-log"),
        ..fx.opts()
    };
    let err = update_requirements(&fx.cfg, &opts).unwrap_err();
    assert!(err.to_string().contains("local checkout"));
}

#[test]
fn missing_requirements_file_fails() {
    let fx = Fixture::new("");
    fs::remove_file(fx.pkg.path().join("requirements/requirements.txt")).unwrap();
    let err = update_requirements(&fx.cfg, &fx.opts()).unwrap_err();
    assert!(format!("{err:#}").contains("requirements.txt"));
}
