//! Tests for build-wheels and update-requirements.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_build_wheels_url_with_clobber() {
    match parse(&[
        "wheelpin",
        "build-wheels",
        "--pkg-dir",
        "https://github.com/freedomofpress/securedrop-client",
        "--project",
        "securedrop-client",
        "--clobber",
    ]) {
        CliCommand::BuildWheels {
            pkg_dir,
            project,
            requirements,
            clobber,
        } => {
            assert_eq!(pkg_dir, "https://github.com/freedomofpress/securedrop-client");
            assert_eq!(project.as_deref(), Some("securedrop-client"));
            assert!(requirements.is_none());
            assert!(clobber);
        }
        _ => panic!("expected BuildWheels"),
    }
}

#[test]
fn cli_parse_build_wheels_defaults() {
    match parse(&["wheelpin", "build-wheels", "--pkg-dir", "../securedrop-log"]) {
        CliCommand::BuildWheels {
            project, clobber, ..
        } => {
            assert!(project.is_none());
            assert!(!clobber);
        }
        _ => panic!("expected BuildWheels"),
    }
}

#[test]
fn cli_build_wheels_requires_pkg_dir() {
    assert!(Cli::try_parse_from(["wheelpin", "build-wheels", "--clobber"]).is_err());
}

#[test]
fn cli_parse_update_requirements() {
    match parse(&[
        "wheelpin",
        "update-requirements",
        "--pkg-dir",
        "/src/securedrop-proxy",
        "--requirements",
        "reqs",
        "--gpg-verify",
    ]) {
        CliCommand::UpdateRequirements {
            pkg_dir,
            project,
            requirements,
            gpg_verify,
        } => {
            assert_eq!(pkg_dir, "/src/securedrop-proxy");
            assert!(project.is_none());
            assert_eq!(requirements.as_deref(), Some(Path::new("reqs")));
            assert!(gpg_verify);
        }
        _ => panic!("expected UpdateRequirements"),
    }
}
