//! Tests for verify-sums, check-reproducible, checksum, completions and man.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_verify_sums() {
    match parse(&["wheelpin", "verify-sums", "--project", "securedrop-log"]) {
        CliCommand::VerifySums {
            project,
            gpg_verify,
        } => {
            assert_eq!(project, "securedrop-log");
            assert!(!gpg_verify);
        }
        _ => panic!("expected VerifySums"),
    }
}

#[test]
fn cli_verify_sums_requires_project() {
    assert!(Cli::try_parse_from(["wheelpin", "verify-sums"]).is_err());
}

#[test]
fn cli_parse_check_reproducible_default_repos() {
    match parse(&["wheelpin", "check-reproducible"]) {
        CliCommand::CheckReproducible { repos } => assert!(repos.is_empty()),
        _ => panic!("expected CheckReproducible"),
    }
}

#[test]
fn cli_parse_check_reproducible_named_repos() {
    match parse(&[
        "wheelpin",
        "check-reproducible",
        "securedrop-log",
        "securedrop-export",
    ]) {
        CliCommand::CheckReproducible { repos } => {
            assert_eq!(repos, vec!["securedrop-log", "securedrop-export"])
        }
        _ => panic!("expected CheckReproducible"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["wheelpin", "checksum", "/path/to/file.whl"]) {
        CliCommand::Checksum { path } => assert_eq!(path, "/path/to/file.whl"),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["wheelpin", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    assert!(matches!(parse(&["wheelpin", "man"]), CliCommand::Man));
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
