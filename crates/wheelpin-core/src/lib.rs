pub mod config;
pub mod logging;

pub mod annotate;
pub mod build;
pub mod checksum;
pub mod git;
pub mod manifest;
pub mod process;
pub mod reproducible;
pub mod requirements;
pub mod update;
pub mod verify;
