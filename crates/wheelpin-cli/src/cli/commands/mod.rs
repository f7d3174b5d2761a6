//! CLI command handlers, one file per command.

mod build_wheels;
mod check_reproducible;
mod checksum;
mod completions;
mod update_requirements;
mod verify_sums;

pub use build_wheels::run_build_wheels;
pub use check_reproducible::run_check_reproducible;
pub use checksum::run_checksum;
pub use completions::{run_completions, run_man};
pub use update_requirements::run_update_requirements;
pub use verify_sums::run_verify_sums;
