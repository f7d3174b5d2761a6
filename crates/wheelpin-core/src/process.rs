//! Running external tools (git, pip, gpg) synchronously.

use std::io;
use std::process::{Command, ExitStatus, Output, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` {status}{}", stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

pub(crate) fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Render a command line for logs and error messages.
pub fn describe(cmd: &Command) -> String {
    let mut s = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        s.push(' ');
        s.push_str(&arg.to_string_lossy());
    }
    s
}

/// Run to completion capturing stdout/stderr; non-zero exit is an error.
pub fn run_captured(cmd: &mut Command) -> Result<Output, ProcessError> {
    let output = capture(cmd)?;
    if !output.status.success() {
        return Err(ProcessError::Failed {
            command: describe(cmd),
            status: describe_status(output.status),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

/// Run to completion capturing stdout/stderr; the exit status is the caller's to judge.
pub fn capture(cmd: &mut Command) -> Result<Output, ProcessError> {
    let command = describe(cmd);
    tracing::debug!(%command, "running");
    cmd.stdin(Stdio::null())
        .output()
        .map_err(|source| ProcessError::Spawn { command, source })
}

/// Run with inherited stdio (pip progress stays visible); non-zero exit is an error.
pub fn run_inherited(cmd: &mut Command) -> Result<(), ProcessError> {
    let command = describe(cmd);
    tracing::debug!(%command, "running");
    let status = cmd
        .status()
        .map_err(|source| ProcessError::Spawn {
            command: command.clone(),
            source,
        })?;
    if !status.success() {
        return Err(ProcessError::Failed {
            command,
            status: describe_status(status),
            stderr: String::new(),
        });
    }
    Ok(())
}
