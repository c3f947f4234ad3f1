use crate::{DbaError, Result};
use std::process::Command;

/// Synchronous execution of external programs.
///
/// Commands are always argument vectors, never shell strings, so no value
/// that flows through here is subject to shell interpretation. Production
/// code uses [`SystemRunner`]; tests substitute scripted implementations.
pub trait CommandRunner {
    /// Run a command to completion and capture its standard output.
    ///
    /// The returned text keeps trailing whitespace; callers trim as needed.
    /// A non-success exit status is an error carrying the captured stderr.
    /// There is no timeout: a hung command blocks the caller indefinitely.
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;

    /// Run a command with inherited stdio, blocking until the session ends.
    ///
    /// The session's exit status is not meaningful to callers; only a
    /// failure to launch the program is reported.
    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<()>;
}

/// Runs commands via `std::process::Command`.
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        tracing::debug!(program, ?args, "executing command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| DbaError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(DbaError::CommandFailed {
                command: render_command(program, args),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr)
                    .trim_end()
                    .to_string(),
            });
        }

        if !output.stderr.is_empty() {
            tracing::debug!(
                program,
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "command wrote to stderr"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<()> {
        tracing::debug!(program, ?args, "starting interactive command");

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| DbaError::Spawn {
                program: program.to_string(),
                source,
            })?;

        tracing::debug!(program, %status, "interactive command ended");
        Ok(())
    }
}

fn render_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program];
    parts.extend_from_slice(args);
    parts.join(" ")
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
