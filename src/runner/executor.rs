//! Subprocess execution seam.
//!
//! The install loop talks to the package manager through [`Executor`], a
//! one-method trait, so tests can substitute a recording fake. The
//! production [`ShellExecutor`] spawns the command with the target directory
//! as its working directory and the child's stdout/stderr inherited, so
//! install output streams straight to the console.

use super::command::InstallCommand;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Result of one install attempt.
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    /// Whether the command exited successfully.
    pub success: bool,
    /// Human-readable description of the failure; empty on success.
    pub message: String,
}

impl ExecOutcome {
    /// Successful outcome.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    /// Failed outcome with a message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Runs an install command in a working directory.
pub trait Executor {
    /// Executes `cmd` with `dir` as the working directory, blocking until it
    /// finishes.
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned at all. A process
    /// that runs and exits non-zero is a failed [`ExecOutcome`], not an
    /// error.
    fn run(&self, cmd: &InstallCommand, dir: &Path) -> Result<ExecOutcome>;
}

/// Production [`Executor`] using `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl Executor for ShellExecutor {
    fn run(&self, cmd: &InstallCommand, dir: &Path) -> Result<ExecOutcome> {
        debug!(command = %cmd, dir = %dir.display(), "spawning install command");

        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to spawn {} in {}", cmd.program, dir.display()))?;

        if status.success() {
            Ok(ExecOutcome::ok())
        } else {
            Ok(ExecOutcome::failed(format!("command {status}")))
        }
    }
}
