//! The install runner: one install attempt per scanned directory, in order,
//! with per-directory failure containment.
//!
//! The batch never aborts early: a failing install is logged and the loop
//! moves on, and the process exit code stays 0 either way. A missing
//! package manager binary is just another per-directory spawn failure.
//! Only errors raised before the scan (a bad configured command line)
//! escalate.

mod command;
mod executor;

pub use command::InstallCommand;
pub use executor::{ExecOutcome, Executor, ShellExecutor};

use crate::DepwalkContext;
use crate::output;
use crate::scanner::{self, Filesystem, ScanRules};
use anyhow::Result;
use colored::Colorize;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

/// Counters for a completed batch.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Directories an install was attempted in.
    pub attempted: usize,
    /// Attempts that failed (non-zero exit or spawn failure).
    pub failed: usize,
    /// Wall time for the whole batch.
    pub elapsed: Duration,
}

/// Scans the tree under the context root and installs dependencies in every
/// manifest-bearing directory found.
///
/// # Errors
/// Returns an error only for an invalid configured command line, detected
/// before the scan starts. Per-directory scan and install failures
/// (including a spawn failure when the package manager binary is absent)
/// are reported and contained.
pub fn execute<F: Filesystem, E: Executor>(ctx: &DepwalkContext, fs: &F, exec: &E) -> Result<()> {
    let manifest = &ctx.config.scan.manifest;

    // Validate the configured command line before scanning, so a bad config
    // is a pre-scan error rather than a mid-run one
    let cmd = select_command(ctx)?;

    output::info(&format!("Finding directories with {manifest} files..."));
    let rules = ScanRules::from_context(ctx);
    let dirs = scanner::scan(fs, &ctx.root, &rules);

    if dirs.is_empty() {
        output::info(&format!("No {manifest} files found."));
        return Ok(());
    }

    output::info(&format!(
        "Found {} directories with {manifest} files.",
        dirs.len()
    ));
    if ctx.options.remove_lockfile {
        output::info(&format!(
            "Will remove {} files before installation.",
            ctx.config.install.lockfile
        ));
    }
    if ctx.options.ignore_platform {
        output::info("Will ignore platform-specific errors during installation.");
    }
    if ctx.options.skip_excluded {
        output::info(&format!(
            "Skipping {} directories.",
            ctx.config.scan.excluded_fragment
        ));
    }

    if ctx.options.dry_run {
        for dir in &dirs {
            println!(
                "  {} {}",
                "would install:".yellow(),
                rel_display(&ctx.root, dir)
            );
        }
        output::info(&format!("{} directories would be installed", dirs.len()));
        return Ok(());
    }

    let summary = install_all(ctx, fs, exec, &cmd, &dirs);

    println!();
    output::success(&format!(
        "All installations completed in {} ({} succeeded, {} failed)",
        humantime::format_duration(Duration::from_secs(summary.elapsed.as_secs())),
        summary.attempted - summary.failed,
        summary.failed
    ));
    Ok(())
}

/// Picks the strict or lenient command line based on the run options.
///
/// # Errors
/// Returns an error if the configured command string cannot be parsed.
pub fn select_command(ctx: &DepwalkContext) -> Result<InstallCommand> {
    let raw = if ctx.options.ignore_platform {
        &ctx.config.install.lenient_command
    } else {
        &ctx.config.install.strict_command
    };
    InstallCommand::parse(raw)
}

/// Runs the install loop over `dirs`, in order, attempting each exactly
/// once. Failures are reported and counted, never propagated.
pub fn install_all<F: Filesystem, E: Executor>(
    ctx: &DepwalkContext,
    fs: &F,
    exec: &E,
    cmd: &InstallCommand,
    dirs: &[std::path::PathBuf],
) -> RunSummary {
    let start = Instant::now();
    let mut failed = 0;

    for dir in dirs {
        let shown = rel_display(&ctx.root, dir);
        println!("\n{} {shown}", "Processing:".bold());

        if ctx.options.remove_lockfile
            && let Err(e) = remove_lockfile(ctx, fs, dir)
        {
            failed += 1;
            output::error(&format!(
                "Failed to install dependencies in {shown}: could not remove {}: {e}",
                ctx.config.install.lockfile
            ));
            continue;
        }

        output::action("run", &cmd.to_string());
        match exec.run(cmd, dir) {
            Ok(outcome) if outcome.success => {
                output::success(&format!("Successfully installed dependencies in {shown}"));
            }
            Ok(outcome) => {
                failed += 1;
                output::error(&format!(
                    "Failed to install dependencies in {shown}: {}",
                    outcome.message
                ));
            }
            Err(e) => {
                failed += 1;
                output::error(&format!("Failed to install dependencies in {shown}: {e:#}"));
            }
        }
    }

    RunSummary {
        attempted: dirs.len(),
        failed,
        elapsed: start.elapsed(),
    }
}

/// Deletes the lockfile in `dir` if present. A deletion failure folds into
/// this directory's failure report: the caller counts the directory as
/// failed and skips its install, and the batch continues.
fn remove_lockfile<F: Filesystem>(ctx: &DepwalkContext, fs: &F, dir: &Path) -> io::Result<()> {
    let lockfile = &ctx.config.install.lockfile;
    let path = dir.join(lockfile);
    if !fs.file_exists(&path) {
        return Ok(());
    }

    output::info(&format!("Removing {lockfile}..."));
    fs.remove_file(&path)?;
    output::info(&format!("{lockfile} removed."));
    Ok(())
}

fn rel_display(root: &Path, dir: &Path) -> String {
    let rel = dir.strip_prefix(root).unwrap_or(dir);
    if rel.as_os_str().is_empty() {
        ".".to_string()
    } else {
        rel.display().to_string()
    }
}
