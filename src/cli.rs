//! Command-line interface definitions for depwalk.
//!
//! All argument parsing lives here, using clap's derive macros. The struct is
//! kept separate from `main` so the definitions can be reused for completion
//! generation and exercised directly in tests.
//!
//! Note: Field-level documentation doubles as clap help text, so the comments
//! below are written for end users.

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for depwalk.
#[derive(Parser, Debug)]
#[command(
    name = "depwalk",
    version = crate::VERSION,
    about = "Batch dependency installer for manifest-bearing directory trees",
    long_about = "Walks a directory tree, finds every directory containing a package \
                  manifest, and runs the package manager's install command in each one"
)]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Remove the lockfile in each directory before installing
    #[arg(short, long)]
    pub remove_lock: bool,

    /// Ignore platform-specific errors during installation
    #[arg(short, long)]
    pub ignore_platform: bool,

    /// Skip paths containing the configured excluded fragment (binary/tmp)
    #[arg(short, long)]
    pub skip_binary_tmp: bool,

    /// Show what would be installed without running anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(long, value_name = "PATH", env = "DEPWALK_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Generate shell completion scripts and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Collapses the flag set into the run options passed to the scan and
    /// install steps.
    #[must_use]
    pub const fn run_options(&self) -> crate::RunOptions {
        crate::RunOptions {
            remove_lockfile: self.remove_lock,
            ignore_platform: self.ignore_platform,
            skip_excluded: self.skip_binary_tmp,
            dry_run: self.dry_run,
        }
    }
}
