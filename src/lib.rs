#![warn(missing_docs)]

//! # Depwalk - Batch Dependency Installer
//!
//! Depwalk walks a directory tree, finds every directory that directly
//! contains a package manifest (`package.json` by default), and runs the
//! package manager's install command in each one, sequentially.
//!
//! ## Behavior
//!
//! - **Scan first, install second**: the full scan completes before any
//!   install starts, so the batch order is fixed up front.
//! - **Failure containment**: an unreadable subtree or a failing install is
//!   reported and skipped; the rest of the batch still runs.
//! - **No surprises**: installs run one at a time with the child's output
//!   streamed straight through, and the process exits 0 even when individual
//!   installs fail.
//!
//! ## Architecture
//!
//! - [`scanner`]: filesystem traversal over a narrow [`scanner::Filesystem`]
//!   trait, with the cache-directory and excluded-fragment skip rules
//! - [`runner`]: the sequential install loop and its [`runner::Executor`]
//!   subprocess seam
//! - [`config`]: TOML configuration (manifest name, cache directory name,
//!   install command lines)
//! - [`cli`]: clap argument definitions
//! - [`output`]: colored, verbosity-aware console messages
//!
//! ## Example Usage
//!
//! ```no_run
//! use depwalk::{DepwalkContext, RunOptions};
//! use depwalk::runner::ShellExecutor;
//! use depwalk::scanner::RealFs;
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = RunOptions {
//!     remove_lockfile: true,
//!     ..RunOptions::default()
//! };
//! let ctx = DepwalkContext::new(Some("workspace".into()), None, options)?;
//! depwalk::runner::execute(&ctx, &RealFs, &ShellExecutor)?;
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Configuration parsing and management.
pub mod config;

/// Output formatting and styling.
pub mod output;

/// Sequential install loop and subprocess execution.
pub mod runner;

/// Filesystem scanning and directory traversal.
pub mod scanner;

#[cfg(test)]
pub(crate) mod test_utils;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the depwalk binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/depwalk/config.toml";

/// Options for a single run, parsed once from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Delete the lockfile in each directory before installing.
    pub remove_lockfile: bool,

    /// Use the lenient install command form that tolerates
    /// platform-specific failures.
    pub ignore_platform: bool,

    /// Exclude paths containing the configured fragment from traversal.
    pub skip_excluded: bool,

    /// Scan and report, but execute nothing and delete nothing.
    pub dry_run: bool,
}

/// Central context for a depwalk invocation.
///
/// Holds the resolved scan root, the loaded configuration, and the run
/// options. Built once in `main` and passed explicitly into the scan and
/// install steps so both stay independently testable.
#[derive(Debug, Clone)]
pub struct DepwalkContext {
    /// Absolute path of the directory the scan starts from.
    pub root: PathBuf,

    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,

    /// Options for this run.
    pub options: RunOptions,
}

impl DepwalkContext {
    /// Creates a context from an optional root (defaults to the current
    /// directory) and an optional explicit config path (defaults to
    /// [`DEFAULT_CONFIG_PATH`] under the home directory).
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined, the
    /// configuration cannot be read or created, or the root path does not
    /// exist or is not a directory.
    pub fn new(
        root: Option<PathBuf>,
        config_path: Option<PathBuf>,
        options: RunOptions,
    ) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => {
                let home = dirs::home_dir().context("Could not find home directory")?;
                home.join(DEFAULT_CONFIG_PATH)
            }
        };

        let config = config::Config::load(&config_path)?;

        let root = root.unwrap_or_else(|| PathBuf::from("."));
        let root = root.canonicalize().with_context(|| {
            format!(
                "Root path does not exist or is unreadable: {}",
                root.display()
            )
        })?;
        if !root.is_dir() {
            return Err(anyhow::anyhow!(
                "Root path is not a directory: {}",
                root.display()
            ));
        }

        Ok(Self {
            root,
            config_path,
            config,
            options,
        })
    }

    /// Creates a context with explicit paths for testing, bypassing the home
    /// directory lookup.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created, or
    /// the root is invalid.
    pub fn new_explicit(root: PathBuf, config_path: PathBuf, options: RunOptions) -> Result<Self> {
        Self::new(Some(root), Some(config_path), options)
    }
}
