//! Filesystem scanning: find every directory that directly contains the
//! package manifest.
//!
//! The walk is a depth-first pre-order traversal with two skip rules:
//! the dependency cache directory (`node_modules`) is never entered, and
//! when the skip flag is set, any path containing the configured excluded
//! fragment is pruned wholesale. A directory that cannot be listed is
//! reported and dropped; the rest of the tree is still scanned.

mod fs;

pub use fs::{EntryKind, Filesystem, FsEntry, RealFs};

use crate::DepwalkContext;
use crate::output;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rules applied at each directory during the scan.
#[derive(Debug, Clone)]
pub struct ScanRules {
    /// Filename that marks a directory as a package unit.
    pub manifest: String,
    /// Directory name never traversed into.
    pub cache_dir: String,
    /// Path fragment pruned from traversal when `skip_excluded` is set.
    pub excluded_fragment: String,
    /// Whether the excluded-fragment rule is active.
    pub skip_excluded: bool,
}

impl ScanRules {
    /// Builds the rules from the loaded configuration and run options.
    #[must_use]
    pub fn from_context(ctx: &DepwalkContext) -> Self {
        Self {
            manifest: ctx.config.scan.manifest.clone(),
            cache_dir: ctx.config.scan.cache_dir.clone(),
            excluded_fragment: ctx.config.scan.excluded_fragment.clone(),
            skip_excluded: ctx.options.skip_excluded,
        }
    }
}

/// Scans the tree under `root` and returns, in traversal order (parent
/// before children, siblings in directory-listing order), every directory
/// that directly contains the manifest file.
///
/// Listing failures are contained: the offending directory is reported via
/// [`output::warning`] and its subtree is absent from the result.
pub fn scan<F: Filesystem>(fs: &F, root: &Path, rules: &ScanRules) -> Vec<PathBuf> {
    let mut found = Vec::new();
    scan_dir(fs, root, rules, &mut found);
    debug!(count = found.len(), root = %root.display(), "scan complete");
    found
}

fn scan_dir<F: Filesystem>(fs: &F, dir: &Path, rules: &ScanRules, found: &mut Vec<PathBuf>) {
    if rules.skip_excluded && dir.to_string_lossy().contains(&rules.excluded_fragment) {
        debug!(dir = %dir.display(), "pruned: matches excluded fragment");
        return;
    }

    let entries = match fs.list_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            output::warning(&format!("Error scanning directory {}: {e}", dir.display()));
            return;
        }
    };

    let manifest: &OsStr = OsStr::new(&rules.manifest);
    if entries
        .iter()
        .any(|e| e.kind == EntryKind::File && e.file_name() == Some(manifest))
    {
        found.push(dir.to_path_buf());
    }

    let cache_dir: &OsStr = OsStr::new(&rules.cache_dir);
    for entry in &entries {
        if entry.kind == EntryKind::Dir && entry.file_name() != Some(cache_dir) {
            scan_dir(fs, &entry.path, rules, found);
        }
    }
}
