//! Narrow filesystem abstraction used by the scanner and runner.
//!
//! The traversal and the lockfile handling only need four operations, so
//! they are expressed against this trait instead of `std::fs` directly.
//! Tests drive them with an in-memory fake tree; production uses [`RealFs`].

use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry, as far as the scanner cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
    /// Anything else (symlink, socket, ...), never traversed or matched.
    Other,
}

/// A single directory entry.
#[derive(Debug, Clone)]
pub struct FsEntry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Entry kind.
    pub kind: EntryKind,
}

impl FsEntry {
    /// Final component of the entry's path.
    #[must_use]
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

/// Filesystem operations needed by the scan and install steps.
pub trait Filesystem {
    /// Lists the entries of `dir` in directory-listing order.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read (permissions, or it
    /// vanished between discovery and listing).
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>>;

    /// Whether `path` exists and is a regular file.
    fn file_exists(&self, path: &Path) -> bool;

    /// Deletes the file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Production [`Filesystem`] backed by `std::fs`.
///
/// Symlinks are reported as [`EntryKind::Other`]: the scanner does not follow
/// them, matching the non-following directory walk convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl Filesystem for RealFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::Other
            };
            entries.push(FsEntry {
                path: entry.path(),
                kind,
            });
        }
        Ok(entries)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}
