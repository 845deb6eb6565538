//! In-memory fakes for unit tests: a fake filesystem tree and a recording
//! executor. Only compiled for tests.

use crate::runner::{ExecOutcome, Executor, InstallCommand};
use crate::scanner::{EntryKind, Filesystem, FsEntry};
use anyhow::Result;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

/// An in-memory directory tree implementing [`Filesystem`].
///
/// Paths are plain strings; adding a file creates all ancestor directories.
/// Listing order is lexicographic, which keeps traversal-order assertions
/// deterministic.
#[derive(Debug, Default)]
pub struct MemoryFs {
    dirs: BTreeSet<PathBuf>,
    files: RefCell<BTreeSet<PathBuf>>,
    unreadable: BTreeSet<PathBuf>,
    undeletable: BTreeSet<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating ancestor directories.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.add_ancestors(&path);
        self.files.borrow_mut().insert(path);
    }

    /// Adds an empty directory, creating ancestors.
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.add_ancestors(&path);
        self.dirs.insert(path);
    }

    /// Marks a file as undeletable: removing it fails with
    /// `PermissionDenied`.
    pub fn deny_remove(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.add_file(path.clone());
        self.undeletable.insert(path);
    }

    /// Marks a directory as unreadable: listing it fails with
    /// `PermissionDenied`.
    pub fn deny(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.add_ancestors(&path);
        self.dirs.insert(path.clone());
        self.unreadable.insert(path);
    }

    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.files.borrow().contains(path.as_ref())
    }

    fn add_ancestors(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            self.dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }
}

impl Filesystem for MemoryFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
        if self.unreadable.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        if !self.dirs.contains(dir) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }

        let mut entries: Vec<FsEntry> = self
            .dirs
            .iter()
            .filter(|d| d.parent() == Some(dir))
            .map(|d| FsEntry {
                path: d.clone(),
                kind: EntryKind::Dir,
            })
            .chain(
                self.files
                    .borrow()
                    .iter()
                    .filter(|f| f.parent() == Some(dir))
                    .map(|f| FsEntry {
                        path: f.clone(),
                        kind: EntryKind::File,
                    }),
            )
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.borrow().contains(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.undeletable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        if self.files.borrow_mut().remove(path) {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }
}

/// An [`Executor`] that records every invocation and succeeds unless told
/// otherwise.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    calls: RefCell<Vec<PathBuf>>,
    failures: BTreeSet<PathBuf>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes invocations in `dir` report failure.
    pub fn fail_on(&mut self, dir: impl Into<PathBuf>) {
        self.failures.insert(dir.into());
    }

    /// Directories the executor was invoked in, in call order.
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl Executor for FakeExecutor {
    fn run(&self, _cmd: &InstallCommand, dir: &Path) -> Result<ExecOutcome> {
        self.calls.borrow_mut().push(dir.to_path_buf());
        if self.failures.contains(dir) {
            Ok(ExecOutcome::failed("simulated install failure"))
        } else {
            Ok(ExecOutcome::ok())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_fs_listing_is_sorted() {
        let mut fs = MemoryFs::new();
        fs.add_file("/r/b.txt");
        fs.add_file("/r/a.txt");
        fs.add_dir("/r/c");

        let names: Vec<String> = fs
            .list_dir(Path::new("/r"))
            .unwrap()
            .iter()
            .map(|e| e.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c"]);
    }

    #[test]
    fn test_memory_fs_denied_dir() {
        let mut fs = MemoryFs::new();
        fs.deny("/r/secret");
        let err = fs.list_dir(Path::new("/r/secret")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_memory_fs_undeletable_file() {
        let mut fs = MemoryFs::new();
        fs.deny_remove("/r/lock");
        assert!(fs.file_exists(Path::new("/r/lock")));
        let err = fs.remove_file(Path::new("/r/lock")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(fs.file_exists(Path::new("/r/lock")));
    }

    #[test]
    fn test_memory_fs_remove_file() {
        let mut fs = MemoryFs::new();
        fs.add_file("/r/lock");
        assert!(fs.file_exists(Path::new("/r/lock")));
        fs.remove_file(Path::new("/r/lock")).unwrap();
        assert!(!fs.file_exists(Path::new("/r/lock")));
        assert!(fs.remove_file(Path::new("/r/lock")).is_err());
    }
}
