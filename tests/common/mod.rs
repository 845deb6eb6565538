#![allow(dead_code)]

use anyhow::Result;
use depwalk::config::Config;
use depwalk::{DepwalkContext, RunOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp-tree fixture for consistent test setup.
///
/// Lays out a scratch directory with a `tree/` scan root and a config file
/// kept outside it, so scans never pick the config up.
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("tree"))?;
        Ok(Self { temp_dir })
    }

    /// Scan root.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("tree")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Creates `rel` under the root with a `package.json` in it.
    pub fn add_package(&self, rel: &str) -> PathBuf {
        let dir = self.root().join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), "{}\n").unwrap();
        dir
    }

    /// Drops a `package-lock.json` into `rel`.
    pub fn add_lockfile(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel).join("package-lock.json");
        fs::write(&path, "{}\n").unwrap();
        path
    }

    pub fn add_file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Writes a config whose install commands are replaced, keeping scan
    /// defaults. Tests point the commands at `true`, `false`, or small
    /// shell snippets instead of a real package manager.
    pub fn write_config_with_command(&self, strict: &str, lenient: &str) {
        let mut config = Config::default();
        config.install.strict_command = strict.to_string();
        config.install.lenient_command = lenient.to_string();
        config.save(&self.config_path()).unwrap();
    }

    pub fn context(&self, options: RunOptions) -> DepwalkContext {
        DepwalkContext::new_explicit(self.root(), self.config_path(), options).unwrap()
    }
}

/// Shell one-liner command string, for configs that need more than
/// `true`/`false`.
pub fn sh(snippet: &str) -> String {
    format!("/bin/sh -c \"{snippet}\"")
}

/// Canonicalized path, for comparing against scan results (the context
/// canonicalizes its root).
pub fn canon(path: &Path) -> PathBuf {
    path.canonicalize().unwrap()
}
