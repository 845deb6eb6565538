//! Configuration for depwalk, stored as TOML.
//!
//! The file is created with defaults on first load, so a plain `depwalk`
//! invocation works without any setup. Every field has a serde default,
//! letting users override only the keys they care about.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Scan settings: what marks a directory and what gets skipped.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Install settings: lockfile name and command lines.
    #[serde(default)]
    pub install: InstallConfig,
}

/// Settings controlling the directory scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Filename that marks a directory as an installable package unit.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Directory name never traversed into (holds installed dependencies).
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Path fragment excluded from traversal when the skip flag is set.
    #[serde(default = "default_excluded_fragment")]
    pub excluded_fragment: String,
}

/// Settings controlling the install step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Generated file pinning exact dependency versions, deleted by
    /// `--remove-lock` before a fresh install.
    #[serde(default = "default_lockfile")]
    pub lockfile: String,

    /// Install command used by default.
    #[serde(default = "default_strict_command")]
    pub strict_command: String,

    /// Install command used with `--ignore-platform`: skips optional
    /// dependencies, funding notices, and install scripts, and forces the
    /// operation past recoverable errors.
    #[serde(default = "default_lenient_command")]
    pub lenient_command: String,
}

fn default_manifest() -> String {
    "package.json".to_string()
}

fn default_cache_dir() -> String {
    "node_modules".to_string()
}

fn default_excluded_fragment() -> String {
    "binary/tmp".to_string()
}

fn default_lockfile() -> String {
    "package-lock.json".to_string()
}

fn default_strict_command() -> String {
    "npm install".to_string()
}

fn default_lenient_command() -> String {
    "npm install --no-optional --no-fund --ignore-scripts --force".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            cache_dir: default_cache_dir(),
            excluded_fragment: default_excluded_fragment(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            lockfile: default_lockfile(),
            strict_command: default_strict_command(),
            lenient_command: default_lenient_command(),
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, creating the file with defaults
    /// if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the default file cannot be written.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Writes the configuration to `path`, creating parent directories as
    /// needed.
    ///
    /// # Errors
    /// Returns an error if the directories or the file cannot be created.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
