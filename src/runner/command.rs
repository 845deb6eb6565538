//! Install command construction.
//!
//! The strict and lenient command lines come from the configuration as plain
//! strings and are split with shell-like parsing, so quoted arguments behave
//! the way users expect.

use anyhow::{Context, Result};

/// A parsed install command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    /// Program to invoke (resolved against PATH at spawn time).
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl InstallCommand {
    /// Parses a configured command line into program and arguments.
    ///
    /// # Errors
    /// Returns an error if the string has unbalanced quoting or is empty.
    pub fn parse(raw: &str) -> Result<Self> {
        let words = shell_words::split(raw)
            .with_context(|| format!("Invalid install command: {raw}"))?;
        let mut iter = words.into_iter();
        let program = iter
            .next()
            .with_context(|| format!("Empty install command: {raw:?}"))?;
        Ok(Self {
            program,
            args: iter.collect(),
        })
    }

}

impl std::fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
