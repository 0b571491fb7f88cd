use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// A file to be written by the CLI
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: always overwrite)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Create a file that is only written when nothing exists at its path
    pub fn if_missing(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content).with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
        })
    }

    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult> {
        match self.rules.overwrite {
            Overwrite::Always => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if self.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&self.path, &self.content)?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (extracted models, debug snapshots)
    #[default]
    Always,
    /// Only create if file doesn't exist (starter manifests)
    IfMissing,
}
