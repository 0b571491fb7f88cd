use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// Represents a bauplan.toml file with both raw content and parsed manifest.
pub struct BauplanToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl BauplanToml {
    /// Open and parse a bauplan.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory containing the manifest; relative paths resolve against it.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Resolve a manifest-relative path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    pub fn universe_path(&self) -> PathBuf {
        self.resolve(&self.manifest.source.universe)
    }

    pub fn docs_path(&self) -> Option<PathBuf> {
        self.manifest.source.docs.as_deref().map(|p| self.resolve(p))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.manifest.target.output)
    }
}
