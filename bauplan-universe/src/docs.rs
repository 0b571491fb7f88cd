use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::UniverseError;

/// Human-authored comments for types and methods.
///
/// Type comments are keyed by qualified name. Method comments are keyed by
/// [`DocSource::method_key`]. Missing entries read as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSource {
    #[serde(default)]
    types: HashMap<String, String>,
    #[serde(default)]
    methods: HashMap<String, String>,
}

impl DocSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for a method comment: `com.x.Foo$Builder.name(java.lang.String)`.
    pub fn method_key(declaring: &str, name: &str, params: &[String]) -> String {
        format!("{}.{}({})", declaring, name, params.join(", "))
    }

    pub fn type_doc(&self, name: &str) -> &str {
        self.types.get(name).map_or("", String::as_str)
    }

    pub fn method_doc(&self, declaring: &str, name: &str, params: &[String]) -> &str {
        self.methods
            .get(&Self::method_key(declaring, name, params))
            .map_or("", String::as_str)
    }

    pub fn insert_type(&mut self, name: impl Into<String>, doc: impl Into<String>) {
        self.types.insert(name.into(), doc.into());
    }

    pub fn insert_method(
        &mut self,
        declaring: &str,
        name: &str,
        params: &[String],
        doc: impl Into<String>,
    ) {
        self.methods
            .insert(Self::method_key(declaring, name, params), doc.into());
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.methods.is_empty()
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a documentation source from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, UniverseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| UniverseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|e| UniverseError::json(path, e))
    }
}
