//! Manifest types and parsing for bauplan.toml files.

mod file;
mod parse;
mod validate;

use std::{collections::BTreeMap, path::PathBuf};

pub use file::BauplanToml;
pub use parse::parse_manifest;
use serde::{Deserialize, Serialize};
pub use validate::ParseContext;

/// Root manifest for bauplan.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Where the type universe comes from
    pub source: SourceConfig,

    /// Where the extracted model goes
    #[serde(default)]
    pub target: TargetConfig,

    /// Indexer filters
    #[serde(default)]
    pub filter: FilterConfig,

    /// Classification and model-building rules
    #[serde(default)]
    pub model: ModelConfig,

    /// Display-name aliases applied when resolving types
    #[serde(default)]
    pub type_names: BTreeMap<String, String>,
}

impl Manifest {
    /// The package generated DSL code lives under.
    ///
    /// Defaults to `<source.prefix>.dsl`.
    pub fn target_prefix(&self) -> String {
        match &self.target.prefix {
            Some(prefix) => prefix.clone(),
            None => format!("{}.dsl", self.source.prefix),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Qualified-name prefix bounding discovery
    pub prefix: String,

    /// Adapter dump of the type universe, relative to the manifest
    #[serde(default = "default_universe")]
    pub universe: PathBuf,

    /// Optional documentation source, relative to the manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<PathBuf>,
}

fn default_universe() -> PathBuf {
    PathBuf::from("universe.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("generated")
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            output: default_output(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Substring (case-insensitive) of an annotation simple name marking
    /// implementation details
    pub internal_marker: String,
    /// Method-name marker for compiler-synthesized methods
    pub synthetic_marker: String,
    pub exclude_type_prefixes: Vec<String>,
    pub exclude_type_suffixes: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            internal_marker: "internal".to_string(),
            synthetic_marker: "$".to_string(),
            exclude_type_prefixes: vec!["Default".to_string()],
            exclude_type_suffixes: vec!["Impl".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Method names excluded from attributes in addition to the fixed
    /// builder plumbing set (`build`, `copy`, `applyMutation`, `sdkFields`)
    pub excluded_methods: Vec<String>,
    /// Packages whose types count as primitive-like parameters
    pub value_packages: Vec<String>,
    pub collection_types: Vec<String>,
    pub map_types: Vec<String>,
    pub callback_types: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            excluded_methods: Vec::new(),
            value_packages: vec!["java.lang".to_string()],
            collection_types: vec!["java.util.Collection".to_string()],
            map_types: vec!["java.util.Map".to_string()],
            callback_types: vec!["java.util.function.Consumer".to_string()],
        }
    }
}
