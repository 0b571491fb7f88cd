//! `bauplan.toml` parsing and validation.
//!
//! The manifest names the source-type-universe prefix, where the adapter dump
//! and documentation live, and how the extraction pipeline filters and
//! classifies methods. Errors carry source spans and render through `miette`.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    BauplanToml, FilterConfig, Manifest, ModelConfig, ParseContext, SourceConfig, TargetConfig,
    parse_manifest,
};
