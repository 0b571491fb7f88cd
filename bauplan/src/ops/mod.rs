//! Core operations.
//!
//! This module contains the business logic for bauplan commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod explain;
pub mod extract;
pub mod info;

use bauplan_manifest::BauplanToml;
use bauplan_model::{
    Inputs,
    pipeline::{CompilationContext, Pipeline},
};
use eyre::{Context, Result};

pub use check::check;
pub use explain::explain;
pub use extract::{ExtractOptions, extract};
pub use info::info;

/// Load the manifest's inputs and run `pipeline` over them.
fn run_pipeline(toml: &BauplanToml, pipeline: Pipeline) -> Result<CompilationContext> {
    let inputs = Inputs::load(toml)?;
    pipeline
        .run(toml.manifest().clone(), inputs)
        .wrap_err("Pipeline failed")
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::{fs, path::Path};

    use bauplan_manifest::BauplanToml;

    const UNIVERSE: &str = r#"{
      "types": [
        { "name": "com.x.Foo", "methods": [
          { "name": "builder", "static": true, "returns": "com.x.Foo$Builder" }
        ] },
        { "name": "com.x.Foo$Builder", "kind": "interface", "methods": [
          { "name": "build", "returns": "com.x.Foo" },
          { "name": "name", "params": ["java.lang.String"], "returns": "com.x.Foo$Builder" },
          { "name": "items", "params": ["java.util.List<com.x.Bar>"], "returns": "com.x.Foo$Builder" }
        ] },
        { "name": "com.x.Bar", "methods": [
          { "name": "builder", "static": true, "returns": "com.x.Bar$Builder" }
        ] },
        { "name": "com.x.Bar$Builder", "kind": "interface", "methods": [
          { "name": "build", "returns": "com.x.Bar" }
        ] }
      ]
    }"#;

    /// A project with `Foo` holding a list of `Bar`, which has no attributes.
    pub fn project(dir: &Path, extra: &str) -> BauplanToml {
        fs::write(dir.join("universe.json"), UNIVERSE).unwrap();
        let path = dir.join("bauplan.toml");
        fs::write(&path, format!("[source]\nprefix = \"com.x\"\n{}", extra)).unwrap();
        BauplanToml::open(&path).unwrap()
    }
}
