//! Loading the type universe and documentation named by a manifest.

use bauplan_manifest::BauplanToml;
use bauplan_universe::{DocSource, TypeUniverse};
use eyre::{Result, WrapErr};

use crate::pipeline::Diagnostic;

/// The external inputs a pipeline run reads.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub universe: TypeUniverse,
    pub docs: DocSource,
    /// Problems found while loading that did not stop the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl Inputs {
    pub fn new(universe: TypeUniverse, docs: DocSource) -> Self {
        Self {
            universe,
            docs,
            diagnostics: Vec::new(),
        }
    }

    /// Load the universe dump and optional documentation a manifest points at.
    ///
    /// A missing or malformed universe is an error. Documentation is
    /// best-effort: if it cannot be read the run continues without it and a
    /// warning diagnostic is recorded.
    pub fn load(toml: &BauplanToml) -> Result<Self> {
        let universe_path = toml.universe_path();
        let universe = TypeUniverse::from_file(&universe_path)
            .wrap_err_with(|| format!("failed to load type universe from {}", universe_path.display()))?;
        tracing::debug!(
            path = %universe_path.display(),
            types = universe.declared_len(),
            "loaded type universe"
        );

        let mut inputs = Self::new(universe, DocSource::new());
        if let Some(docs_path) = toml.docs_path() {
            match DocSource::from_file(&docs_path) {
                Ok(docs) => {
                    tracing::debug!(path = %docs_path.display(), entries = docs.len(), "loaded documentation");
                    inputs.docs = docs;
                }
                Err(e) => {
                    tracing::warn!(path = %docs_path.display(), error = %e, "documentation unavailable");
                    inputs.diagnostics.push(
                        Diagnostic::warning("load", format!("documentation unavailable: {}", e))
                            .at(docs_path.display().to_string()),
                    );
                }
            }
        }

        Ok(inputs)
    }
}
