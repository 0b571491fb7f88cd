use std::path::PathBuf;

use thiserror::Error;

/// Error raised while parsing the textual form of a type reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeRefError {
    #[error("empty type reference")]
    Empty,

    #[error("unexpected end of type reference '{input}'")]
    UnexpectedEnd { input: String },

    #[error("unexpected '{found}' at offset {offset} in type reference '{input}'")]
    Unexpected {
        input: String,
        offset: usize,
        found: char,
    },
}

/// Error raised while loading a type universe or documentation source.
#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}'")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl UniverseError {
    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
