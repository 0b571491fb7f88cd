use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "bauplan.toml");
/// ctx.validation_error("synthetic marker cannot be empty");
/// ctx.invalid_prefix_error("com..x", "source.prefix", "empty segment", span);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create a validation error with a span.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: Some(span.into()),
            message: message.into(),
        })
    }

    /// Create an invalid prefix error.
    pub fn invalid_prefix_error(
        &self,
        value: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidPrefix {
            src: self.named_source(),
            span,
            value: value.into(),
            key: key.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate list entry error.
    pub fn duplicate_entry_error(
        &self,
        value: impl Into<String>,
        key: impl Into<String>,
        first_span: SourceSpan,
        second_span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::DuplicateEntry {
            src: self.named_source(),
            first_span,
            second_span,
            value: value.into(),
            key: key.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'bauplan init' to create a bauplan.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse bauplan.toml")]
    #[diagnostic(code(bauplan::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(bauplan::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {key} '{value}'")]
    #[diagnostic(
        code(bauplan::invalid_prefix),
        help("{reason}. A prefix is a dotted package path such as 'com.example.model'.")
    )]
    InvalidPrefix {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid prefix")]
        span: Option<SourceSpan>,
        value: String,
        key: String,
        reason: String,
    },

    #[error("duplicate entry '{value}' in {key}")]
    #[diagnostic(code(bauplan::duplicate_entry), help("remove the second '{value}'"))]
    DuplicateEntry {
        #[source_code]
        src: NamedSource<String>,
        #[label("first listed here")]
        first_span: SourceSpan,
        #[label("listed again here")]
        second_span: SourceSpan,
        value: String,
        key: String,
    },
}
