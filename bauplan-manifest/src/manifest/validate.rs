//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Error, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and the current
/// table path, so validation errors can name the offending key and point at
/// the offending value.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "bauplan.toml");
/// ctx.push("source").validate_prefix("com.example.model")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Table path segments (e.g., ["model"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a table segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Fully qualified key for a field in the current table.
    ///
    /// For example: "source.prefix", or just "prefix" at the root.
    pub fn key(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.path_string(), field)
        }
    }

    /// Validate the `prefix` field of the current table.
    pub fn validate_prefix(&self, value: &str) -> Result<()> {
        match validate_prefix_path(value) {
            None => Ok(()),
            Some(reason) => Err(self.source.invalid_prefix_error(
                value,
                self.key("prefix"),
                reason,
                find_value_span(self.src(), value),
            )),
        }
    }

    /// Error for a field that must not be empty.
    pub fn empty_value_error(&self, field: &str) -> Box<Error> {
        let message = format!("{} cannot be empty", self.key(field));
        match find_key_span(self.src(), field) {
            Some(span) => self.source.validation_error_at(message, span),
            None => self.source.validation_error(message),
        }
    }

    /// Error for a list entry that appears twice.
    pub fn duplicate_error(&self, value: &str, field: &str) -> Box<Error> {
        let mut spans = find_value_spans(self.src(), value);
        match (spans.next(), spans.next()) {
            (Some(first), Some(second)) => {
                self.source
                    .duplicate_entry_error(value, self.key(field), first, second)
            }
            _ => self.source.validation_error(format!(
                "duplicate entry '{}' in {}",
                value,
                self.key(field)
            )),
        }
    }
}

/// Validate a dotted package path such as `com.example.model`.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_prefix_path(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("prefix cannot be empty");
    }

    for segment in value.split('.') {
        let mut chars = segment.chars();
        match chars.next() {
            None => return Some("prefix cannot contain empty segments"),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            Some(_) => return Some("each segment must start with a letter or underscore"),
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Some("each segment must contain only letters, numbers, and underscores");
        }
    }

    None
}

/// Find the span of a quoted string value in the TOML source.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    find_value_spans(src, value).next()
}

/// Every span where `value` appears as a quoted string, in source order.
fn find_value_spans<'s>(src: &'s str, value: &str) -> impl Iterator<Item = SourceSpan> + 's {
    let double = format!("\"{}\"", value);
    let single = format!("'{}'", value);
    let len = value.len();

    let mut positions: Vec<usize> = src
        .match_indices(&double)
        .chain(src.match_indices(&single))
        .map(|(pos, _)| pos + 1)
        .collect();
    positions.sort_unstable();
    positions.into_iter().map(move |start| SourceSpan::from((start, len)))
}

/// Find the span of a bare key such as `synthetic_marker =`.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    src.lines()
        .scan(0usize, |offset, line| {
            let start = *offset;
            *offset += line.len() + 1;
            Some((start, line))
        })
        .find_map(|(start, line)| {
            let trimmed = line.trim_start();
            let rest = trimmed.strip_prefix(key)?;
            if !rest.trim_start().starts_with('=') {
                return None;
            }
            let indent = line.len() - trimmed.len();
            Some(SourceSpan::from((start + indent, key.len())))
        })
}
