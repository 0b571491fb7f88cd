//! Manifest parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "bauplan.toml")
    }
}

impl Manifest {
    /// Parse a bauplan.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a bauplan.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    ctx.push("source").validate_prefix(&manifest.source.prefix)?;
    if let Some(prefix) = &manifest.target.prefix {
        ctx.push("target").validate_prefix(prefix)?;
    }

    if manifest.filter.synthetic_marker.is_empty() {
        return Err(ctx.push("filter").empty_value_error("synthetic_marker"));
    }

    let model = ctx.push("model");
    let mut seen = HashSet::new();
    for name in &manifest.model.excluded_methods {
        if !seen.insert(name.as_str()) {
            return Err(model.duplicate_error(name, "excluded_methods"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_prefix_is_parse_error() {
        let err = parse_manifest("[source]\nuniverse = \"u.json\"\n", "bauplan.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_missing_source_table_is_parse_error() {
        let err = parse_manifest("[target]\noutput = \"out\"\n", "bauplan.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = parse_manifest(
            "[source]\nprefix = \"com.x\"\n[model]\nexclude = []\n",
            "bauplan.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_source_prefix() {
        let src = "[source]\nprefix = \"com..model\"\n";
        let err = parse_manifest(src, "bauplan.toml").unwrap_err();
        match *err {
            Error::InvalidPrefix { key, span, .. } => {
                assert_eq!(key, "source.prefix");
                let span = span.unwrap();
                assert_eq!(&src[span.offset()..span.offset() + span.len()], "com..model");
            }
            other => panic!("expected invalid prefix, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_target_prefix() {
        let err = parse_manifest(
            "[source]\nprefix = \"com.x\"\n[target]\nprefix = \"1dsl\"\n",
            "bauplan.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidPrefix { ref key, .. } if key == "target.prefix"));
    }

    #[test]
    fn test_empty_synthetic_marker() {
        let err = parse_manifest(
            "[source]\nprefix = \"com.x\"\n[filter]\nsynthetic_marker = \"\"\n",
            "bauplan.toml",
        )
        .unwrap_err();
        assert!(err.to_string().contains("synthetic_marker"));
    }

    #[test]
    fn test_duplicate_excluded_method() {
        let src = "[source]\nprefix = \"com.x\"\n[model]\nexcluded_methods = [\"build\", \"copy\", \"build\"]\n";
        let err = parse_manifest(src, "bauplan.toml").unwrap_err();
        match *err {
            Error::DuplicateEntry {
                value,
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(value, "build");
                assert!(first_span.offset() < second_span.offset());
            }
            other => panic!("expected duplicate entry, got {other:?}"),
        }
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::from_file(dir.path().join("bauplan.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
