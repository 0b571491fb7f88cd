//! Info command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct InfoReport {
    pub config_path: PathBuf,
    pub source_prefix: String,
    pub target_prefix: String,
    pub universe_path: PathBuf,
    pub stats: Stats,
    pub targets: Vec<TargetInfo>,
    /// Number of warning diagnostics from the run.
    pub warnings: usize,
}

/// Model statistics.
#[derive(Debug, Default)]
pub struct Stats {
    /// Types declared by the adapter.
    pub types: usize,
    /// Types left after filtering.
    pub indexed_types: usize,
    pub methods: usize,
    /// Attribute setters across all builders.
    pub attributes: usize,
    pub nested: usize,
    pub usages: usize,
    pub collections: usize,
    pub maps: usize,
}

/// One row of the target table.
#[derive(Debug)]
pub struct TargetInfo {
    pub name: String,
    pub package: String,
    /// Attribute groups.
    pub attributes: usize,
    pub nested: usize,
    pub used_in_collections: bool,
    pub used_in_maps: bool,
}

impl Report for InfoReport {
    fn render(&self, out: &mut dyn Output) {
        out.newline();

        out.preformatted(&format!("  {}", self.source_prefix));
        out.preformatted(&format!("  {}", "─".repeat(self.source_prefix.chars().count())));
        out.newline();

        out.preformatted(&format!("  DSL package {}", self.target_prefix));
        out.preformatted(&format!("  Universe    {}", self.universe_path.display()));
        out.preformatted(&format!("  Config      {}", self.config_path.display()));
        out.newline();

        out.preformatted("  Statistics");
        out.preformatted("  ──────────");
        out.preformatted(&format!(
            "  Types       {} ({} indexed)",
            self.stats.types, self.stats.indexed_types
        ));
        out.preformatted(&format!("  Methods     {}", self.stats.methods));
        out.preformatted(&format!("  Targets     {}", self.targets.len()));
        out.preformatted(&format!(
            "  Attributes  {} ({} nested)",
            self.stats.attributes, self.stats.nested
        ));
        out.preformatted(&format!("  Usages      {}", self.stats.usages));
        out.preformatted(&format!(
            "  DSLs        {} collection, {} map",
            self.stats.collections, self.stats.maps
        ));
        if self.warnings > 0 {
            out.preformatted(&format!(
                "  Warnings    {} (run `bauplan check` for details)",
                self.warnings
            ));
        }
        out.newline();

        if !self.targets.is_empty() {
            out.preformatted("  Targets");
            out.preformatted("  ───────");
            let width = self.targets.iter().map(|t| t.name.len()).max().unwrap_or(0);
            for target in &self.targets {
                let mut flags = Vec::new();
                if target.used_in_collections {
                    flags.push("collection");
                }
                if target.used_in_maps {
                    flags.push("map");
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                };
                out.preformatted(&format!(
                    "  {:<width$}  {} attributes, {} nested{}  ({})",
                    target.name,
                    target.attributes,
                    target.nested,
                    flags,
                    target.package,
                    width = width
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::render_to_string;

    #[test]
    fn test_render_info() {
        let report = InfoReport {
            config_path: PathBuf::from("/sdk/bauplan.toml"),
            source_prefix: "com.x".into(),
            target_prefix: "com.x.dsl".into(),
            universe_path: PathBuf::from("/sdk/universe.json"),
            stats: Stats {
                types: 4,
                indexed_types: 4,
                methods: 7,
                attributes: 2,
                nested: 1,
                usages: 1,
                collections: 1,
                maps: 0,
            },
            targets: vec![
                TargetInfo {
                    name: "Bar".into(),
                    package: "com.x".into(),
                    attributes: 0,
                    nested: 0,
                    used_in_collections: true,
                    used_in_maps: false,
                },
                TargetInfo {
                    name: "Foo".into(),
                    package: "com.x".into(),
                    attributes: 2,
                    nested: 1,
                    used_in_collections: false,
                    used_in_maps: false,
                },
            ],
            warnings: 1,
        };

        insta::assert_snapshot!(render_to_string(&report).trim(), @r"
        com.x
          ─────

          DSL package com.x.dsl
          Universe    /sdk/universe.json
          Config      /sdk/bauplan.toml

          Statistics
          ──────────
          Types       4 (4 indexed)
          Methods     7
          Targets     2
          Attributes  2 (1 nested)
          Usages      1
          DSLs        1 collection, 0 map
          Warnings    1 (run `bauplan check` for details)

          Targets
          ───────
          Bar  0 attributes, 0 nested [collection]  (com.x)
          Foo  2 attributes, 1 nested  (com.x)
        ");
    }
}
