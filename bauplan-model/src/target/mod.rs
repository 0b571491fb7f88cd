//! Target models: the render-agnostic output of the pipeline.
//!
//! One [`TargetModel`] per discovered builder/target pair, stored flat in a
//! [`TargetModels`] arena keyed by target name. Nested buildable attributes
//! refer to other targets by linkage name only, so cyclic references between
//! targets never recurse.

mod builder;
mod group;

use bauplan_core::{package_name, simple_name};
use indexmap::IndexMap;
use serde::Serialize;

pub use builder::{EXCLUDED_METHODS, ModelBuilder};
pub use group::{GroupMember, MethodGroup, ParamKind};

use crate::{MethodDescriptor, ParamShape};

/// Names of a type as renderers need them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    pub qualified: String,
    /// Simple name with nesting shown as dots (`Foo.Builder`).
    pub name: String,
    pub package: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
}

impl TypeSummary {
    pub fn new(qualified: &str, doc: impl Into<String>) -> Self {
        Self {
            qualified: qualified.to_string(),
            name: simple_name(qualified),
            package: package_name(qualified).to_string(),
            doc: doc.into(),
        }
    }

    /// Innermost name (`Builder` for `Foo.Builder`).
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// An attribute whose value is itself a buildable target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedAttribute {
    /// Attribute method name.
    pub name: String,
    pub signature: String,
    pub shape: ParamShape,
    /// Qualified name of the nested target.
    pub target: String,
    /// `<Target>`, `<Target>Collection` or `<Target>Map`.
    pub linkage: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
}

/// Everything a renderer needs to know about one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetModel {
    pub builder: TypeSummary,
    pub target: TypeSummary,
    /// Chainable builder methods, sorted by name then signature.
    pub attributes: Vec<MethodDescriptor>,
    /// Attributes grouped by name, sorted by name.
    pub groups: Vec<MethodGroup>,
    pub nested: Vec<NestedAttribute>,
    /// Methods anywhere in the universe that take this target as buildable input.
    pub usages: Vec<MethodDescriptor>,
}

impl TargetModel {
    pub fn group(&self, name: &str) -> Option<&MethodGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// True when the builder exposes nothing to set.
    pub fn is_trivial(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Target models keyed by qualified target name, sorted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TargetModels {
    models: IndexMap<String, TargetModel>,
}

impl TargetModels {
    pub fn get(&self, target: &str) -> Option<&TargetModel> {
        self.models.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetModel> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<TargetModel> for TargetModels {
    fn from_iter<I: IntoIterator<Item = TargetModel>>(iter: I) -> Self {
        let mut models: IndexMap<String, TargetModel> = iter
            .into_iter()
            .map(|m| (m.target.qualified.clone(), m))
            .collect();
        models.sort_keys();
        Self { models }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_summary() {
        let summary = TypeSummary::new("com.x.Foo$Builder", "");
        assert_eq!(summary.name, "Foo.Builder");
        assert_eq!(summary.short_name(), "Builder");
        assert_eq!(summary.package, "com.x");

        let summary = TypeSummary::new("com.x.Foo", "A foo.");
        assert_eq!(summary.short_name(), "Foo");
        assert_eq!(summary.doc, "A foo.");
    }

    #[test]
    fn test_models_are_sorted_by_target() {
        let model = |target: &str| TargetModel {
            builder: TypeSummary::new(&format!("{target}$Builder"), ""),
            target: TypeSummary::new(target, ""),
            attributes: vec![],
            groups: vec![],
            nested: vec![],
            usages: vec![],
        };
        let models: TargetModels = [model("com.x.Zed"), model("com.x.Alpha")].into_iter().collect();

        let names: Vec<_> = models.iter().map(|m| m.target.qualified.as_str()).collect();
        assert_eq!(names, ["com.x.Alpha", "com.x.Zed"]);
        assert!(models.get("com.x.Zed").unwrap().is_trivial());
    }
}
