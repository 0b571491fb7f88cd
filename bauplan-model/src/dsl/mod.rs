//! Render-agnostic DSL model.
//!
//! A projection of [`TargetModels`](crate::TargetModels) into the shapes a
//! template renderer works with: one type DSL per target, collection and map
//! DSLs for targets used in containers, and a scope shared by all of them.
//! Names are chosen here; keywords and formatting are left to the renderer.

mod lower;
mod markdown;

use std::collections::BTreeSet;

use serde::Serialize;

pub use lower::Lowering;
pub use markdown::to_markdown;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DslModel {
    pub scope: DslScope,
    pub types: Vec<TypeDsl>,
    pub collections: Vec<CollectionDsl>,
    pub maps: Vec<MapDsl>,
}

/// The scope marker every generated DSL is annotated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DslScope {
    pub package: String,
    pub name: String,
    pub marker: String,
}

impl DslScope {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            package: package.into(),
            marker: format!("{}Marker", name),
            name,
        }
    }

    /// Qualified names declared by the scope.
    pub fn declarations(&self) -> [String; 2] {
        [
            format!("{}.{}", self.package, self.name),
            format!("{}.{}", self.package, self.marker),
        ]
    }
}

/// DSL for building one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDsl {
    pub package: String,
    pub name: String,
    pub entrypoint: String,
    pub builder_type: String,
    pub target_type: String,
    pub comment: String,
    pub properties: Vec<DslProperty>,
    pub secondaries: Vec<DslProperty>,
    pub functions: Vec<DslFunction>,
    pub sub_dsls: Vec<SubDsl>,
    pub ext_dsls: Vec<ExtDsl>,
    pub imports: BTreeSet<String>,
}

impl TypeDsl {
    /// Whether the DSL has anything to put in a configuration block.
    pub fn has_block(&self) -> bool {
        !self.properties.is_empty() || !self.secondaries.is_empty() || !self.sub_dsls.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DslProperty {
    pub name: String,
    pub comment: String,
    pub value_type: String,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DslFunction {
    pub name: String,
    pub comment: String,
}

/// A nested builder reachable from an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubDsl {
    pub name: String,
    pub comment: String,
    pub target_type: String,
    pub linkage: String,
    pub dsl_type: String,
    pub entrypoint: String,
}

/// An entry point on a foreign receiver that takes a buildable target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtDsl {
    pub name: String,
    pub comment: String,
    pub receiver: String,
    pub receiver_type: String,
    pub target_type: String,
    pub linkage: String,
    pub dsl_type: String,
    pub entrypoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionDsl {
    pub package: String,
    pub name: String,
    pub entrypoint: String,
    pub comment: String,
    pub target: String,
    pub target_type: String,
    pub target_dsl: String,
    pub imports: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapDsl {
    pub package: String,
    pub name: String,
    pub entrypoint: String,
    pub comment: String,
    pub key_type: String,
    pub target: String,
    pub target_type: String,
    pub target_dsl: String,
    pub imports: BTreeSet<String>,
}
