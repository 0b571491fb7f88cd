//! Attribute and usage classification.
//!
//! A second pass over the [`MethodIndex`] that fills in the derived flags of
//! each [`MethodDescriptor`](crate::MethodDescriptor). It only looks up
//! targets already found by discovery and never adds pairs.

use bauplan_manifest::ModelConfig;
use bauplan_universe::{TypeRef, TypeUniverse};
use serde::Serialize;

use crate::{Discovery, MethodIndex, TypeDescriptor};

/// How a single parameter reaches a buildable target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamShape {
    #[default]
    None,
    Scalar,
    Collection,
    Map,
}

impl ParamShape {
    /// Suffix appended to a target name to form a nested linkage key.
    pub fn linkage_suffix(&self) -> &'static str {
        match self {
            ParamShape::None | ParamShape::Scalar => "",
            ParamShape::Collection => "Collection",
            ParamShape::Map => "Map",
        }
    }
}

impl std::fmt::Display for ParamShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParamShape::None => "none",
            ParamShape::Scalar => "scalar",
            ParamShape::Collection => "collection",
            ParamShape::Map => "map",
        };
        write!(f, "{}", s)
    }
}

pub struct Classifier<'a> {
    universe: &'a TypeUniverse,
    discovery: &'a Discovery,
    config: &'a ModelConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(universe: &'a TypeUniverse, discovery: &'a Discovery, config: &'a ModelConfig) -> Self {
        Self {
            universe,
            discovery,
            config,
        }
    }

    /// Shape of a parameter and the target it buffers, if any.
    pub fn classify_param(&self, param: &TypeDescriptor) -> (ParamShape, Option<String>) {
        if let Some(target) = self.target_name(&param.resolved) {
            return (ParamShape::Scalar, Some(target));
        }

        let raw = param.raw_type.as_str();
        let args = param.resolved.args();
        if self.is_any(raw, &self.config.collection_types) {
            if let Some(target) = args.first().and_then(|a| self.target_name(a)) {
                return (ParamShape::Collection, Some(target));
            }
        } else if self.is_any(raw, &self.config.map_types)
            && let Some(target) = args.get(1).and_then(|a| self.target_name(a))
        {
            return (ParamShape::Map, Some(target));
        }

        (ParamShape::None, None)
    }

    /// Fill in builder-method flags and parameter shapes for every method.
    pub fn classify(&self, index: &mut MethodIndex) {
        for method in index.iter_mut() {
            method.is_builder_method = self.discovery.is_builder(&method.returns.raw_type);
            let (shape, target) = match method.single_param() {
                Some(param) => self.classify_param(param),
                None => (ParamShape::None, None),
            };
            method.shape = shape;
            method.buffered_target = target;
        }
        index.mark_classified();
    }

    /// Wildcards count through their bound.
    fn target_name(&self, ty: &TypeRef) -> Option<String> {
        ty.raw_name().filter(|name| self.discovery.is_target(name))
    }

    fn is_any(&self, raw: &str, types: &[String]) -> bool {
        types.iter().any(|t| self.universe.is_subtype(raw, t))
    }
}
