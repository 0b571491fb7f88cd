use std::collections::HashMap;

use bauplan_manifest::ModelConfig;
use bauplan_universe::{DocSource, TypeUniverse};
use indexmap::IndexMap;

use super::{GroupMember, MethodGroup, NestedAttribute, ParamKind, TargetModel, TargetModels, TypeSummary};
use crate::{BuilderTargetPair, Discovery, MethodDescriptor, MethodIndex, ParamShape};

/// Builder plumbing that never becomes an attribute, whatever it returns.
///
/// `[model].excluded_methods` adds to this set.
pub const EXCLUDED_METHODS: [&str; 4] = ["build", "copy", "applyMutation", "sdkFields"];

/// Assembles one [`TargetModel`] per discovered pair from a classified index.
pub struct ModelBuilder<'a> {
    universe: &'a TypeUniverse,
    index: &'a MethodIndex,
    discovery: &'a Discovery,
    config: &'a ModelConfig,
    docs: &'a DocSource,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(
        universe: &'a TypeUniverse,
        index: &'a MethodIndex,
        discovery: &'a Discovery,
        config: &'a ModelConfig,
        docs: &'a DocSource,
    ) -> Self {
        Self {
            universe,
            index,
            discovery,
            config,
            docs,
        }
    }

    pub fn build(&self) -> TargetModels {
        let mut usages = self.usages_by_target();
        self.discovery
            .pairs
            .iter()
            .map(|pair| {
                let usages = usages.remove(pair.target.as_str()).unwrap_or_default();
                self.assemble(pair, usages)
            })
            .collect()
    }

    /// Model for a single pair.
    pub fn model(&self, pair: &BuilderTargetPair) -> TargetModel {
        let usages = self
            .usages_by_target()
            .remove(pair.target.as_str())
            .unwrap_or_default();
        self.assemble(pair, usages)
    }

    fn assemble(&self, pair: &BuilderTargetPair, mut usages: Vec<MethodDescriptor>) -> TargetModel {
        let attributes = self.attributes(&pair.builder);
        let groups = self.groups(&attributes);
        let nested = attributes.iter().filter_map(nested_attribute).collect();
        usages.sort_by_cached_key(|m| (m.owner.clone(), m.name.clone(), m.signature()));

        TargetModel {
            builder: TypeSummary::new(&pair.builder, self.docs.type_doc(&pair.builder)),
            target: TypeSummary::new(&pair.target, self.docs.type_doc(&pair.target)),
            attributes,
            groups,
            nested,
            usages,
        }
    }

    /// Chainable instance methods of the builder, minus builder plumbing.
    fn attributes(&self, builder: &str) -> Vec<MethodDescriptor> {
        let mut attributes: Vec<MethodDescriptor> = self
            .index
            .methods_of(builder)
            .iter()
            .filter(|m| {
                !m.is_static
                    && m.returns.raw_type == builder
                    && !self.is_excluded(&m.name)
            })
            .cloned()
            .collect();
        attributes.sort_by_cached_key(|m| (m.name.clone(), m.signature()));
        attributes
    }

    fn is_excluded(&self, name: &str) -> bool {
        EXCLUDED_METHODS.contains(&name) || self.config.excluded_methods.iter().any(|e| e == name)
    }

    fn groups(&self, attributes: &[MethodDescriptor]) -> Vec<MethodGroup> {
        let mut groups: IndexMap<&str, Vec<GroupMember>> = IndexMap::new();
        for method in attributes {
            groups.entry(method.name.as_str()).or_default().push(GroupMember {
                kind: ParamKind::of(method, self.universe, self.config),
                method: method.clone(),
            });
        }
        groups
            .into_iter()
            .map(|(name, members)| MethodGroup::new(name, members))
            .collect()
    }

    fn usages_by_target(&self) -> HashMap<&'a str, Vec<MethodDescriptor>> {
        let mut usages: HashMap<&str, Vec<MethodDescriptor>> = HashMap::new();
        for method in self.index.iter() {
            if let Some(target) = method.buffered_target.as_deref() {
                usages.entry(target).or_default().push(method.clone());
            }
        }
        usages
    }
}

fn nested_attribute(method: &MethodDescriptor) -> Option<NestedAttribute> {
    if method.shape == ParamShape::None {
        return None;
    }
    let target = method.buffered_target.as_ref()?;
    let summary = TypeSummary::new(target, "");
    Some(NestedAttribute {
        name: method.name.clone(),
        signature: method.signature(),
        shape: method.shape,
        target: target.clone(),
        linkage: format!("{}{}", summary.short_name(), method.shape.linkage_suffix()),
        doc: method.doc.clone(),
    })
}
