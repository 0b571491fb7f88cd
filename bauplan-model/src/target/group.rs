use bauplan_core::package_name;
use bauplan_manifest::ModelConfig;
use bauplan_universe::TypeUniverse;
use serde::Serialize;

use crate::MethodDescriptor;

/// Parameter kind of an attribute method, used to rank overloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    NoParam,
    /// A single object parameter that is not a collection, array, value or callback.
    Typed,
    Collection,
    Array,
    /// A primitive or a type from a value package (`java.lang`).
    Primitive,
    Callback,
    /// More than one parameter.
    Multi,
}

impl ParamKind {
    pub fn of(method: &MethodDescriptor, universe: &TypeUniverse, config: &ModelConfig) -> Self {
        let param = match method.params.as_slice() {
            [] => return ParamKind::NoParam,
            [param] => param,
            _ => return ParamKind::Multi,
        };
        let raw = param.raw_type.as_str();
        let is_any = |types: &[String]| types.iter().any(|t| universe.is_subtype(raw, t));

        if param.is_array() {
            ParamKind::Array
        } else if param.is_primitive()
            || config.value_packages.iter().any(|p| package_name(raw) == p)
        {
            ParamKind::Primitive
        } else if is_any(&config.collection_types) {
            ParamKind::Collection
        } else if is_any(&config.callback_types) {
            ParamKind::Callback
        } else {
            ParamKind::Typed
        }
    }
}

/// Precedence for picking the primary property of a group.
const PRIMARY_ORDER: [ParamKind; 5] = [
    ParamKind::Typed,
    ParamKind::Collection,
    ParamKind::Array,
    ParamKind::Primitive,
    ParamKind::Callback,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMember {
    pub kind: ParamKind,
    pub method: MethodDescriptor,
}

/// Attribute methods of one builder sharing a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodGroup {
    pub name: String,
    pub members: Vec<GroupMember>,
}

impl MethodGroup {
    pub fn new(name: impl Into<String>, members: Vec<GroupMember>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// The canonical setter: the first member by kind precedence.
    pub fn primary_property(&self) -> Option<&GroupMember> {
        self.primary_index().map(|i| &self.members[i])
    }

    /// A primitive convenience overload next to a richer primary property.
    ///
    /// Only surfaced when the group has more than one member, and never the
    /// primary itself.
    pub fn secondary_overload(&self) -> Option<&GroupMember> {
        if self.members.len() < 2 {
            return None;
        }
        let primary = self.primary_index();
        self.members
            .iter()
            .enumerate()
            .find(|(i, m)| Some(*i) != primary && m.kind == ParamKind::Primitive)
            .map(|(_, m)| m)
    }

    /// A zero-argument member.
    pub fn plain_action(&self) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.kind == ParamKind::NoParam)
    }

    pub fn has_overloads(&self) -> bool {
        self.members.len() > 1
    }

    fn primary_index(&self) -> Option<usize> {
        PRIMARY_ORDER
            .iter()
            .find_map(|kind| self.members.iter().position(|m| m.kind == *kind))
    }
}
