use std::{
    collections::{HashMap, HashSet, VecDeque},
    path::Path,
};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{MethodDecl, OBJECT, TypeDecl, TypeRef, UniverseError, prelude};

/// Type variable bindings of one type, viewed from a root type.
pub type Substitution = HashMap<String, TypeRef>;

/// Bindings for every type in a hierarchy, keyed by type name.
pub type Substitutions = IndexMap<String, Substitution>;

/// A method together with the type that declares it.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyMethod<'a> {
    pub declaring: &'a TypeDecl,
    pub method: &'a MethodDecl,
}

/// Immutable snapshot of every type the adapter reported.
///
/// Types are kept in the order they were declared, followed by any
/// prelude types the adapter did not declare itself.
#[derive(Debug, Clone, Default)]
pub struct TypeUniverse {
    types: IndexMap<String, TypeDecl>,
    declared: usize,
}

#[derive(Deserialize)]
struct UniverseFile {
    #[serde(default)]
    types: Vec<TypeDecl>,
}

impl TypeUniverse {
    pub fn builder() -> UniverseBuilder {
        UniverseBuilder::default()
    }

    /// Parse a universe from its JSON form.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let file: UniverseFile = serde_json::from_str(text)?;
        let mut builder = Self::builder();
        for decl in file.types {
            builder.add(decl);
        }
        Ok(builder.build())
    }

    /// Load a universe from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, UniverseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| UniverseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|e| UniverseError::json(path, e))
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// All types including the prelude.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    /// Only the types the adapter declared.
    pub fn declared(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values().take(self.declared)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn declared_len(&self) -> usize {
        self.declared
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// `root` followed by its supertypes, breadth first, each visited once.
    ///
    /// Supertypes missing from the universe are skipped.
    pub fn hierarchy(&self, root: &str) -> Vec<&TypeDecl> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([root.to_string()]);

        while let Some(name) = queue.pop_front() {
            if !seen.insert(name.clone()) {
                continue;
            }
            let Some(decl) = self.types.get(&name) else {
                continue;
            };
            order.push(decl);
            queue.extend(decl.supertypes.iter().filter_map(TypeRef::raw_name));
        }

        order
    }

    /// Whether `sub` is `sup` or reaches it through declared supertypes.
    ///
    /// Every non-primitive type is a subtype of [`OBJECT`].
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        if sub == sup {
            return true;
        }
        if sup == OBJECT {
            return !is_primitive_name(sub);
        }
        if let (Some(sub_elem), Some(sup_elem)) = (sub.strip_suffix("[]"), sup.strip_suffix("[]")) {
            return !is_primitive_name(sub_elem) && self.is_subtype(sub_elem, sup_elem);
        }
        self.hierarchy(sub).iter().any(|decl| decl.name == sup)
    }

    /// Type variable bindings for every type in `root`'s hierarchy.
    ///
    /// Walks supertypes breadth first, substituting each supertype reference
    /// with the bindings of the type that names it. The first binding found
    /// for a type wins. Raw supertype references bind nothing.
    pub fn substitutions(&self, root: &str) -> Substitutions {
        let mut result = Substitutions::new();
        let mut queue = VecDeque::from([(root.to_string(), Substitution::new())]);

        while let Some((name, subst)) = queue.pop_front() {
            if result.contains_key(&name) {
                continue;
            }
            let Some(decl) = self.types.get(&name) else {
                continue;
            };

            for supertype in &decl.supertypes {
                let TypeRef::Named { name: sup_name, args } = supertype.substitute(&subst) else {
                    continue;
                };
                let Some(sup_decl) = self.types.get(&sup_name) else {
                    continue;
                };
                let bindings = if args.len() == sup_decl.type_params.len() {
                    sup_decl.type_params.iter().cloned().zip(args).collect()
                } else {
                    Substitution::new()
                };
                queue.push_back((sup_name, bindings));
            }

            result.insert(name, subst);
        }

        result
    }

    /// Every method declared on `root` or a supertype, in hierarchy order.
    pub fn methods_in_hierarchy(&self, root: &str) -> Vec<HierarchyMethod<'_>> {
        self.hierarchy(root)
            .into_iter()
            .flat_map(|declaring| {
                declaring
                    .methods
                    .iter()
                    .map(move |method| HierarchyMethod { declaring, method })
            })
            .collect()
    }
}

fn is_primitive_name(name: &str) -> bool {
    crate::Primitive::from_name(name).is_some()
}

/// Collects declarations and produces an immutable [`TypeUniverse`].
#[derive(Debug, Default)]
pub struct UniverseBuilder {
    types: IndexMap<String, TypeDecl>,
}

impl UniverseBuilder {
    /// Add a declaration. A second declaration with the same name is ignored.
    pub fn add(&mut self, decl: TypeDecl) -> &mut Self {
        if self.types.contains_key(&decl.name) {
            tracing::warn!(name = %decl.name, "duplicate type declaration ignored");
            return self;
        }
        let decl = bind_type_variables(decl);
        self.types.insert(decl.name.clone(), decl);
        self
    }

    pub fn with(mut self, decl: TypeDecl) -> Self {
        self.add(decl);
        self
    }

    pub fn build(self) -> TypeUniverse {
        let mut types = self.types;
        let declared = types.len();
        for decl in prelude::types() {
            if !types.contains_key(&decl.name) {
                let decl = bind_type_variables(decl);
                types.insert(decl.name.clone(), decl);
            }
        }
        tracing::debug!(declared, total = types.len(), "type universe built");
        TypeUniverse { types, declared }
    }
}

fn bind_type_variables(mut decl: TypeDecl) -> TypeDecl {
    let scope = decl.type_params.clone();
    decl.supertypes = decl
        .supertypes
        .into_iter()
        .map(|s| s.bind_variables(&scope))
        .collect();

    for method in &mut decl.methods {
        let mut method_scope = scope.clone();
        method_scope.extend(method.type_params.iter().cloned());
        method.params = std::mem::take(&mut method.params)
            .into_iter()
            .map(|p| p.bind_variables(&method_scope))
            .collect();
        let returns = std::mem::replace(&mut method.returns, TypeRef::wildcard());
        method.returns = returns.bind_variables(&method_scope);
    }
    decl
}
