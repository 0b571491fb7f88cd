//! Method signature indexing.
//!
//! For every publicly visible type, collects the methods it exposes (declared
//! or inherited), collapses overrides by call signature, and keeps the
//! declaration with the most specific resolved return type.

use std::{borrow::Cow, collections::BTreeMap};

use bauplan_manifest::FilterConfig;
use bauplan_universe::{DocSource, MethodDecl, Substitution, TypeDecl, TypeUniverse};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{ParamShape, Resolver, TypeDescriptor};

/// One observed method of a type.
///
/// Identity fields are set while indexing. Classification later fills in
/// `is_builder_method`, `shape` and `buffered_target` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    /// The type this method was indexed for.
    pub owner: String,
    /// The type that declares the selected declaration.
    pub declaring: String,
    pub name: String,
    pub params: Vec<TypeDescriptor>,
    pub returns: TypeDescriptor,
    pub is_static: bool,
    pub doc: String,
    pub is_builder_method: bool,
    pub shape: ParamShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffered_target: Option<String>,
}

impl MethodDescriptor {
    /// Call signature with raw parameter types: `name(java.util.List)`.
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self.params.iter().map(|p| p.raw_type.as_str()).collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// The single parameter, if the method takes exactly one.
    pub fn single_param(&self) -> Option<&TypeDescriptor> {
        match self.params.as_slice() {
            [param] => Some(param),
            _ => None,
        }
    }
}

/// Indexed methods per type, in universe order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MethodIndex {
    types: IndexMap<String, Vec<MethodDescriptor>>,
    classified: bool,
}

impl MethodIndex {
    /// Methods indexed for `owner` (empty if the type was filtered out).
    pub fn methods_of(&self, owner: &str) -> &[MethodDescriptor] {
        self.types.get(owner).map_or(&[], Vec::as_slice)
    }

    pub fn contains_type(&self, owner: &str) -> bool {
        self.types.contains_key(owner)
    }

    /// Every indexed method, grouped by owner.
    pub fn iter(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.types.values().flatten()
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn method_count(&self) -> usize {
        self.types.values().map(Vec::len).sum()
    }

    /// Whether classification flags have been filled in.
    pub fn is_classified(&self) -> bool {
        self.classified
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut MethodDescriptor> {
        self.types.values_mut().flatten()
    }

    pub(crate) fn mark_classified(&mut self) {
        self.classified = true;
    }
}

struct Candidate<'u> {
    declaring: &'u TypeDecl,
    method: &'u MethodDecl,
    params: Vec<TypeDescriptor>,
    returns: TypeDescriptor,
}

/// Builds a [`MethodIndex`] from a universe.
pub struct Indexer<'a> {
    universe: &'a TypeUniverse,
    resolver: Resolver<'a>,
    filter: &'a FilterConfig,
    docs: &'a DocSource,
}

impl<'a> Indexer<'a> {
    pub fn new(universe: &'a TypeUniverse, filter: &'a FilterConfig, docs: &'a DocSource) -> Self {
        Self {
            universe,
            resolver: Resolver::new(universe),
            filter,
            docs,
        }
    }

    pub fn with_aliases(mut self, aliases: &'a BTreeMap<String, String>) -> Self {
        self.resolver = self.resolver.with_aliases(aliases);
        self
    }

    /// Index every declared type that passes the type filter.
    pub fn index(&self) -> MethodIndex {
        let mut types = IndexMap::new();
        for decl in self.universe.declared() {
            if !self.keep_type(decl) {
                tracing::trace!(name = %decl.name, "type filtered out");
                continue;
            }
            types.insert(decl.name.clone(), self.index_type(decl));
        }
        MethodIndex {
            types,
            classified: false,
        }
    }

    /// Methods exposed by `decl`, one per call signature.
    pub fn index_type(&self, decl: &TypeDecl) -> Vec<MethodDescriptor> {
        let substitutions = self.universe.substitutions(&decl.name);
        let empty = Substitution::new();
        let mut groups: IndexMap<(String, Vec<String>), Vec<Candidate<'_>>> = IndexMap::new();

        for hm in self.universe.methods_in_hierarchy(&decl.name) {
            if !self.keep_method(hm.method) {
                continue;
            }
            let context = substitutions.get(&hm.declaring.name).unwrap_or(&empty);
            let context = method_scope(context, hm.method);
            let context = context.as_ref();
            let params: Vec<TypeDescriptor> = hm
                .method
                .params
                .iter()
                .map(|p| self.resolver.resolve(p, context))
                .collect();
            let key = (
                hm.method.name.clone(),
                params.iter().map(|p| p.raw_type.clone()).collect(),
            );
            groups.entry(key).or_default().push(Candidate {
                declaring: hm.declaring,
                method: hm.method,
                returns: self.resolver.resolve(&hm.method.returns, context),
                params,
            });
        }

        groups
            .into_values()
            .filter_map(|candidates| self.most_specific(candidates))
            .map(|c| self.describe(decl, c))
            .collect()
    }

    /// Pick the candidate whose resolved return type is narrowest.
    ///
    /// A later candidate replaces the current pick only when its return type
    /// is a strict subtype, so ties keep the first encountered.
    fn most_specific<'u>(&self, candidates: Vec<Candidate<'u>>) -> Option<Candidate<'u>> {
        let mut candidates = candidates.into_iter();
        let mut best = candidates.next()?;
        for candidate in candidates {
            let narrower = self
                .universe
                .is_subtype(&candidate.returns.raw_type, &best.returns.raw_type);
            let wider = self
                .universe
                .is_subtype(&best.returns.raw_type, &candidate.returns.raw_type);
            if narrower && !wider {
                best = candidate;
            }
        }
        Some(best)
    }

    fn describe(&self, owner: &TypeDecl, candidate: Candidate<'_>) -> MethodDescriptor {
        let declared_params: Vec<String> = candidate
            .method
            .params
            .iter()
            .map(ToString::to_string)
            .collect();
        let doc = self
            .docs
            .method_doc(&candidate.declaring.name, &candidate.method.name, &declared_params);

        MethodDescriptor {
            owner: owner.name.clone(),
            declaring: candidate.declaring.name.clone(),
            name: candidate.method.name.clone(),
            params: candidate.params,
            returns: candidate.returns,
            is_static: candidate.method.is_static,
            doc: doc.to_string(),
            is_builder_method: false,
            shape: ParamShape::None,
            buffered_target: None,
        }
    }

    fn keep_type(&self, decl: &TypeDecl) -> bool {
        let simple = decl.name.rsplit(['.', '$']).next().unwrap_or(&decl.name);
        decl.visibility.is_public()
            && !decl.is_marked(&self.filter.internal_marker)
            && !self
                .filter
                .exclude_type_prefixes
                .iter()
                .any(|p| simple.starts_with(p.as_str()))
            && !self
                .filter
                .exclude_type_suffixes
                .iter()
                .any(|s| simple.ends_with(s.as_str()))
    }

    fn keep_method(&self, method: &MethodDecl) -> bool {
        method.visibility.is_public()
            && !method.is_synthetic
            && !method.name.contains(self.filter.synthetic_marker.as_str())
            && !method.is_marked(&self.filter.internal_marker)
    }
}

/// Class bindings as seen from inside `method`, minus names its own type
/// parameters shadow.
fn method_scope<'s>(context: &'s Substitution, method: &MethodDecl) -> Cow<'s, Substitution> {
    if method.type_params.iter().any(|p| context.contains_key(p)) {
        let mut scope = context.clone();
        for param in &method.type_params {
            scope.remove(param);
        }
        Cow::Owned(scope)
    } else {
        Cow::Borrowed(context)
    }
}

#[cfg(test)]
mod tests {
    use bauplan_universe::{
        TypeRef, Visibility,
        testing::{TypeFixture, universe},
    };

    use super::*;

    fn index(universe: &TypeUniverse) -> MethodIndex {
        let filter = FilterConfig::default();
        let docs = DocSource::new();
        Indexer::new(universe, &filter, &docs).index()
    }

    #[test]
    fn test_type_filters() {
        let mut private = TypeFixture::class("com.x.Private").build();
        private.visibility = Visibility::Private;
        let universe = TypeUniverse::builder()
            .with(TypeFixture::class("com.x.Foo").build())
            .with(TypeFixture::class("com.x.DefaultFoo").build())
            .with(TypeFixture::class("com.x.FooImpl").build())
            .with(TypeFixture::class("com.x.Foo$BuilderImpl").build())
            .with(
                TypeFixture::class("com.x.Hidden")
                    .annotated("com.x.annotations.SdkInternalApi")
                    .build(),
            )
            .with(private)
            .build();

        let index = index(&universe);
        let owners: Vec<_> = index.owners().collect();
        assert_eq!(owners, ["com.x.Foo"]);
        assert!(!index.contains_type("java.util.List"));
    }

    #[test]
    fn test_method_filters() {
        let mut synthetic = MethodDecl::new("bridge", vec![], TypeRef::named("com.x.Foo"));
        synthetic.is_synthetic = true;
        let mut protected = MethodDecl::new("hook", vec![], TypeRef::named("com.x.Foo"));
        protected.visibility = Visibility::Protected;
        let mut internal = MethodDecl::new("peek", vec![], TypeRef::named("com.x.Foo"));
        internal.annotations.push("InternalApi".into());

        let universe = universe([TypeFixture::class("com.x.Foo")
            .method("name", &["java.lang.String"], "com.x.Foo")
            .method("access$000", &[], "com.x.Foo")
            .with_method(synthetic)
            .with_method(protected)
            .with_method(internal)]);

        let index = index(&universe);
        let names: Vec<_> = index.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["name"]);
    }

    #[test]
    fn test_inherited_methods_are_indexed_for_owner() {
        let universe = universe([
            TypeFixture::interface("com.x.Base").method("base", &[], "void"),
            TypeFixture::class("com.x.Foo")
                .extends("com.x.Base")
                .method("own", &[], "void"),
        ]);

        let index = index(&universe);
        let foo = index.methods_of("com.x.Foo");
        assert_eq!(foo.len(), 2);
        assert!(foo.iter().all(|m| m.owner == "com.x.Foo"));
        assert_eq!(foo[1].declaring, "com.x.Base");
    }

    #[test]
    fn test_generic_return_resolved_through_hierarchy() {
        let universe = universe([
            TypeFixture::interface("com.x.Buildable")
                .params(&["B", "T"])
                .method("build", &[], "T")
                .method("name", &["java.lang.String"], "B"),
            TypeFixture::interface("com.x.Foo$Builder")
                .extends("com.x.Buildable<com.x.Foo$Builder, com.x.Foo>"),
            TypeFixture::class("com.x.Foo"),
        ]);

        let index = index(&universe);
        let builder = index.methods_of("com.x.Foo$Builder");
        assert_eq!(builder[0].name, "build");
        assert_eq!(builder[0].returns.raw_type, "com.x.Foo");
        assert_eq!(builder[1].returns.raw_type, "com.x.Foo$Builder");
        assert_eq!(builder[1].signature(), "name(java.lang.String)");
    }

    #[test]
    fn test_method_type_params_shadow_class_bindings() {
        let mut convert = MethodDecl::new(
            "convert",
            vec![TypeRef::variable("T")],
            TypeRef::generic("java.util.List", vec![TypeRef::variable("T")]),
        );
        convert.type_params = vec!["T".to_string()];
        let universe = universe([
            TypeFixture::interface("com.x.Base")
                .params(&["T"])
                .method("get", &[], "T")
                .with_method(convert),
            TypeFixture::class("com.x.Foo").extends("com.x.Base<com.x.Foo>"),
        ]);

        let index = index(&universe);
        let foo = index.methods_of("com.x.Foo");
        assert_eq!(foo[0].returns.raw_type, "com.x.Foo");
        assert_eq!(foo[1].name, "convert");
        assert_eq!(foo[1].params[0].raw_type, "java.lang.Object");
        assert_eq!(foo[1].returns.display_name, "List<*>");
    }

    #[test]
    fn test_overrides_collapse_to_one_signature() {
        let universe = universe([
            TypeFixture::interface("com.x.Base").method("name", &["java.lang.String"], "com.x.Base"),
            TypeFixture::class("com.x.Foo")
                .extends("com.x.Base")
                .method("name", &["java.lang.String"], "com.x.Foo")
                .method("name", &["int"], "com.x.Foo"),
        ]);

        let index = index(&universe);
        let signatures: Vec<_> = index.methods_of("com.x.Foo").iter().map(|m| m.signature()).collect();
        assert_eq!(signatures, ["name(java.lang.String)", "name(int)"]);
    }

    #[test]
    fn test_indexing_is_idempotent() {
        let universe = universe([
            TypeFixture::interface("com.x.Base").method("name", &[], "com.x.Base"),
            TypeFixture::class("com.x.Foo")
                .extends("com.x.Base")
                .method("name", &[], "com.x.Foo"),
        ]);
        let filter = FilterConfig::default();
        let docs = DocSource::new();
        let indexer = Indexer::new(&universe, &filter, &docs);
        let foo = universe.get("com.x.Foo").unwrap();

        let first = indexer.index_type(foo);
        let second = indexer.index_type(foo);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    fn chain_universe(order: [&str; 3]) -> TypeUniverse {
        // A ⊒ B ⊒ C, each overriding `get()` with a narrower return type
        let returns = |owner: &str| match owner {
            "com.x.A" => "com.x.RA",
            "com.x.B" => "com.x.RB",
            _ => "com.x.RC",
        };
        let mut fixtures = vec![
            TypeFixture::class("com.x.RA"),
            TypeFixture::class("com.x.RB").extends("com.x.RA"),
            TypeFixture::class("com.x.RC").extends("com.x.RB"),
        ];
        // the root declares nothing; its supertypes appear in `order`
        let mut root = TypeFixture::class("com.x.Root");
        for owner in order {
            fixtures.push(TypeFixture::interface(owner).method("get", &[], returns(owner)));
            root = root.extends(owner);
        }
        fixtures.push(root);
        universe(fixtures)
    }

    #[test]
    fn test_most_specific_return_regardless_of_order() {
        let orders = [
            ["com.x.A", "com.x.B", "com.x.C"],
            ["com.x.A", "com.x.C", "com.x.B"],
            ["com.x.B", "com.x.A", "com.x.C"],
            ["com.x.B", "com.x.C", "com.x.A"],
            ["com.x.C", "com.x.A", "com.x.B"],
            ["com.x.C", "com.x.B", "com.x.A"],
        ];
        for order in orders {
            let universe = chain_universe(order);
            let index = index(&universe);
            let root = index.methods_of("com.x.Root");
            assert_eq!(root.len(), 1, "order {order:?}");
            assert_eq!(root[0].returns.raw_type, "com.x.RC", "order {order:?}");
            assert_eq!(root[0].declaring, "com.x.C", "order {order:?}");
        }
    }

    #[test]
    fn test_incomparable_returns_keep_first() {
        let universe = universe([
            TypeFixture::class("com.x.R1"),
            TypeFixture::class("com.x.R2"),
            TypeFixture::interface("com.x.I1").method("get", &[], "com.x.R1"),
            TypeFixture::interface("com.x.I2").method("get", &[], "com.x.R2"),
            TypeFixture::class("com.x.Root").extends("com.x.I1").extends("com.x.I2"),
        ]);

        let index = index(&universe);
        assert_eq!(index.methods_of("com.x.Root")[0].returns.raw_type, "com.x.R1");
    }

    #[test]
    fn test_method_docs_use_declaring_type() {
        let universe = universe([
            TypeFixture::interface("com.x.Base").params(&["T"]).method("set", &["T"], "void"),
            TypeFixture::class("com.x.Foo").extends("com.x.Base<java.lang.String>"),
        ]);
        let filter = FilterConfig::default();
        let mut docs = DocSource::new();
        docs.insert_method("com.x.Base", "set", &["T".to_string()], "Sets it.");

        let index = Indexer::new(&universe, &filter, &docs).index();
        let set = &index.methods_of("com.x.Foo")[0];
        assert_eq!(set.doc, "Sets it.");
        assert_eq!(set.params[0].raw_type, "java.lang.String");
    }
}
