//! Type descriptor resolution.
//!
//! Turns raw [`TypeRef`]s into [`TypeDescriptor`]s: a short display name for
//! code generation, the qualified textual form, the raw erasure and a
//! nullability marker. Resolution never fails; unresolved generics degrade
//! to [`UNCONSTRAINED`].

use std::collections::BTreeMap;

use bauplan_core::simple_name;
use bauplan_universe::{Substitution, TypeRef, TypeUniverse};
use serde::Serialize;

/// Display marker for a type argument with no known binding.
pub const UNCONSTRAINED: &str = "*";

/// A resolved reference to a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDescriptor {
    /// Short form for code generation (`List<Foo>`).
    pub display_name: String,
    /// Full textual form after substitution (`java.util.List<com.x.Foo>`).
    pub qualified_name: String,
    /// Erasure (`java.util.List`).
    pub raw_type: String,
    pub nullable: bool,
    #[serde(skip)]
    pub resolved: TypeRef,
}

impl TypeDescriptor {
    pub fn is_primitive(&self) -> bool {
        self.resolved.is_primitive()
    }

    pub fn is_array(&self) -> bool {
        self.resolved.is_array()
    }
}

/// Resolves raw type references against a universe.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    universe: &'a TypeUniverse,
    aliases: Option<&'a BTreeMap<String, String>>,
}

impl<'a> Resolver<'a> {
    pub fn new(universe: &'a TypeUniverse) -> Self {
        Self {
            universe,
            aliases: None,
        }
    }

    /// Use display-name aliases keyed by qualified (or primitive) name.
    pub fn with_aliases(mut self, aliases: &'a BTreeMap<String, String>) -> Self {
        self.aliases = Some(aliases);
        self
    }

    /// Resolve `ty` as seen from a type whose variables are bound by `context`.
    pub fn resolve(&self, ty: &TypeRef, context: &Substitution) -> TypeDescriptor {
        let resolved = ty.substitute(context);
        TypeDescriptor {
            display_name: self.display(&resolved),
            qualified_name: resolved.to_string(),
            raw_type: resolved.erasure(),
            nullable: !resolved.is_primitive(),
            resolved,
        }
    }

    /// Short display name of an already substituted reference.
    pub fn display(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Named { name, args } => {
                let base = self.alias(name).unwrap_or_else(|| simple_name(name));
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(|a| self.display(a)).collect();
                    return format!("{}<{}>", base, args.join(", "));
                }
                match self.universe.get(name) {
                    // raw use of a generic type
                    Some(decl) if !decl.type_params.is_empty() => {
                        let stars = vec![UNCONSTRAINED; decl.type_params.len()];
                        format!("{}<{}>", base, stars.join(", "))
                    }
                    _ => base,
                }
            }
            TypeRef::Primitive(p) => self
                .alias(p.as_str())
                .unwrap_or_else(|| p.as_str().to_string()),
            TypeRef::Array(elem) => format!("{}[]", self.display(elem)),
            TypeRef::Variable(_) => UNCONSTRAINED.to_string(),
            TypeRef::Wildcard { .. } => match ty.bound() {
                Some(bound) => self.display(bound),
                None => UNCONSTRAINED.to_string(),
            },
        }
    }

    fn alias(&self, name: &str) -> Option<String> {
        self.aliases.and_then(|a| a.get(name)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use bauplan_universe::testing::{TypeFixture, ty, universe};

    use super::*;

    fn fixture() -> TypeUniverse {
        universe([
            TypeFixture::class("com.x.Foo"),
            TypeFixture::class("com.x.Foo$Builder"),
            TypeFixture::class("com.x.Pair").params(&["A", "B"]),
        ])
    }

    fn resolve(universe: &TypeUniverse, text: &str) -> TypeDescriptor {
        Resolver::new(universe).resolve(&ty(text), &Substitution::new())
    }

    #[test]
    fn test_plain_declared_type() {
        let universe = fixture();
        let desc = resolve(&universe, "com.x.Foo$Builder");
        assert_eq!(desc.display_name, "Foo.Builder");
        assert_eq!(desc.qualified_name, "com.x.Foo$Builder");
        assert_eq!(desc.raw_type, "com.x.Foo$Builder");
        assert!(desc.nullable);
    }

    #[test]
    fn test_parameterized_type() {
        let universe = fixture();
        let desc = resolve(&universe, "java.util.Map<java.lang.String, java.util.List<com.x.Foo>>");
        assert_eq!(desc.display_name, "Map<String, List<Foo>>");
        assert_eq!(desc.raw_type, "java.util.Map");
    }

    #[test]
    fn test_raw_generic_type() {
        let universe = fixture();
        assert_eq!(resolve(&universe, "com.x.Pair").display_name, "Pair<*, *>");
        assert_eq!(resolve(&universe, "java.util.List").display_name, "List<*>");
    }

    #[test]
    fn test_wildcards_prefer_lower_bound() {
        let universe = fixture();
        assert_eq!(resolve(&universe, "java.util.List<? super com.x.Foo>").display_name, "List<Foo>");
        assert_eq!(resolve(&universe, "java.util.List<? extends com.x.Foo>").display_name, "List<Foo>");
        assert_eq!(resolve(&universe, "java.util.List<?>").display_name, "List<*>");
        let bare = resolve(&universe, "?");
        assert_eq!(bare.display_name, UNCONSTRAINED);
        assert_eq!(bare.raw_type, bauplan_universe::OBJECT);
    }

    #[test]
    fn test_type_variables() {
        let universe = fixture();
        let resolver = Resolver::new(&universe);
        let var = TypeRef::variable("T");

        // unbound: best-effort marker
        let unbound = resolver.resolve(&var, &Substitution::new());
        assert_eq!(unbound.display_name, UNCONSTRAINED);
        assert_eq!(unbound.qualified_name, "T");

        // bound through the context
        let mut context = Substitution::new();
        context.insert("T".into(), ty("com.x.Foo"));
        let bound = resolver.resolve(&var, &context);
        assert_eq!(bound.display_name, "Foo");
        assert_eq!(bound.raw_type, "com.x.Foo");
    }

    #[test]
    fn test_primitives_are_not_nullable() {
        let universe = fixture();
        let int = resolve(&universe, "int");
        assert_eq!(int.display_name, "int");
        assert!(!int.nullable);
        assert!(int.is_primitive());

        let boxed = resolve(&universe, "java.lang.Integer");
        assert!(boxed.nullable);
    }

    #[test]
    fn test_arrays() {
        let universe = fixture();
        let desc = resolve(&universe, "com.x.Foo[]");
        assert_eq!(desc.display_name, "Foo[]");
        assert_eq!(desc.raw_type, "com.x.Foo[]");
        assert!(desc.is_array());
    }

    #[test]
    fn test_aliases() {
        let universe = fixture();
        let aliases = BTreeMap::from([
            ("java.lang.Integer".to_string(), "Int".to_string()),
            ("int".to_string(), "Int".to_string()),
        ]);
        let resolver = Resolver::new(&universe).with_aliases(&aliases);
        let none = Substitution::new();

        assert_eq!(resolver.resolve(&ty("java.util.List<java.lang.Integer>"), &none).display_name, "List<Int>");
        assert_eq!(resolver.resolve(&ty("int"), &none).display_name, "Int");
    }

    #[test]
    fn test_equality_is_structural() {
        let universe = fixture();
        assert_ne!(resolve(&universe, "java.util.List<com.x.Foo>"), resolve(&universe, "com.x.Foo"));
        assert_eq!(resolve(&universe, "com.x.Foo"), resolve(&universe, "com.x.Foo"));
    }
}
