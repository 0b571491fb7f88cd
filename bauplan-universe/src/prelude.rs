//! Standard library types every universe can rely on.
//!
//! Adapters usually dump only the domain package. Container classification
//! still needs to know that `List` is a `Collection`, so these declarations
//! are merged in whenever the adapter leaves them out.

use crate::{TypeDecl, TypeKind, TypeRef};

const VALUE_TYPES: &[&str] = &[
    "java.lang.Boolean",
    "java.lang.Byte",
    "java.lang.Character",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.lang.Void",
];

const NUMBERS: &[&str] = &[
    "java.lang.Byte",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
];

fn class(name: &str, supertypes: &[&str]) -> TypeDecl {
    let mut decl = TypeDecl::new(name);
    decl.supertypes = supertypes.iter().map(|s| parse(s)).collect();
    decl
}

fn interface(name: &str, params: &[&str], supertypes: &[&str]) -> TypeDecl {
    let mut decl = class(name, supertypes);
    decl.kind = TypeKind::Interface;
    decl.type_params = params.iter().map(|p| p.to_string()).collect();
    decl
}

fn parse(text: &str) -> TypeRef {
    // prelude references are static text
    TypeRef::parse(text).unwrap_or_else(|_| TypeRef::named(text))
}

/// The prelude declarations, in a stable order.
pub(crate) fn types() -> Vec<TypeDecl> {
    let mut types = vec![
        class("java.lang.Object", &[]),
        class("java.lang.String", &["java.lang.CharSequence"]),
        interface("java.lang.CharSequence", &[], &[]),
        class("java.lang.Number", &[]),
        class("java.lang.Enum", &[]),
    ];

    for name in VALUE_TYPES {
        let supertypes: &[&str] = if NUMBERS.contains(name) {
            &["java.lang.Number"]
        } else {
            &[]
        };
        types.push(class(name, supertypes));
    }

    types.extend([
        interface("java.lang.Iterable", &["T"], &[]),
        interface("java.util.Collection", &["E"], &["java.lang.Iterable<E>"]),
        interface("java.util.List", &["E"], &["java.util.Collection<E>"]),
        interface("java.util.Set", &["E"], &["java.util.Collection<E>"]),
        interface("java.util.SortedSet", &["E"], &["java.util.Set<E>"]),
        interface("java.util.Queue", &["E"], &["java.util.Collection<E>"]),
        interface("java.util.Deque", &["E"], &["java.util.Queue<E>"]),
        interface("java.util.Map", &["K", "V"], &[]),
        interface("java.util.SortedMap", &["K", "V"], &["java.util.Map<K, V>"]),
        interface("java.util.NavigableMap", &["K", "V"], &["java.util.SortedMap<K, V>"]),
        interface("java.util.function.Consumer", &["T"], &[]),
    ]);

    types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_names_are_unique() {
        let types = types();
        let mut names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), types.len());
    }

    #[test]
    fn test_prelude_references_parse() {
        for decl in types() {
            for supertype in &decl.supertypes {
                assert!(TypeRef::parse(&supertype.to_string()).is_ok());
            }
        }
    }
}
