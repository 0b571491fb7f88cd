//! Type and method declarations as reported by an introspection adapter.

use bauplan_core::{package_name, simple_name};
use serde::{Deserialize, Serialize};

use crate::TypeRef;

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
}

/// Declared visibility of a type or method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// A declared type with its supertypes and the methods it declares itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Fully qualified name; nested types use `$` (`com.x.Foo$Builder`).
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    /// Direct supertypes, superclass first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    /// Create an empty public class declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::default(),
            visibility: Visibility::default(),
            type_params: Vec::new(),
            supertypes: Vec::new(),
            annotations: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Text after the last `.`, with nested type markers rendered as `.`.
    ///
    /// `com.x.Foo$Builder` becomes `Foo.Builder`.
    pub fn simple_name(&self) -> String {
        simple_name(&self.name)
    }

    /// Package of the outer-most type.
    pub fn package(&self) -> &str {
        package_name(&self.name)
    }

    /// Whether any annotation's simple name contains `marker`, ignoring case.
    pub fn is_marked(&self, marker: &str) -> bool {
        has_marker(&self.annotations, marker)
    }

    /// The type reference to this declaration with its own parameters as arguments.
    pub fn self_ref(&self) -> TypeRef {
        TypeRef::generic(
            self.name.clone(),
            self.type_params.iter().map(TypeRef::variable).collect(),
        )
    }
}

/// A method declared directly on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Compiler-generated bridge or accessor.
    #[serde(default, rename = "synthetic")]
    pub is_synthetic: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    #[serde(default = "void")]
    pub returns: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
}

fn void() -> TypeRef {
    TypeRef::Primitive(crate::Primitive::Void)
}

impl MethodDecl {
    /// Create a public instance method.
    pub fn new(name: impl Into<String>, params: Vec<TypeRef>, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::default(),
            is_static: false,
            is_synthetic: false,
            type_params: Vec::new(),
            params,
            returns,
            annotations: Vec::new(),
        }
    }

    /// Whether any annotation's simple name contains `marker`, ignoring case.
    pub fn is_marked(&self, marker: &str) -> bool {
        has_marker(&self.annotations, marker)
    }

    /// Parameter list as written in documentation keys: `(a, b)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

fn has_marker(annotations: &[String], marker: &str) -> bool {
    let marker = marker.to_lowercase();
    !marker.is_empty()
        && annotations
            .iter()
            .any(|a| annotation_simple_name(a).to_lowercase().contains(&marker))
}

/// `@com.x.Outer$SdkInternalApi(since = "2.0")` reads as `SdkInternalApi`.
fn annotation_simple_name(annotation: &str) -> &str {
    let name = annotation.split('(').next().unwrap_or(annotation).trim();
    name.rsplit(['.', '$']).next().unwrap_or(name)
}
