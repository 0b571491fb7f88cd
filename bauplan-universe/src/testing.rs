//! Fixtures for building small type universes in tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use crate::{MethodDecl, TypeDecl, TypeKind, TypeRef, TypeUniverse};

/// Parse a type reference, panicking on malformed fixture text.
pub fn ty(text: &str) -> TypeRef {
    TypeRef::parse(text).unwrap_or_else(|e| panic!("bad fixture type '{}': {}", text, e))
}

/// Fluent builder for a [`TypeDecl`].
#[derive(Debug, Clone)]
pub struct TypeFixture {
    decl: TypeDecl,
}

impl TypeFixture {
    pub fn class(name: &str) -> Self {
        Self {
            decl: TypeDecl::new(name),
        }
    }

    pub fn interface(name: &str) -> Self {
        let mut fixture = Self::class(name);
        fixture.decl.kind = TypeKind::Interface;
        fixture
    }

    pub fn params(mut self, params: &[&str]) -> Self {
        self.decl.type_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn extends(mut self, supertype: &str) -> Self {
        self.decl.supertypes.push(ty(supertype));
        self
    }

    pub fn annotated(mut self, annotation: &str) -> Self {
        self.decl.annotations.push(annotation.to_string());
        self
    }

    /// Add a public instance method.
    pub fn method(self, name: &str, params: &[&str], returns: &str) -> Self {
        let method = MethodDecl::new(name, params.iter().map(|p| ty(p)).collect(), ty(returns));
        self.with_method(method)
    }

    /// Add a public static method.
    pub fn static_method(self, name: &str, params: &[&str], returns: &str) -> Self {
        let mut method = MethodDecl::new(name, params.iter().map(|p| ty(p)).collect(), ty(returns));
        method.is_static = true;
        self.with_method(method)
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.decl.methods.push(method);
        self
    }

    pub fn build(self) -> TypeDecl {
        self.decl
    }
}

/// A target with `static builder()` and its builder `<target>$Builder` with `build()`.
pub fn builder_pair(target: &str) -> (TypeFixture, TypeFixture) {
    let builder = format!("{}$Builder", target);
    (
        TypeFixture::class(target).static_method("builder", &[], &builder),
        TypeFixture::interface(&builder).method("build", &[], target),
    )
}

/// Build a universe from fixtures, in order.
pub fn universe(types: impl IntoIterator<Item = TypeFixture>) -> TypeUniverse {
    let mut builder = TypeUniverse::builder();
    for fixture in types {
        builder.add(fixture.build());
    }
    builder.build()
}
