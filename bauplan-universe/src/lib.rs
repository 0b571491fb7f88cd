//! Type-graph representation of a builder-pattern type universe.
//!
//! This crate is the boundary between a platform-specific introspection
//! adapter and the Bauplan extraction pipeline. The adapter dumps every type
//! under a namespace (with its supertypes, generic parameters and public
//! methods) into a plain data structure; the pipeline only ever reads that
//! structure and never touches a platform reflection API.
//!
//! # Architecture
//!
//! ```text
//! adapter (JSON dump) → TypeUniverse (immutable arena) → bauplan-model (pipeline)
//! ```
//!
//! The types here are designed to be:
//! - Platform-agnostic (type references are a small algebra, not host classes)
//! - Immutable once built (the universe is a snapshot shared by every phase)
//! - Serializable (adapters exchange universes and documentation as JSON)

mod decl;
mod docs;
mod error;
mod prelude;
mod type_ref;
mod universe;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use decl::{MethodDecl, TypeDecl, TypeKind, Visibility};
pub use docs::DocSource;
pub use error::{TypeRefError, UniverseError};
pub use type_ref::{OBJECT, Primitive, TypeRef};
pub use universe::{HierarchyMethod, Substitution, Substitutions, TypeUniverse, UniverseBuilder};
