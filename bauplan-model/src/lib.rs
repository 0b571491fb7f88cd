//! Builder/target model extraction.
//!
//! Given an immutable [`TypeUniverse`](bauplan_universe::TypeUniverse), this
//! crate discovers builder/target pairs and produces a render-agnostic model
//! of each target: its attribute setters grouped by name, its nested
//! buildable attributes, and the external methods that consume it.
//!
//! # Architecture
//!
//! ```text
//! Resolver → Indexer → Discovery → Classifier → ModelBuilder → Lowering
//! ```
//!
//! Each stage is a pure read over the universe plus the previous stage's
//! output. The [`pipeline`] module wires them into phases with plugin hooks
//! and diagnostics.

mod classify;
mod discover;
mod display;
mod document;
pub mod dsl;
mod index;
mod inputs;
pub mod pipeline;
mod resolve;
mod target;

pub use classify::{Classifier, ParamShape};
pub use discover::{AmbiguousPair, BuilderTargetPair, Discovery, discover};
pub use display::{TargetDisplay, render_target};
pub use document::ModelDocument;
pub use index::{Indexer, MethodDescriptor, MethodIndex};
pub use inputs::Inputs;
pub use resolve::{Resolver, TypeDescriptor, UNCONSTRAINED};
pub use target::{
    EXCLUDED_METHODS, GroupMember, MethodGroup, ModelBuilder, NestedAttribute, ParamKind, TargetModel, TargetModels,
    TypeSummary,
};
