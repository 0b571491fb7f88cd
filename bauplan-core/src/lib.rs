//! Core utilities shared across the Bauplan crates.
//!
//! This crate provides naming helpers for qualified type names and the
//! generated-file writing used by the CLI.

mod file;
mod naming;

// File operations
pub use file::{File, FileRules, Overwrite, WriteResult};
// Naming utilities
pub use naming::{capitalize, lower_first_word, package_name, simple_name};
