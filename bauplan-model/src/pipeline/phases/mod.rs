//! Built-in pipeline phases, in execution order:
//!
//! - [`IndexPhase`] - index public methods of every type
//! - [`DiscoverPhase`] - find builder/target pairs
//! - [`ClassifyPhase`] - flag builder methods and buildable parameters
//! - [`AssemblePhase`] - build one target model per pair
//! - [`LowerPhase`] - project target models into the DSL model

mod assemble;
mod classify;
mod discover;
mod index;
mod lower;

pub use assemble::AssemblePhase;
pub use classify::ClassifyPhase;
pub use discover::DiscoverPhase;
pub use index::IndexPhase;
pub use lower::LowerPhase;

#[cfg(test)]
pub(crate) mod test_support {
    use bauplan_manifest::Manifest;
    use bauplan_universe::{
        DocSource, TypeUniverse,
        testing::{TypeFixture, builder_pair, universe},
    };

    use crate::pipeline::CompilationContext;

    pub const FOO_BUILDER: &str = "com.x.Foo$Builder";

    pub fn manifest() -> Manifest {
        "[source]\nprefix = \"com.x\"\n".parse().unwrap()
    }

    /// `Foo` with `name`, `items(List<Bar>)` and `refresh()`; `Bar` with no attributes.
    pub fn universe_fixture() -> TypeUniverse {
        let (foo, _) = builder_pair("com.x.Foo");
        let (bar, bar_builder) = builder_pair("com.x.Bar");
        universe([
            foo,
            TypeFixture::interface(FOO_BUILDER)
                .method("build", &[], "com.x.Foo")
                .method("name", &["java.lang.String"], FOO_BUILDER)
                .method("items", &["java.util.List<com.x.Bar>"], FOO_BUILDER)
                .method("refresh", &[], FOO_BUILDER),
            bar,
            bar_builder,
        ])
    }

    pub fn context() -> CompilationContext {
        CompilationContext::new(manifest(), universe_fixture(), DocSource::new())
    }
}
