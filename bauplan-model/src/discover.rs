//! Builder/target pair discovery.

use std::collections::HashMap;

use bauplan_universe::TypeUniverse;
use serde::Serialize;

use crate::MethodIndex;

const TERMINAL: &str = "build";
const FACTORY: &str = "builder";

/// A builder type and the target type it constructs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BuilderTargetPair {
    pub builder: String,
    pub target: String,
}

/// A candidate dropped because one of its sides was already paired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousPair {
    pub kept: BuilderTargetPair,
    pub dropped: BuilderTargetPair,
}

/// Result of discovery: confirmed pairs plus what was left out and why.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Discovery {
    pub pairs: Vec<BuilderTargetPair>,
    pub ambiguous: Vec<AmbiguousPair>,
    /// Candidates whose target has no matching static factory.
    pub rejected: Vec<BuilderTargetPair>,
    #[serde(skip)]
    by_target: HashMap<String, usize>,
    #[serde(skip)]
    by_builder: HashMap<String, usize>,
}

impl Discovery {
    pub fn target_of(&self, builder: &str) -> Option<&str> {
        self.by_builder
            .get(builder)
            .map(|&i| self.pairs[i].target.as_str())
    }

    pub fn builder_of(&self, target: &str) -> Option<&str> {
        self.by_target
            .get(target)
            .map(|&i| self.pairs[i].builder.as_str())
    }

    pub fn is_target(&self, name: &str) -> bool {
        self.by_target.contains_key(name)
    }

    pub fn is_builder(&self, name: &str) -> bool {
        self.by_builder.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn accept(&mut self, pair: BuilderTargetPair) {
        let existing = self
            .by_target
            .get(&pair.target)
            .or_else(|| self.by_builder.get(&pair.builder))
            .copied();

        match existing {
            Some(i) if self.pairs[i] == pair => {}
            Some(i) => {
                let kept = self.pairs[i].clone();
                tracing::warn!(
                    kept.builder = %kept.builder,
                    kept.target = %kept.target,
                    dropped.builder = %pair.builder,
                    dropped.target = %pair.target,
                    "ambiguous builder pairing"
                );
                self.ambiguous.push(AmbiguousPair {
                    kept,
                    dropped: pair,
                });
            }
            None => {
                let i = self.pairs.len();
                self.by_target.insert(pair.target.clone(), i);
                self.by_builder.insert(pair.builder.clone(), i);
                self.pairs.push(pair);
            }
        }
    }
}

/// Find builder/target pairs among indexed methods.
///
/// A candidate comes from every zero-argument instance method named `build`.
/// It is confirmed when the returned type exposes a static zero-argument
/// `builder` whose return type is assignable to the candidate's owner.
/// Only targets equal to or nested under `prefix` are considered. When a
/// builder or target is claimed twice, the first pair wins.
pub fn discover(index: &MethodIndex, universe: &TypeUniverse, prefix: &str) -> Discovery {
    let mut discovery = Discovery::default();

    for method in index.iter() {
        if method.name != TERMINAL || !method.params.is_empty() || method.is_static {
            continue;
        }
        let candidate = BuilderTargetPair {
            builder: method.owner.clone(),
            target: method.returns.raw_type.clone(),
        };
        if !under_prefix(&candidate.target, prefix) {
            continue;
        }
        if !has_factory(universe, &candidate) {
            tracing::debug!(builder = %candidate.builder, target = %candidate.target, "candidate rejected");
            discovery.rejected.push(candidate);
            continue;
        }
        discovery.accept(candidate);
    }

    discovery
}

fn has_factory(universe: &TypeUniverse, candidate: &BuilderTargetPair) -> bool {
    universe
        .methods_in_hierarchy(&candidate.target)
        .iter()
        .any(|hm| {
            hm.method.is_static
                && hm.method.name == FACTORY
                && hm.method.params.is_empty()
                && universe.is_subtype(&hm.method.returns.erasure(), &candidate.builder)
        })
}

fn under_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use bauplan_manifest::FilterConfig;
    use bauplan_universe::{
        DocSource,
        testing::{TypeFixture, builder_pair, universe},
    };

    use super::*;
    use crate::Indexer;

    fn run(universe: &TypeUniverse, prefix: &str) -> Discovery {
        let filter = FilterConfig::default();
        let docs = DocSource::new();
        let index = Indexer::new(universe, &filter, &docs).index();
        discover(&index, universe, prefix)
    }

    fn pair(builder: &str, target: &str) -> BuilderTargetPair {
        BuilderTargetPair {
            builder: builder.into(),
            target: target.into(),
        }
    }

    #[test]
    fn test_confirmed_pair() {
        let (foo, foo_builder) = builder_pair("com.x.Foo");
        let universe = universe([foo, foo_builder]);

        let discovery = run(&universe, "com.x");
        assert_eq!(discovery.pairs, [pair("com.x.Foo$Builder", "com.x.Foo")]);
        assert_eq!(discovery.builder_of("com.x.Foo"), Some("com.x.Foo$Builder"));
        assert_eq!(discovery.target_of("com.x.Foo$Builder"), Some("com.x.Foo"));
        assert!(discovery.is_target("com.x.Foo"));
        assert!(discovery.is_builder("com.x.Foo$Builder"));
        assert!(!discovery.is_target("com.x.Foo$Builder"));
    }

    #[test]
    fn test_factory_returning_subtype_of_builder() {
        // the factory hands out the concrete builder, `build` lives on its interface
        let universe = universe([
            TypeFixture::class("com.x.Foo").static_method("builder", &[], "com.x.Foo$Concrete"),
            TypeFixture::interface("com.x.Foo$Builder").method("build", &[], "com.x.Foo"),
            TypeFixture::class("com.x.Foo$Concrete").extends("com.x.Foo$Builder"),
        ]);

        let discovery = run(&universe, "com.x");
        assert!(discovery.pairs.contains(&pair("com.x.Foo$Builder", "com.x.Foo")));
    }

    #[test]
    fn test_unrelated_build_method_is_rejected() {
        let universe = universe([
            TypeFixture::class("com.x.Report"),
            TypeFixture::class("com.x.Compiler").method("build", &[], "com.x.Report"),
            TypeFixture::class("com.x.Wrong").static_method("builder", &[], "com.x.Other"),
            TypeFixture::class("com.x.Other"),
            TypeFixture::class("com.x.WrongBuilder").method("build", &[], "com.x.Wrong"),
        ]);

        let discovery = run(&universe, "com.x");
        assert!(discovery.is_empty());
        assert_eq!(
            discovery.rejected,
            [
                pair("com.x.Compiler", "com.x.Report"),
                pair("com.x.WrongBuilder", "com.x.Wrong"),
            ]
        );
    }

    #[test]
    fn test_build_with_arguments_or_static_is_ignored() {
        let universe = universe([
            TypeFixture::class("com.x.Foo").static_method("builder", &[], "com.x.Foo$Builder"),
            TypeFixture::class("com.x.Foo$Builder")
                .method("build", &["java.lang.String"], "com.x.Foo")
                .static_method("build", &[], "com.x.Foo"),
        ]);

        let discovery = run(&universe, "com.x");
        assert!(discovery.is_empty());
        assert!(discovery.rejected.is_empty());
    }

    #[test]
    fn test_prefix_is_segment_aware() {
        let (a, a_builder) = builder_pair("com.x.Foo");
        let (b, b_builder) = builder_pair("com.xy.Bar");
        let (c, c_builder) = builder_pair("org.y.Baz");
        let universe = universe([a, a_builder, b, b_builder, c, c_builder]);

        let discovery = run(&universe, "com.x");
        let targets: Vec<_> = discovery.pairs.iter().map(|p| p.target.as_str()).collect();
        assert_eq!(targets, ["com.x.Foo"]);
        assert!(discovery.rejected.is_empty());
    }

    #[test]
    fn test_ambiguous_target_keeps_first() {
        let universe = universe([
            TypeFixture::class("com.x.Foo").static_method("builder", &[], "com.x.Foo$Impl"),
            TypeFixture::interface("com.x.Foo$Builder").method("build", &[], "com.x.Foo"),
            TypeFixture::interface("com.x.Foo$Fluent").method("build", &[], "com.x.Foo"),
            TypeFixture::class("com.x.Foo$Impl")
                .extends("com.x.Foo$Builder")
                .extends("com.x.Foo$Fluent"),
        ]);

        let discovery = run(&universe, "com.x");
        assert_eq!(discovery.pairs, [pair("com.x.Foo$Builder", "com.x.Foo")]);
        assert_eq!(
            discovery.ambiguous,
            [AmbiguousPair {
                kept: pair("com.x.Foo$Builder", "com.x.Foo"),
                dropped: pair("com.x.Foo$Fluent", "com.x.Foo"),
            }]
        );
    }

    #[test]
    fn test_every_pair_has_assignable_factory() {
        let (foo, foo_builder) = builder_pair("com.x.Foo");
        let (bar, bar_builder) = builder_pair("com.x.Bar");
        let universe = universe([foo, foo_builder, bar, bar_builder]);

        let discovery = run(&universe, "com.x");
        assert_eq!(discovery.len(), 2);
        for pair in &discovery.pairs {
            assert!(has_factory(&universe, pair), "{pair:?}");
        }
    }

    #[test]
    fn test_under_prefix() {
        assert!(under_prefix("com.x.Foo", "com.x"));
        assert!(under_prefix("com.x", "com.x"));
        assert!(!under_prefix("com.xy.Foo", "com.x"));
        assert!(!under_prefix("org.Foo", "com.x"));
    }
}
