use std::collections::BTreeSet;

use bauplan_core::{capitalize, lower_first_word, simple_name};
use tracing::debug;

use super::{
    CollectionDsl, DslFunction, DslModel, DslProperty, DslScope, ExtDsl, MapDsl, SubDsl, TypeDsl,
    to_markdown,
};
use crate::{
    GroupMember, MethodDescriptor, ParamShape, Resolver, TargetModel, TargetModels, TypeSummary,
};

/// Package prefixes renderers never need to import.
const STANDARD_PACKAGES: [&str; 2] = ["java.util", "java.lang"];

/// Lowers target models into the DSL model.
pub struct Lowering<'a> {
    resolver: Resolver<'a>,
    source_prefix: &'a str,
    target_prefix: &'a str,
    scope: DslScope,
}

impl<'a> Lowering<'a> {
    pub fn new(resolver: Resolver<'a>, source_prefix: &'a str, target_prefix: &'a str) -> Self {
        let last = source_prefix.rsplit('.').next().unwrap_or(source_prefix);
        let scope = DslScope::new(target_prefix, format!("{}Dsl", capitalize(last)));
        Self {
            resolver,
            source_prefix,
            target_prefix,
            scope,
        }
    }

    pub fn scope(&self) -> &DslScope {
        &self.scope
    }

    pub fn lower(&self, models: &TargetModels) -> DslModel {
        let mut types: Vec<TypeDsl> = models.iter().map(|m| self.lower_target(m, models)).collect();
        types.sort_by(|a, b| (&a.name, &a.package).cmp(&(&b.name, &b.package)));

        let mut collections: Vec<CollectionDsl> = models
            .iter()
            .filter(|m| m.usages.iter().any(|u| u.shape == ParamShape::Collection))
            .map(|m| self.collection_dsl(m))
            .collect();
        collections.sort_by(|a, b| (&a.name, &a.target).cmp(&(&b.name, &b.target)));

        let mut maps: Vec<MapDsl> = models
            .iter()
            .filter_map(|m| {
                let usage = m.usages.iter().find(|u| u.shape == ParamShape::Map)?;
                Some(self.map_dsl(m, usage))
            })
            .collect();
        maps.sort_by(|a, b| (&a.name, &a.target).cmp(&(&b.name, &b.target)));

        debug!(
            types = types.len(),
            collections = collections.len(),
            maps = maps.len(),
            "lowered DSL model"
        );

        DslModel {
            scope: self.scope.clone(),
            types,
            collections,
            maps,
        }
    }

    pub fn lower_target(&self, model: &TargetModel, models: &TargetModels) -> TypeDsl {
        let target = &model.target;
        let mut imports = Imports::default();
        imports.extend(self.scope.declarations());
        imports.insert(&model.builder.qualified);
        imports.insert(&target.qualified);

        let mut properties = Vec::new();
        let mut secondaries = Vec::new();
        let mut functions = Vec::new();
        for group in &model.groups {
            if let Some(primary) = group.primary_property() {
                imports.param_types(primary);
                properties.push(property(&group.name, primary));
            }
            if let Some(secondary) = group.secondary_overload() {
                imports.param_types(secondary);
                secondaries.push(property(&group.name, secondary));
            }
            if let Some(action) = group.plain_action() {
                functions.push(DslFunction {
                    name: group.name.clone(),
                    comment: to_markdown(&action.method.doc),
                });
            }
        }

        let mut sub_dsls: Vec<SubDsl> = model
            .nested
            .iter()
            .map(|nested| {
                imports.insert(&nested.target);
                SubDsl {
                    name: nested.name.clone(),
                    comment: to_markdown(&nested.doc),
                    target_type: summary(models, &nested.target).name,
                    dsl_type: format!("{}Dsl", nested.linkage),
                    entrypoint: lower_first_word(&nested.linkage),
                    linkage: nested.linkage.clone(),
                }
            })
            .collect();
        sub_dsls.sort_by(|a, b| a.name.cmp(&b.name));

        let mut ext_dsls: Vec<ExtDsl> = model
            .usages
            .iter()
            .filter(|u| !u.is_builder_method && u.shape != ParamShape::None)
            .map(|usage| {
                imports.insert(&usage.owner);
                let linkage = format!("{}{}", target.short_name(), usage.shape.linkage_suffix());
                ExtDsl {
                    name: usage.name.clone(),
                    comment: to_markdown(&usage.doc),
                    receiver: usage.owner.clone(),
                    receiver_type: simple_name(&usage.owner),
                    target_type: target.name.clone(),
                    dsl_type: format!("{}Dsl", linkage),
                    entrypoint: lower_first_word(&linkage),
                    linkage,
                }
            })
            .collect();
        ext_dsls.sort_by(|a, b| (&a.name, &a.receiver).cmp(&(&b.name, &b.receiver)));

        TypeDsl {
            package: self.package_for(&target.package),
            name: format!("{}Dsl", target.short_name()),
            entrypoint: lower_first_word(target.short_name()),
            builder_type: model.builder.name.clone(),
            target_type: target.name.clone(),
            comment: to_markdown(&target.doc),
            properties,
            secondaries,
            functions,
            sub_dsls,
            ext_dsls,
            imports: imports.into_set(),
        }
    }

    /// Package for generated code mirroring a source package.
    ///
    /// `com.x.model.s3` under source `com.x.model` and target `com.x.dsl`
    /// becomes `com.x.dsl.s3`.
    pub fn package_for(&self, package: &str) -> String {
        match package.strip_prefix(self.source_prefix) {
            Some(rest) => format!("{}{}", self.target_prefix, rest),
            None => format!("{}.{}", self.target_prefix, package),
        }
    }

    fn collection_dsl(&self, model: &TargetModel) -> CollectionDsl {
        let target = &model.target;
        let mut imports = Imports::default();
        imports.extend(self.scope.declarations());
        imports.insert(&target.qualified);

        CollectionDsl {
            package: self.package_for(&target.package),
            name: format!("{}CollectionDsl", target.short_name()),
            entrypoint: format!("{}Collection", lower_first_word(target.short_name())),
            comment: to_markdown(&target.doc),
            target: target.qualified.clone(),
            target_type: target.name.clone(),
            target_dsl: format!("{}Dsl", target.short_name()),
            imports: imports.into_set(),
        }
    }

    fn map_dsl(&self, model: &TargetModel, usage: &MethodDescriptor) -> MapDsl {
        let target = &model.target;
        let mut imports = Imports::default();
        imports.extend(self.scope.declarations());
        imports.insert(&target.qualified);

        let key_type = usage
            .single_param()
            .and_then(|p| p.resolved.args().first())
            .map(|key| {
                key.visit_names(&mut |name| imports.insert(name));
                self.resolver.display(key)
            })
            .unwrap_or_else(|| crate::UNCONSTRAINED.to_string());

        MapDsl {
            package: self.package_for(&target.package),
            name: format!("{}MapDsl", target.short_name()),
            entrypoint: format!("{}Map", lower_first_word(target.short_name())),
            comment: to_markdown(&target.doc),
            key_type,
            target: target.qualified.clone(),
            target_type: target.name.clone(),
            target_dsl: format!("{}Dsl", target.short_name()),
            imports: imports.into_set(),
        }
    }
}

fn property(name: &str, member: &GroupMember) -> DslProperty {
    // primary and secondary members always take exactly one parameter
    let (value_type, nullable) = member
        .method
        .single_param()
        .map_or((String::new(), true), |p| (p.display_name.clone(), p.nullable));
    DslProperty {
        name: name.to_string(),
        comment: to_markdown(&member.method.doc),
        value_type,
        nullable,
    }
}

fn summary(models: &TargetModels, target: &str) -> TypeSummary {
    models
        .get(target)
        .map(|m| m.target.clone())
        .unwrap_or_else(|| TypeSummary::new(target, ""))
}

/// Import set that drops nested type names and standard packages.
#[derive(Default)]
struct Imports(BTreeSet<String>);

impl Imports {
    fn insert(&mut self, name: &str) {
        let standard = STANDARD_PACKAGES.iter().any(|p| name.starts_with(p));
        if !name.contains('$') && !standard {
            self.0.insert(name.to_string());
        }
    }

    fn extend(&mut self, names: impl IntoIterator<Item = String>) {
        for name in names {
            self.insert(&name);
        }
    }

    fn param_types(&mut self, member: &GroupMember) {
        for param in &member.method.params {
            if !param.is_primitive() {
                param.resolved.visit_names(&mut |name| self.insert(name));
            }
        }
    }

    fn into_set(self) -> BTreeSet<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use bauplan_manifest::{FilterConfig, ModelConfig};
    use bauplan_universe::{
        DocSource, TypeUniverse,
        testing::{TypeFixture, builder_pair, universe},
    };

    use super::*;
    use crate::{Classifier, Indexer, ModelBuilder, discover};

    const SOURCE: &str = "com.x.model";
    const TARGET: &str = "com.x.dsl";

    fn fixture() -> TypeUniverse {
        let foo_builder = "com.x.model.Foo$Builder";
        let (foo, _) = builder_pair("com.x.model.Foo");
        let (bar, bar_builder) = builder_pair("com.x.model.sub.Bar");
        universe([
            foo,
            TypeFixture::interface(foo_builder)
                .method("build", &[], "com.x.model.Foo")
                .method("name", &["java.lang.String"], foo_builder)
                .method("mode", &["com.x.model.Mode"], foo_builder)
                .method("mode", &["java.lang.String"], foo_builder)
                .method("count", &["int"], foo_builder)
                .method("items", &["java.util.List<com.x.model.sub.Bar>"], foo_builder)
                .method("byKey", &["java.util.Map<com.x.model.Key, com.x.model.sub.Bar>"], foo_builder)
                .method("reset", &[], foo_builder),
            TypeFixture::class("com.x.model.Mode"),
            TypeFixture::class("com.x.model.Key"),
            bar,
            bar_builder,
            TypeFixture::class("com.x.model.Client")
                .method("send", &["com.x.model.Foo"], "void")
                .method("sendAll", &["java.util.Set<com.x.model.Foo>"], "void"),
        ])
    }

    fn lower(universe: &TypeUniverse, docs: &DocSource) -> DslModel {
        let filter = FilterConfig::default();
        let config = ModelConfig::default();
        let mut index = Indexer::new(universe, &filter, docs).index();
        let discovery = discover(&index, universe, SOURCE);
        Classifier::new(universe, &discovery, &config).classify(&mut index);
        let models = ModelBuilder::new(universe, &index, &discovery, &config, docs).build();
        Lowering::new(Resolver::new(universe), SOURCE, TARGET).lower(&models)
    }

    fn type_dsl<'m>(model: &'m DslModel, name: &str) -> &'m TypeDsl {
        model.types.iter().find(|t| t.name == name).unwrap()
    }

    #[test]
    fn test_scope() {
        let universe = fixture();
        let model = lower(&universe, &DocSource::new());

        assert_eq!(model.scope.name, "ModelDsl");
        assert_eq!(model.scope.marker, "ModelDslMarker");
        assert_eq!(
            model.scope.declarations(),
            ["com.x.dsl.ModelDsl".to_string(), "com.x.dsl.ModelDslMarker".to_string()]
        );
    }

    #[test]
    fn test_type_dsl() {
        let universe = fixture();
        let model = lower(&universe, &DocSource::new());
        let foo = type_dsl(&model, "FooDsl");

        assert_eq!(foo.package, "com.x.dsl");
        assert_eq!(foo.entrypoint, "foo");
        assert_eq!(foo.builder_type, "Foo.Builder");
        assert_eq!(foo.target_type, "Foo");

        let properties: Vec<_> = foo
            .properties
            .iter()
            .map(|p| (p.name.as_str(), p.value_type.as_str(), p.nullable))
            .collect();
        assert_eq!(
            properties,
            [
                ("byKey", "Map<Key, Bar>", true),
                ("count", "int", false),
                ("items", "List<Bar>", true),
                ("mode", "Mode", true),
                ("name", "String", true),
            ]
        );

        let secondaries: Vec<_> = foo.secondaries.iter().map(|p| (p.name.as_str(), p.value_type.as_str())).collect();
        assert_eq!(secondaries, [("mode", "String")]);

        let functions: Vec<_> = foo.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, ["reset"]);
        assert!(foo.has_block());
    }

    #[test]
    fn test_sub_and_ext_dsls() {
        let universe = fixture();
        let model = lower(&universe, &DocSource::new());
        let foo = type_dsl(&model, "FooDsl");

        let subs: Vec<_> = foo
            .sub_dsls
            .iter()
            .map(|s| (s.name.as_str(), s.dsl_type.as_str(), s.entrypoint.as_str()))
            .collect();
        assert_eq!(
            subs,
            [
                ("byKey", "BarMapDsl", "barMap"),
                ("items", "BarCollectionDsl", "barCollection"),
            ]
        );

        let exts: Vec<_> = foo
            .ext_dsls
            .iter()
            .map(|e| (e.receiver_type.as_str(), e.name.as_str(), e.linkage.as_str()))
            .collect();
        assert_eq!(exts, [("Client", "send", "Foo"), ("Client", "sendAll", "FooCollection")]);

        // builder methods taking Bar are not extension entry points
        assert!(type_dsl(&model, "BarDsl").ext_dsls.is_empty());
        assert_eq!(type_dsl(&model, "BarDsl").package, "com.x.dsl.sub");
    }

    #[test]
    fn test_imports() {
        let universe = fixture();
        let model = lower(&universe, &DocSource::new());
        let foo = type_dsl(&model, "FooDsl");

        let imports: Vec<_> = foo.imports.iter().map(String::as_str).collect();
        assert_eq!(
            imports,
            [
                "com.x.dsl.ModelDsl",
                "com.x.dsl.ModelDslMarker",
                "com.x.model.Client",
                "com.x.model.Foo",
                "com.x.model.Key",
                "com.x.model.Mode",
                "com.x.model.sub.Bar",
            ]
        );
    }

    #[test]
    fn test_collection_and_map_dsls() {
        let universe = fixture();
        let model = lower(&universe, &DocSource::new());

        let collections: Vec<_> = model.collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(collections, ["BarCollectionDsl", "FooCollectionDsl"]);
        assert_eq!(model.collections[0].entrypoint, "barCollection");
        assert_eq!(model.collections[0].package, "com.x.dsl.sub");

        assert_eq!(model.maps.len(), 1);
        let map = &model.maps[0];
        assert_eq!(map.name, "BarMapDsl");
        assert_eq!(map.key_type, "Key");
        assert!(map.imports.contains("com.x.model.Key"));
    }

    #[test]
    fn test_comments_are_markdown() {
        let universe = fixture();
        let mut docs = DocSource::new();
        docs.insert_type("com.x.model.Foo", "<p>A foo.</p>");
        docs.insert_method(
            "com.x.model.Foo$Builder",
            "name",
            &["java.lang.String".to_string()],
            "<b>Name</b> of the foo.",
        );
        let model = lower(&universe, &docs);
        let foo = type_dsl(&model, "FooDsl");

        assert_eq!(foo.comment, "A foo.");
        let name = foo.properties.iter().find(|p| p.name == "name").unwrap();
        assert_eq!(name.comment, "Name of the foo.");
    }

    #[test]
    fn test_package_for() {
        let universe = fixture();
        let lowering = Lowering::new(Resolver::new(&universe), SOURCE, TARGET);
        assert_eq!(lowering.package_for("com.x.model"), "com.x.dsl");
        assert_eq!(lowering.package_for("com.x.model.s3"), "com.x.dsl.s3");
        assert_eq!(lowering.package_for("org.other"), "com.x.dsl.org.other");
    }
}
