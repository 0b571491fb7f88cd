//! Compilation context passed through pipeline phases.

use bauplan_manifest::Manifest;
use bauplan_universe::{DocSource, TypeUniverse};

use super::diagnostic::{Diagnostic, Severity};
use crate::{Discovery, MethodIndex, Resolver, TargetModels, dsl::DslModel};

/// State carried through every phase.
///
/// The manifest, universe and documentation are fixed inputs. Each phase
/// fills in one of the `Option` outputs.
#[derive(Debug)]
pub struct CompilationContext {
    pub manifest: Manifest,
    pub universe: TypeUniverse,
    pub docs: DocSource,
    /// Indexed methods (populated by IndexPhase, flagged by ClassifyPhase).
    pub index: Option<MethodIndex>,
    /// Builder/target pairs (populated by DiscoverPhase).
    pub discovery: Option<Discovery>,
    /// Target models (populated by AssemblePhase).
    pub targets: Option<TargetModels>,
    /// DSL model (populated by LowerPhase).
    pub dsl: Option<DslModel>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(manifest: Manifest, universe: TypeUniverse, docs: DocSource) -> Self {
        Self {
            manifest,
            universe,
            docs,
            index: None,
            discovery: None,
            targets: None,
            dsl: None,
            diagnostics: Vec::new(),
        }
    }

    /// Resolver over the universe using the manifest's display-name aliases.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.universe).with_aliases(&self.manifest.type_names)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic built elsewhere (e.g. with a location).
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_context() -> CompilationContext {
        let manifest: Manifest = "[source]\nprefix = \"com.x\"\n".parse().unwrap();
        CompilationContext::new(manifest, TypeUniverse::builder().build(), DocSource::new())
    }

    #[test]
    fn test_context_creation() {
        let ctx = make_context();

        assert!(ctx.index.is_none());
        assert!(ctx.discovery.is_none());
        assert!(ctx.targets.is_none());
        assert!(ctx.dsl.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = make_context();

        ctx.add_error("test", "test error");
        ctx.add_warning("test", "test warning");
        ctx.add_diagnostic(Diagnostic::warning("test", "located").at("com.x.Foo"));

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 2);
    }

    #[test]
    fn test_context_no_errors() {
        let mut ctx = make_context();

        ctx.add_warning("test", "just a warning");
        ctx.add_info("test", "just info");

        assert!(!ctx.has_errors());
        assert!(ctx.has_warnings());
    }

    #[test]
    fn test_resolver_uses_aliases() {
        let mut ctx = make_context();
        ctx.manifest
            .type_names
            .insert("java.lang.Integer".into(), "Int".into());

        let ty = bauplan_universe::TypeRef::named("java.lang.Integer");
        assert_eq!(ctx.resolver().display(&ty), "Int");
    }
}
