//! Conformance test helpers for the Vela elaboration engine.
//!
//! Provides a small builder for surface modules, the reference fixture
//! modules, and a pipeline function that elaborates a batch of modules and
//! returns rendered entities and diagnostics for assertion in integration
//! tests.

#![warn(missing_docs)]

use vela_ast::{ConstExpr, Direction, Literal, Module, PortDecl, SurfaceType};
use vela_common::Interner;
use vela_config::{load_config_from_str, ElabConfig};
use vela_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use vela_elaborate::{ElabError, ElaborationSession};
use vela_ir::{print::print_entity, Entity};
use vela_source::{SourceDb, Span};

/// Result of elaborating a batch of modules.
pub struct PipelineResult {
    /// Per input module: the entity, or the error that stopped it.
    pub results: Vec<Result<Entity, ElabError>>,
    /// Textual form of every successfully built entity, in input order.
    pub rendered: Vec<String>,
    /// All diagnostics emitted during elaboration.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
}

impl PipelineResult {
    /// Renders every diagnostic against `sources`.
    pub fn render_diagnostics(&self, sources: &SourceDb) -> Vec<String> {
        let renderer = TerminalRenderer::new();
        self.diagnostics
            .iter()
            .map(|d| renderer.render(d, sources))
            .collect()
    }

    /// Number of warning-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

/// Parses an `[elaborate]` configuration, panicking on invalid input.
pub fn make_config(toml_text: &str) -> ElabConfig {
    load_config_from_str(toml_text).unwrap_or_else(|e| panic!("bad test config: {e}"))
}

/// Elaborates `modules` in one session with `config`.
pub fn run_pipeline(modules: &[Module], interner: &Interner, config: ElabConfig) -> PipelineResult {
    let sink = DiagnosticSink::new();
    let mut session = ElaborationSession::new(interner, config, &sink);
    let results: Vec<Result<Entity, ElabError>> = session
        .elaborate_all(modules)
        .into_iter()
        .map(|r| r.map(|id| session.get(id).cloned().unwrap_or_else(|| panic!("dangling {id:?}"))))
        .collect();
    let rendered = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|e| print_entity(e, interner))
        .collect();
    let error_count = sink.error_count();
    PipelineResult {
        results,
        rendered,
        diagnostics: sink.take_all(),
        has_errors: error_count > 0,
        error_count,
    }
}

/// Elaborates a single module with the default configuration and renders it.
pub fn elaborate_and_print(module: &Module, interner: &Interner) -> Result<String, ElabError> {
    let result = run_pipeline(std::slice::from_ref(module), interner, ElabConfig::default());
    result
        .results
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("pipeline returned no result"))
        .map(|e| print_entity(&e, interner))
}

/// Fluent construction of surface modules for tests.
pub struct ModuleBuilder<'a> {
    interner: &'a Interner,
    module: Module,
}

impl<'a> ModuleBuilder<'a> {
    /// Starts a module named `name`.
    pub fn new(interner: &'a Interner, name: &str) -> Self {
        Self {
            interner,
            module: Module::new(interner.get_or_intern(name)),
        }
    }

    /// Adds a port without initializer.
    pub fn port(self, direction: Direction, ty: SurfaceType, name: &str) -> Self {
        let decl = PortDecl::new(self.interner.get_or_intern(name), direction, ty);
        self.port_decl(decl)
    }

    /// Adds a port whose initializer is the literal `text` (`4'b10x1`, `1`, `'0`).
    pub fn port_with(self, direction: Direction, ty: SurfaceType, name: &str, text: &str) -> Self {
        let lit = Literal::parse(text).unwrap_or_else(|| panic!("bad literal `{text}`"));
        self.port_with_expr(direction, ty, name, lit)
    }

    /// Adds a port with an arbitrary constant initializer.
    pub fn port_with_expr(
        self,
        direction: Direction,
        ty: SurfaceType,
        name: &str,
        init: impl Into<ConstExpr>,
    ) -> Self {
        let decl = PortDecl::new(self.interner.get_or_intern(name), direction, ty).with_default(init);
        self.port_decl(decl)
    }

    /// Adds a prepared declaration.
    pub fn port_decl(mut self, decl: PortDecl) -> Self {
        self.module = self.module.with_port(decl);
        self
    }

    /// Sets the span of the most recent port.
    pub fn at(mut self, span: Span) -> Self {
        if let Some(last) = self.module.ports.last_mut() {
            last.span = span;
        }
        self
    }

    /// Finishes the module.
    pub fn build(self) -> Module {
        self.module
    }
}

/// Scenario A: a module without ports.
pub fn scenario_a(interner: &Interner) -> Module {
    ModuleBuilder::new(interner, "A").build()
}

/// Scenario B: `input bit x; output bit y; inout bit z`.
pub fn scenario_b(interner: &Interner) -> Module {
    ModuleBuilder::new(interner, "B")
        .port(Direction::Input, SurfaceType::Bit, "x")
        .port(Direction::Output, SurfaceType::Bit, "y")
        .port(Direction::Inout, SurfaceType::Bit, "z")
        .build()
}

/// Scenario C: `output bit x = 0; output bit y = 1`.
pub fn scenario_c(interner: &Interner) -> Module {
    ModuleBuilder::new(interner, "C")
        .port_with(Direction::Output, SurfaceType::Bit, "x", "0")
        .port_with(Direction::Output, SurfaceType::Bit, "y", "1")
        .build()
}
