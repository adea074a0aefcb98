//! Error reporting: each failure kind, its diagnostic, and batch isolation.

use vela_ast::{ConstExpr, Direction, SurfaceType};
use vela_common::Interner;
use vela_conformance::*;
use vela_elaborate::errors::{E300, E301, E302, E304, E305};
use vela_elaborate::ElabError;
use vela_source::{SourceDb, Span};

fn single_error(module: vela_ast::Module, interner: &Interner) -> (ElabError, PipelineResult) {
    let result = run_pipeline(&[module], interner, make_config(""));
    let err = result.results[0].clone().unwrap_err();
    (err, result)
}

#[test]
fn unsupported_type_names_port_and_type() {
    let interner = Interner::new();
    let m = ModuleBuilder::new(&interner, "T")
        .port(Direction::Input, SurfaceType::Real, "r")
        .build();
    let (err, result) = single_error(m, &interner);
    assert_eq!(
        err,
        ElabError::UnsupportedType {
            module: "T".into(),
            port: "r".into(),
            ty: "real".into(),
            span: Span::DUMMY,
        }
    );
    assert_eq!(result.diagnostics[0].code, E300);
    assert!(result.rendered.is_empty());
}

#[test]
fn width_mismatch_on_oversized_literal() {
    let interner = Interner::new();
    let m = ModuleBuilder::new(&interner, "W")
        .port_with(Direction::Output, SurfaceType::Bit, "y", "2'b10")
        .build();
    let (err, result) = single_error(m, &interner);
    assert!(matches!(
        err,
        ElabError::WidthMismatch { literal_width: 2, target_width: 1, .. }
    ));
    assert_eq!(result.diagnostics[0].code, E301);
}

#[test]
fn exact_width_literals_fit() {
    let interner = Interner::new();
    let m = ModuleBuilder::new(&interner, "Z")
        .port_with(Direction::Output, SurfaceType::Bit, "y", "1'b1")
        .port_with(Direction::Output, SurfaceType::Bit, "w", "0")
        .build();
    assert_eq!(
        elaborate_and_print(&m, &interner).unwrap(),
        "entity @Z () (i1$ %y, i1$ %w) {\n    drv %y 1\n    drv %w 0\n}"
    );
}

#[test]
fn inout_initializer_rejected() {
    let interner = Interner::new();
    let m = ModuleBuilder::new(&interner, "I")
        .port_with(Direction::Inout, SurfaceType::Bit, "z", "1")
        .build();
    let (err, result) = single_error(m, &interner);
    assert!(matches!(err, ElabError::InvalidDefaultOnInout { ref port, .. } if port == "z"));
    assert_eq!(result.diagnostics[0].code, E304);
}

#[test]
fn fold_failure_reported() {
    let interner = Interner::new();
    let m = ModuleBuilder::new(&interner, "F")
        .port_with_expr(Direction::Output, SurfaceType::Int, "n", ConstExpr::Concat(vec![]))
        .build();
    let (err, result) = single_error(m, &interner);
    assert!(matches!(err, ElabError::ConstFold { .. }));
    assert_eq!(result.diagnostics[0].code, E305);
}

#[test]
fn companion_collision_renders_both_ports() {
    let interner = Interner::new();
    let mut sources = SourceDb::new();
    let text = "module N(\n  inout bit z,\n  output bit z0\n);\n";
    let file = sources.add_source("n.sv", text);
    let z = text.find("z,").unwrap() as u32;
    let z0 = text.find("z0").unwrap() as u32;

    let m = ModuleBuilder::new(&interner, "N")
        .port(Direction::Inout, SurfaceType::Bit, "z")
        .at(Span::new(file, z, z + 1))
        .port(Direction::Output, SurfaceType::Bit, "z0")
        .at(Span::new(file, z0, z0 + 2))
        .build();
    let (err, result) = single_error(m, &interner);
    assert!(matches!(
        err,
        ElabError::NameCollision { ref first_port, ref second_port, .. }
            if first_port == "z" && second_port == "z0"
    ));
    assert_eq!(result.diagnostics[0].code, E302);

    let rendered = &result.render_diagnostics(&sources)[0];
    assert!(rendered.starts_with("error[E302]: signal name `z0` in module `N`"));
    assert!(rendered.contains("--> n.sv:3:14"));
    assert!(rendered.contains("--> n.sv:2:13"));
    assert!(rendered.contains("first produced by `z`"));
}

#[test]
fn failing_module_does_not_affect_others() {
    let interner = Interner::new();
    let bad = ModuleBuilder::new(&interner, "Bad")
        .port(Direction::Output, SurfaceType::Str, "s")
        .build();
    let modules = [scenario_a(&interner), bad, scenario_c(&interner)];
    let result = run_pipeline(&modules, &interner, make_config("[elaborate]\nparallel = false\n"));
    assert!(result.results[0].is_ok());
    assert!(result.results[1].is_err());
    assert!(result.results[2].is_ok());
    assert_eq!(result.error_count, 1);
    assert!(result.has_errors);
    assert_eq!(result.rendered.len(), 2);
}
