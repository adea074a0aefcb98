//! Assembly of an [`Entity`] from a [`Module`].

use std::collections::HashMap;

use tracing::{debug, trace};
use vela_ast::{Module, PortDecl};
use vela_common::{ContentHash, Ident, Interner, InternalError};
use vela_config::ElabConfig;
use vela_ir::{Entity, InvariantViolation};
use vela_source::Span;

use crate::defaults::{materialize, DefaultSource};
use crate::errors::{ElabError, PortSite};
use crate::ports::split_port;
use crate::types::resolve_type;

/// Hash of a module's full declaration, used as its cache key.
pub fn module_hash(module: &Module) -> Result<ContentHash, ElabError> {
    let bytes = bincode::serde::encode_to_vec(module, bincode::config::standard())
        .map_err(|e| InternalError::new(format!("failed to encode module for hashing: {e}")))?;
    Ok(ContentHash::from_bytes(&bytes))
}

/// Builds the entity for `module`.
///
/// Ports are processed in declaration order. Each contributes its input
/// and/or output signal to the boundary lists, and every output's drive is
/// appended to the body in the order outputs are discovered. Either the
/// whole entity is returned or the first error is.
pub fn build_entity(
    module: &Module,
    interner: &Interner,
    config: &ElabConfig,
) -> Result<Entity, ElabError> {
    build_with_hash(module, module_hash(module)?, interner, config)
}

/// Claimed signal names: name -> (port that produced it, its span).
type NameTable = HashMap<Ident, (Ident, Span)>;

#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(module = interner.resolve(module.name), ports = module.ports.len())
)]
pub(crate) fn build_with_hash(
    module: &Module,
    hash: ContentHash,
    interner: &Interner,
    config: &ElabConfig,
) -> Result<Entity, ElabError> {
    let module_name = interner.resolve(module.name);
    let mut entity = Entity::new(module.name, hash, module.span);
    let mut names = NameTable::new();

    for port in &module.ports {
        let site = PortSite {
            module: module_name,
            port: interner.resolve(port.name),
            span: port.span,
        };
        trace!(port = site.port, direction = %port.direction, "splitting port");

        let ty = resolve_type(port, &site)?;
        let origin =
            DefaultSource::for_port(port, config.elaborate.implicit_two_state_defaults, &site)?;
        let split = split_port(port, ty, interner, config.companion_suffix());

        if let Some(input) = split.input {
            claim(&mut names, input.name, port, &site, interner)?;
            entity.add_signal(input);
        }
        if let Some(output) = split.output {
            claim(&mut names, output.name, port, &site, interner)?;
            let id = entity.add_signal(output);
            let drive = materialize(id, &entity.signals[id], origin, &site)?;
            if let Some(drive) = drive {
                entity.push_drive(drive);
            }
        }
    }

    entity
        .check_invariants()
        .map_err(|v| invariant_error(v, module_name, module.span, interner))?;
    debug!(
        inputs = entity.inputs.len(),
        outputs = entity.outputs.len(),
        drives = entity.body.len(),
        "entity built"
    );
    Ok(entity)
}

fn claim(
    names: &mut NameTable,
    name: Ident,
    port: &PortDecl,
    site: &PortSite<'_>,
    interner: &Interner,
) -> Result<(), ElabError> {
    if let Some(&(first_port, first_span)) = names.get(&name) {
        return Err(ElabError::NameCollision {
            module: site.module.to_string(),
            name: interner.resolve(name).to_string(),
            first_port: interner.resolve(first_port).to_string(),
            second_port: site.port.to_string(),
            span: site.span,
            first_span,
        });
    }
    names.insert(name, (port.name, port.span));
    Ok(())
}

fn invariant_error(
    violation: InvariantViolation,
    module: &str,
    span: Span,
    interner: &Interner,
) -> ElabError {
    match violation {
        InvariantViolation::DuplicateName { name } => ElabError::DuplicateName {
            module: module.to_string(),
            name: interner.resolve(name).to_string(),
            span,
        },
        other => InternalError::new(format!("entity `{module}` is malformed: {other}")).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_ast::{ConstExpr, Direction, Literal, SurfaceType};
    use vela_common::LogicVec;
    use vela_ir::SignalRole;

    struct Fixture {
        interner: Interner,
        config: ElabConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                interner: Interner::new(),
                config: ElabConfig::default(),
            }
        }

        fn port(&self, name: &str, direction: Direction, ty: SurfaceType) -> PortDecl {
            PortDecl::new(self.interner.get_or_intern(name), direction, ty)
        }

        fn module(&self, name: &str, ports: Vec<PortDecl>) -> Module {
            ports
                .into_iter()
                .fold(Module::new(self.interner.get_or_intern(name)), Module::with_port)
        }

        fn build(&self, module: &Module) -> Result<Entity, ElabError> {
            build_entity(module, &self.interner, &self.config)
        }

        fn names(&self, entity: &Entity, ids: &[vela_ir::SignalId]) -> Vec<String> {
            ids.iter()
                .map(|&id| self.interner.resolve(entity.signals[id].name).to_string())
                .collect()
        }
    }

    #[test]
    fn empty_module() {
        let f = Fixture::new();
        let e = f.build(&f.module("A", vec![])).unwrap();
        assert!(e.inputs.is_empty() && e.outputs.is_empty() && e.body.is_empty());
    }

    #[test]
    fn inout_companion_follows_port_order() {
        let f = Fixture::new();
        let m = f.module(
            "B",
            vec![
                f.port("x", Direction::Input, SurfaceType::Bit),
                f.port("y", Direction::Output, SurfaceType::Bit),
                f.port("z", Direction::Inout, SurfaceType::Bit),
            ],
        );
        let e = f.build(&m).unwrap();
        assert_eq!(f.names(&e, &e.inputs), ["x", "z"]);
        assert_eq!(f.names(&e, &e.outputs), ["y", "z0"]);
        let targets: Vec<_> = e.body.iter().map(|d| d.target).collect();
        assert_eq!(targets, e.outputs);
        assert!(e.body.iter().all(|d| d.value.is_zero()));
    }

    #[test]
    fn declared_defaults_are_driven() {
        let f = Fixture::new();
        let m = f.module(
            "C",
            vec![
                f.port("x", Direction::Output, SurfaceType::Bit).with_default(0u64),
                f.port("y", Direction::Output, SurfaceType::Bit).with_default(1u64),
            ],
        );
        let e = f.build(&m).unwrap();
        let values: Vec<_> = e.body.iter().map(|d| d.value.to_u64()).collect();
        assert_eq!(values, [Some(0), Some(1)]);
    }

    #[test]
    fn four_state_output_without_initializer_is_undriven() {
        let f = Fixture::new();
        let m = f.module("D", vec![f.port("q", Direction::Output, SurfaceType::Logic)]);
        let e = f.build(&m).unwrap();
        assert_eq!(e.outputs.len(), 1);
        assert!(e.body.is_empty());
        assert_eq!(e.signals[e.outputs[0]].role, SignalRole::Output);
    }

    #[test]
    fn two_state_implicit_zero_can_be_disabled() {
        let mut f = Fixture::new();
        f.config.elaborate.implicit_two_state_defaults = false;
        let m = f.module("E", vec![f.port("y", Direction::Output, SurfaceType::Int)]);
        assert!(f.build(&m).unwrap().body.is_empty());
    }

    #[test]
    fn vector_default_is_zero_extended() {
        let f = Fixture::new();
        let m = f.module(
            "V",
            vec![f
                .port("v", Direction::Output, SurfaceType::LogicVector { width: 8, signed: false })
                .with_default(Literal::parse("4'b1x01").unwrap())],
        );
        let e = f.build(&m).unwrap();
        assert_eq!(e.body[0].value, LogicVec::from_binary_str("00001x01").unwrap());
    }

    #[test]
    fn companion_collision() {
        let f = Fixture::new();
        let m = f.module(
            "N",
            vec![
                f.port("z", Direction::Inout, SurfaceType::Bit),
                f.port("z0", Direction::Output, SurfaceType::Bit),
            ],
        );
        let Err(ElabError::NameCollision { name, first_port, second_port, .. }) = f.build(&m)
        else {
            panic!("expected a name collision");
        };
        assert_eq!((name.as_str(), first_port.as_str(), second_port.as_str()), ("z0", "z", "z0"));
    }

    #[test]
    fn repeated_port_name_collides() {
        let f = Fixture::new();
        let m = f.module(
            "R",
            vec![
                f.port("a", Direction::Input, SurfaceType::Bit),
                f.port("a", Direction::Output, SurfaceType::Bit),
            ],
        );
        assert!(matches!(f.build(&m), Err(ElabError::NameCollision { .. })));
    }

    #[test]
    fn errors_abort_the_module() {
        let f = Fixture::new();
        let m = f.module(
            "X",
            vec![
                f.port("ok", Direction::Output, SurfaceType::Bit),
                f.port("r", Direction::Input, SurfaceType::Real),
            ],
        );
        assert!(matches!(f.build(&m), Err(ElabError::UnsupportedType { .. })));

        let m = f.module(
            "W",
            vec![f.port("y", Direction::Output, SurfaceType::Bit).with_default(3u64)],
        );
        assert!(matches!(
            f.build(&m),
            Err(ElabError::WidthMismatch { literal_width: 2, target_width: 1, .. })
        ));

        let m = f.module(
            "I",
            vec![f.port("z", Direction::Inout, SurfaceType::Bit).with_default(ConstExpr::from(0u64))],
        );
        assert!(matches!(f.build(&m), Err(ElabError::InvalidDefaultOnInout { .. })));
    }

    #[test]
    fn hash_tracks_declaration() {
        let f = Fixture::new();
        let a = f.module("H", vec![f.port("y", Direction::Output, SurfaceType::Bit)]);
        let b = f.module("H", vec![f.port("y", Direction::Output, SurfaceType::Logic)]);
        assert_eq!(module_hash(&a).unwrap(), module_hash(&a.clone()).unwrap());
        assert_ne!(module_hash(&a).unwrap(), module_hash(&b).unwrap());
        assert_eq!(f.build(&a).unwrap().content_hash, module_hash(&a).unwrap());
    }

    #[test]
    fn duplicate_invariant_maps_to_duplicate_name() {
        let interner = Interner::new();
        let err = invariant_error(
            InvariantViolation::DuplicateName { name: interner.get_or_intern("q") },
            "M",
            Span::DUMMY,
            &interner,
        );
        assert_eq!(
            err,
            ElabError::DuplicateName { module: "M".into(), name: "q".into(), span: Span::DUMMY }
        );
        let err = invariant_error(
            InvariantViolation::MultipleDrivers { target: vela_ir::SignalId::from_raw(0) },
            "M",
            Span::DUMMY,
            &interner,
        );
        assert!(matches!(err, ElabError::Internal(_)));
    }
}
