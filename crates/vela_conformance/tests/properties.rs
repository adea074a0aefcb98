//! Property tests over randomly generated port lists.

use std::collections::HashSet;

use proptest::prelude::*;
use vela_ast::{Direction, Literal, Module, PortDecl, SurfaceType};
use vela_common::{Interner, LogicVec};
use vela_config::ElabConfig;
use vela_elaborate::build_entity;
use vela_ir::print::print_entity;

/// One generated port: direction, type, and an initializer value for outputs.
#[derive(Debug, Clone)]
struct PortShape {
    direction: Direction,
    ty: SurfaceType,
    init: Option<u64>,
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Input),
        Just(Direction::Output),
        Just(Direction::Inout)
    ]
}

fn type_strategy() -> impl Strategy<Value = SurfaceType> {
    prop_oneof![
        Just(SurfaceType::Bit),
        Just(SurfaceType::Logic),
        Just(SurfaceType::Byte),
        Just(SurfaceType::Shortint),
        Just(SurfaceType::Int),
        Just(SurfaceType::Longint),
        (1u32..=16, any::<bool>()).prop_map(|(width, signed)| SurfaceType::BitVector { width, signed }),
        (1u32..=70, any::<bool>()).prop_map(|(width, signed)| SurfaceType::LogicVector { width, signed }),
    ]
}

fn port_strategy() -> impl Strategy<Value = PortShape> {
    (direction_strategy(), type_strategy(), proptest::option::of(any::<u64>())).prop_map(
        |(direction, ty, init)| PortShape {
            direction,
            ty,
            init: init.filter(|_| direction == Direction::Output),
        },
    )
}

fn width_of(ty: &SurfaceType) -> u32 {
    match ty {
        SurfaceType::Bit | SurfaceType::Logic => 1,
        SurfaceType::Byte => 8,
        SurfaceType::Shortint => 16,
        SurfaceType::Int | SurfaceType::Integer => 32,
        SurfaceType::Longint => 64,
        SurfaceType::BitVector { width, .. } | SurfaceType::LogicVector { width, .. } => *width,
        other => panic!("no width for {other:?}"),
    }
}

/// Port names end in `_` so no companion (`<name>0`) can equal another port.
fn make_module(interner: &Interner, shapes: &[PortShape]) -> Module {
    shapes
        .iter()
        .enumerate()
        .fold(Module::new(interner.get_or_intern("P")), |m, (i, shape)| {
            let mut port = PortDecl::new(
                interner.get_or_intern(&format!("p{i}_")),
                shape.direction,
                shape.ty.clone(),
            );
            if let Some(v) = shape.init {
                let bits = LogicVec::from_u64(v, width_of(&shape.ty));
                port = port.with_default(Literal::Sized(bits));
            }
            m.with_port(port)
        })
}

proptest! {
    #[test]
    fn build_is_deterministic(shapes in prop::collection::vec(port_strategy(), 0..12)) {
        let interner = Interner::new();
        let module = make_module(&interner, &shapes);
        let config = ElabConfig::default();
        let a = build_entity(&module, &interner, &config).unwrap();
        let b = build_entity(&module, &interner, &config).unwrap();
        prop_assert_eq!(print_entity(&a, &interner), print_entity(&b, &interner));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn port_count_is_conserved(shapes in prop::collection::vec(port_strategy(), 0..12)) {
        let interner = Interner::new();
        let module = make_module(&interner, &shapes);
        let e = build_entity(&module, &interner, &ElabConfig::default()).unwrap();
        prop_assert_eq!(e.inputs.len() + e.outputs.len(), module.ports.len() + module.inout_count());
    }

    #[test]
    fn boundary_names_are_unique(shapes in prop::collection::vec(port_strategy(), 0..12)) {
        let interner = Interner::new();
        let module = make_module(&interner, &shapes);
        let e = build_entity(&module, &interner, &ElabConfig::default()).unwrap();
        let mut seen = HashSet::new();
        for s in e.input_signals().chain(e.output_signals()) {
            prop_assert!(seen.insert(s.name));
        }
        prop_assert!(e.check_invariants().is_ok());
    }

    #[test]
    fn declared_defaults_are_driven_exactly(shapes in prop::collection::vec(port_strategy(), 0..12)) {
        let interner = Interner::new();
        let module = make_module(&interner, &shapes);
        let e = build_entity(&module, &interner, &ElabConfig::default()).unwrap();
        for (port, shape) in module.ports.iter().zip(&shapes) {
            let Some(v) = shape.init else { continue };
            let id = e.find(port.name).unwrap();
            let drives: Vec<_> = e.body.iter().filter(|d| d.target == id).collect();
            prop_assert_eq!(drives.len(), 1);
            prop_assert_eq!(&drives[0].value, &LogicVec::from_u64(v, width_of(&shape.ty)));
        }
    }

    #[test]
    fn inout_companions_are_zero(shapes in prop::collection::vec(port_strategy(), 0..12)) {
        let interner = Interner::new();
        let module = make_module(&interner, &shapes);
        let e = build_entity(&module, &interner, &ElabConfig::default()).unwrap();
        let companions: Vec<_> = e.outputs.iter().copied().filter(|&id| e.signals[id].is_companion()).collect();
        prop_assert_eq!(companions.len(), module.inout_count());
        for id in companions {
            let drive = e.drive_of(id).unwrap();
            prop_assert!(drive.value.is_zero());
            prop_assert_eq!(drive.value.width(), e.signals[id].ty.width);
        }
    }

    #[test]
    fn four_state_outputs_without_initializer_stay_undriven(
        shapes in prop::collection::vec(port_strategy(), 0..12)
    ) {
        let interner = Interner::new();
        let module = make_module(&interner, &shapes);
        let e = build_entity(&module, &interner, &ElabConfig::default()).unwrap();
        for (port, shape) in module.ports.iter().zip(&shapes) {
            if shape.direction != Direction::Output || shape.init.is_some() {
                continue;
            }
            let id = e.find(port.name).unwrap();
            prop_assert_eq!(e.drive_of(id).is_some(), shape.ty.is_two_state());
        }
    }
}
